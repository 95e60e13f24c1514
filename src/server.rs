//! The HTTP surface: one endpoint, serving both GraphQL requests and the GraphiQL explorer.

use crate::graphql::BookSchema;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Router, extract::State, response::Html, routing::get};
use std::{io, net::SocketAddr};
use tokio::net::TcpListener;
use tracing::info;

/// The path GraphQL is served on.
pub const ENDPOINT: &str = "/graphql";

/// Executes a GraphQL request against the schema held in the router state.
async fn graphql_handler(
    State(schema): State<BookSchema>,
    graphql_request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(graphql_request.into_inner()).await.into()
}

/// Serves the GraphiQL explorer, pointed at [`ENDPOINT`].
async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(ENDPOINT).finish())
}

/// Build the router: `POST` executes a query, `GET` serves GraphiQL.
#[inline]
pub fn router(schema: BookSchema) -> Router {
    Router::new()
        .route(ENDPOINT, get(graphiql).post(graphql_handler))
        .with_state(schema)
}

/// Listen on `addr` and serve [`router`] until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[inline]
pub async fn serve(addr: SocketAddr, schema: BookSchema) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, endpoint = ENDPOINT, "serving");

    axum::serve(listener, router(schema)).await
}
