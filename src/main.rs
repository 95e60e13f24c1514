//! The bookshelf server: loads the book sources and serves them over GraphQL.
//!
//! Configured through `BOOKSHELF_ADDR`, `BOOKSHELF_RESOURCES` and `RUST_LOG`, optionally from a
//! `.env` file.

use async_graphql as _;
use async_graphql_axum as _;
use axum as _;
use bookshelf::{BookStore, build_schema, config::Settings, server};
use dotenvy as _;
use serde as _;
use serde_json as _;
use std::{error::Error, sync::Arc};
use thiserror as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Install the log subscriber, honoring `RUST_LOG` and defaulting to `info`.
fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// # Errors
///
/// Returns an error if the settings are invalid, any book cannot be loaded, or the server fails.
/// Nothing is served unless every book loads.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let settings = Settings::from_env()?;
    info!(resources = %settings.resources.display(), "loading books");

    let store = BookStore::open(&settings.resources).inspect_err(|err| {
        error!(%err, "could not load books");
    })?;
    info!(books = store.len(), "books loaded");

    let schema = build_schema(Arc::new(store));
    server::serve(settings.addr, schema).await?;

    Ok(())
}
