//! The GraphQL schema.
//!
//! The object types live in [`model`](crate::model); this module only adds the query root.

use crate::{data::BookStore, lookup::resolve_book, model::Book};
use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
use std::sync::Arc;

/// The complete schema type, as handed to the HTTP layer.
pub type BookSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// The query root.
#[derive(Clone, Debug)]
pub struct Query {
    /// The books available for lookup.
    store: Arc<BookStore>,
}

impl Query {
    /// Create a query root reading from `store`.
    #[inline]
    #[must_use]
    pub const fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }
}

#[Object]
impl Query {
    /// Find a book by its title. Matching ignores case and treats runs of whitespace as a single
    /// underscore. Returns null if there is no such book.
    async fn book(&self, title: Option<String>) -> Option<&Book> {
        // A missing title is no different from an unknown one.
        title
            .as_deref()
            .and_then(|title| resolve_book(&self.store, title))
    }
}

/// Build the schema around a loaded store. The schema has no mutations or subscriptions.
#[inline]
#[must_use]
pub fn build_schema(store: Arc<BookStore>) -> BookSchema {
    Schema::new(Query::new(store), EmptyMutation, EmptySubscription)
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sdl_shapes() {
        let sdl = build_schema(Arc::default()).sdl();

        for field in [
            "value: String!",
            "position: [Int!]!",
            "pageIndex: Int!",
            "content: String!",
            "tokens: [Token!]!",
            "title: String!",
            "author: String!",
            "pages: [Page!]!",
            "book(title: String): Book",
        ] {
            assert!(sdl.contains(field), "missing `{field}` in:\n{sdl}");
        }
        for ty in ["type Token", "type Page", "type Book", "type Query"] {
            assert!(sdl.contains(ty), "missing `{ty}` in:\n{sdl}");
        }
    }

    #[test]
    fn sdl_has_no_mutations() {
        let sdl = build_schema(Arc::default()).sdl();

        assert!(!sdl.contains("type Mutation"));
        assert!(!sdl.contains("type Subscription"));
    }

    #[tokio::test]
    async fn empty_store_resolves_null() {
        let schema = build_schema(Arc::default());

        let response = schema
            .execute(r#"{ book(title: "A Color of His Own") { title } }"#)
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "book": null })
        );
    }
}
