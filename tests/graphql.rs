//! Queries executed directly against the schema built from the shipped sources.

use async_graphql_axum as _;
use axum as _;
use dotenvy as _;
use serde as _;
use tempfile as _;
use thiserror as _;
use tower as _;
use tracing as _;
use tracing_subscriber as _;

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
mod tests {
    use async_graphql::{Request, Variables};
    use bookshelf::{BookSchema, BookStore, build_schema};
    use serde_json::{Value, from_str, json};
    use std::{fs, path::Path, sync::Arc};

    /// Selects every field of a book.
    const FULL_BOOK: &str = "
        query Book($title: String) {
            book(title: $title) {
                title
                author
                pages { pageIndex content tokens { value position } }
            }
        }
    ";

    fn resources() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))
    }

    fn schema() -> BookSchema {
        let store = BookStore::open(resources()).expect("Failed to load books");
        build_schema(Arc::new(store))
    }

    /// The raw JSON of a source file.
    fn source(id: &str) -> Value {
        let text = fs::read_to_string(resources().join(format!("{id}.json")))
            .expect("Failed to read source");
        from_str(&text).expect("Failed to parse source")
    }

    /// Run a query, asserting it succeeds, and return its data as JSON.
    async fn run(schema: &BookSchema, request: impl Into<Request>) -> Value {
        let response = schema.execute(request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().expect("Failed to convert data")
    }

    /// Query every field of the book matching `title`.
    async fn full_book(schema: &BookSchema, title: Value) -> Value {
        let request =
            Request::new(FULL_BOOK).variables(Variables::from_json(json!({ "title": title })));
        let mut data = run(schema, request).await;
        data["book"].take()
    }

    #[tokio::test]
    async fn exact_title() {
        let schema = schema();

        let book = full_book(&schema, json!("A Color of His Own")).await;

        assert_eq!(book, source("a_color_of_his_own"));
    }

    #[tokio::test]
    async fn lowercase_title() {
        let schema = schema();

        let book = full_book(&schema, json!("fishing in the air")).await;

        assert_eq!(book, source("fishing_in_the_air"));
    }

    #[tokio::test]
    async fn unknown_title() {
        let schema = schema();

        let book = full_book(&schema, json!("Nonexistent Book")).await;

        assert_eq!(book, Value::Null);
    }

    // Runs of whitespace collapse, but leading and trailing ones still become underscores.
    #[tokio::test]
    async fn irregular_spacing() {
        let schema = schema();

        let padded = full_book(&schema, json!("  Fishing   In The Air  ")).await;
        let inner = full_book(&schema, json!("Fishing   In The Air")).await;

        assert_eq!(padded, Value::Null);
        assert_eq!(inner, source("fishing_in_the_air"));
    }

    #[tokio::test]
    async fn null_title() {
        let schema = schema();

        let explicit = full_book(&schema, Value::Null).await;
        let omitted = run(&schema, "{ book { title } }").await;

        assert_eq!(explicit, Value::Null);
        assert_eq!(omitted, json!({ "book": null }));
    }

    #[tokio::test]
    async fn reading_order() {
        let schema = schema();
        let expected = source("a_color_of_his_own");

        let book = full_book(&schema, json!("A Color of His Own")).await;

        let pages = book["pages"].as_array().expect("pages should be a list");
        let expected_pages = expected["pages"].as_array().expect("pages should be a list");
        assert_eq!(pages.len(), expected_pages.len());
        for (index, (page, expected_page)) in pages.iter().zip(expected_pages).enumerate() {
            assert_eq!(page["pageIndex"], json!(index));
            assert_eq!(page["tokens"], expected_page["tokens"]);

            let content = page["content"].as_str().expect("content should be a string");
            for token in page["tokens"].as_array().expect("tokens should be a list") {
                let start = token["position"][0].as_u64().expect("start offset") as usize;
                let end = token["position"][1].as_u64().expect("end offset") as usize;
                assert_eq!(content.get(start..end), token["value"].as_str());
            }
        }
    }

    #[tokio::test]
    async fn partial_selection() {
        let schema = schema();

        let data = run(&schema, r#"{ book(title: "FISHING IN THE AIR") { author } }"#).await;

        assert_eq!(data, json!({ "book": { "author": "Sharon Creech" } }));
    }

    #[tokio::test]
    async fn aliased_lookups() {
        let schema = schema();

        let data = run(
            &schema,
            r#"{
                color: book(title: "a color of his own") { title }
                fishing: book(title: "Fishing In The Air") { title }
                missing: book(title: "A Colour of His Own") { title }
            }"#,
        )
        .await;

        assert_eq!(
            data,
            json!({
                "color": { "title": "A Color of His Own" },
                "fishing": { "title": "Fishing in the Air" },
                "missing": null,
            })
        );
    }

    #[tokio::test]
    async fn unknown_field() {
        let schema = schema();

        let response = schema
            .execute(r#"{ book(title: "A Color of His Own") { isbn } }"#)
            .await;

        assert!(!response.errors.is_empty());
    }
}
