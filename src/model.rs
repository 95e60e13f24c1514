//! The types making up a book, shared by the JSON sources and the GraphQL schema.
//!
//! Field names are snake case in Rust and camel case everywhere else: `serde` is told so
//! explicitly, and `async-graphql` does it by default.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A book and its pages, in reading order.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// The title of the book.
    pub title: String,
    /// The person who wrote the book.
    pub author: String,
    /// The pages of the book.
    pub pages: Vec<Page>,
}

/// One page of a book.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The index of the page within its book.
    pub page_index: i32,
    /// The full text of the page.
    pub content: String,
    /// The tokens of the page.
    pub tokens: Vec<Token>,
}

/// The smallest unit of text recorded on a page.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text of the token.
    pub value: String,
    // NOTE: Opaque to us. The sources use `[start, end]` offsets into the page content, but any
    // sequence of integers is passed through as is.
    /// Where the token is located.
    pub position: Vec<i32>,
}
