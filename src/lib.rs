//! A small, static book corpus served over GraphQL.
//!
//! Books are read from JSON files once at startup into a [`BookStore`], which is then shared
//! read-only with the schema. The schema exposes a single query, `book(title: String): Book`,
//! matching titles case-insensitively with whitespace runs treated as underscores (see
//! [`normalize_title`]).

// Only the binary installs a subscriber.
use tracing_subscriber as _;
// Only used by integration tests.
#[cfg(test)]
use tower as _;

pub mod config;
pub mod data;
pub mod errors;
pub mod graphql;
pub mod lookup;
pub mod model;
pub mod server;

pub use data::BookStore;
pub use graphql::{BookSchema, build_schema};
pub use lookup::{normalize_title, resolve_book};
pub use model::{Book, Page, Token};
