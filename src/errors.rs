//! Error types raised while starting up.

use dotenvy::Error as DotenvError;
use serde_json::Error as JsonError;
use std::{io::Error as IoError, net::AddrParseError, path::PathBuf};
use thiserror::Error;

/// Errors that may occur when loading the book corpus. Created by
/// [`BookStore::load`](crate::data::BookStore::load).
///
/// The corpus is fixed at deploy time, so there is nothing to retry: callers are expected to
/// abort.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// A source file could not be read.
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        /// The file that was attempted.
        path: PathBuf,
        /// The source error.
        #[source]
        source: IoError,
    },
    /// A source file was read, but is not valid JSON or does not have the shape of a book.
    #[error("Could not parse {}: {source}", .path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The source error.
        #[source]
        source: JsonError,
    },
}

/// Errors that may occur when reading settings. Created by
/// [`Settings::from_lookup`](crate::config::Settings::from_lookup) and
/// [`Settings::from_env`](crate::config::Settings::from_env).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The bind address is not a valid socket address.
    #[error("Invalid bind address {value:?}: {source}")]
    InvalidAddr {
        /// The raw value as it was provided.
        value: String,
        /// The source error.
        #[source]
        source: AddrParseError,
    },
    /// A `.env` file exists but could not be read or parsed.
    #[error("Could not load .env: {0}")]
    Dotenv(#[source] DotenvError),
}
