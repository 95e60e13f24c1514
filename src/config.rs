//! Runtime settings, read from the environment.

use crate::errors::ConfigError;
use dotenvy::Error as DotenvError;
use std::{env, io::ErrorKind, net::SocketAddr, path::PathBuf};
use tracing::debug;

/// Variable holding the address to listen on.
pub const ADDR_VAR: &str = "BOOKSHELF_ADDR";
/// Variable holding the directory the book sources are read from.
pub const RESOURCES_VAR: &str = "BOOKSHELF_RESOURCES";

/// Address used when [`ADDR_VAR`] is unset.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8081";
/// Directory used when [`RESOURCES_VAR`] is unset. Relative paths are resolved against the
/// working directory.
pub const DEFAULT_RESOURCES: &str = "resources";

/// Settings for the server binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// The address to listen on.
    pub addr: SocketAddr,
    /// The directory containing `<id>.json` for every source.
    pub resources: PathBuf,
}

impl Settings {
    /// Read settings using `lookup` to fetch variables, falling back to defaults for missing ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddr`] if the address is set but cannot be parsed.
    #[inline]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr { value: addr, source })?;

        let resources: PathBuf =
            lookup(RESOURCES_VAR).map_or_else(|| DEFAULT_RESOURCES.into(), Into::into);

        Ok(Self { addr, resources })
    }

    /// Read settings from the process environment, after loading a `.env` file if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] if a `.env` file exists but is unreadable or malformed.
    /// Otherwise see [`from_lookup`](Self::from_lookup).
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(path) = optional_dotenv(dotenvy::dotenv())? {
            debug!(path = %path.display(), "loaded .env");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }
}

/// Treat a missing `.env` file as no file at all, keeping every other failure.
///
/// # Errors
///
/// Returns [`ConfigError::Dotenv`] for any error but a missing file.
fn optional_dotenv<T>(result: Result<T, DotenvError>) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DotenvError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Dotenv(err)),
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
mod tests {
    use super::*;
    use std::{collections::HashMap, fs};
    use tempfile::tempdir;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars = vars
            .iter()
            .map(|&(key, value)| (key.to_owned(), value.to_owned()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let settings = Settings::from_lookup(lookup_in(&[])).unwrap();

        assert_eq!(settings.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(settings.resources, PathBuf::from(DEFAULT_RESOURCES));
    }

    #[test]
    fn overrides() {
        let settings = Settings::from_lookup(lookup_in(&[
            (ADDR_VAR, "0.0.0.0:9000"),
            (RESOURCES_VAR, "/srv/books"),
        ]))
        .unwrap();

        assert_eq!(settings.addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.resources, PathBuf::from("/srv/books"));
    }

    #[test]
    fn invalid_addr() {
        let err = Settings::from_lookup(lookup_in(&[(ADDR_VAR, "localhost")])).unwrap_err();

        assert!(
            matches!(&err, ConfigError::InvalidAddr { value, .. } if value == "localhost"),
            "{err}"
        );
    }

    #[test]
    fn missing_dotenv_is_ignored() {
        let dir = tempdir().unwrap();

        let loaded = optional_dotenv(dotenvy::from_path(dir.path().join(".env"))).unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_dotenv_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "this line has no equals sign\n").unwrap();

        let err = optional_dotenv(dotenvy::from_path(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Dotenv(_)), "{err}");
    }
}
