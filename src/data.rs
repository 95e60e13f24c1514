//! The in-memory book corpus.

use crate::{errors::LoadError, lookup::normalize_title, model::Book};
use serde_json::from_slice;
use std::{collections::HashMap, fs, path::Path};
use tracing::{debug, warn};

/// Identifiers of the books shipped with the crate. Each names a file `<id>.json` in the resources
/// directory and doubles as the lookup key of that book.
pub const SOURCES: [&str; 2] = ["a_color_of_his_own", "fishing_in_the_air"];

/// Books keyed by the identifier of the file they were read from.
///
/// A store is only ever built at startup and is never modified afterwards; share it behind an
/// [`Arc`](std::sync::Arc) rather than cloning it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookStore {
    /// The books, keyed by source identifier.
    books: HashMap<String, Book>,
}

impl BookStore {
    /// Read and parse `<id>.json` from `dir` for every identifier in `ids`.
    ///
    /// This performs blocking IO and is meant to be called once, before serving anything.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if a file is missing or unreadable and [`LoadError::Parse`] if
    /// it does not contain a book. Loading stops at the first failure.
    #[inline]
    pub fn load<I, S>(dir: &Path, ids: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let books = ids
            .into_iter()
            .map(|id| -> Result<(String, Book), LoadError> {
                let id = id.as_ref();
                let book = read_book(&dir.join(format!("{id}.json")))?;

                if normalize_title(&book.title) != id {
                    warn!(
                        id,
                        title = %book.title,
                        "title does not normalize to its file name, lookups by title will miss"
                    );
                }
                debug!(id, pages = book.pages.len(), "loaded book");

                Ok((id.to_owned(), book))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { books })
    }

    /// Load the books listed in [`SOURCES`] from `dir`.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    #[inline]
    pub fn open(dir: &Path) -> Result<Self, LoadError> {
        Self::load(dir, SOURCES)
    }

    /// Get a book by its exact key. No normalization is performed, see
    /// [`resolve_book`](crate::lookup::resolve_book) for that.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Book> {
        self.books.get(key)
    }

    /// The number of books.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether there are no books at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<K> FromIterator<(K, Book)> for BookStore
where
    K: Into<String>,
{
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Book)>,
    {
        Self {
            books: iter.into_iter().map(|(key, book)| (key.into(), book)).collect(),
        }
    }
}

/// Read a single book from a JSON file.
///
/// # Errors
///
/// See [`BookStore::load`].
fn read_book(path: &Path) -> Result<Book, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;

    from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn resources() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
    }

    #[test]
    fn open_shipped_sources() {
        let store = BookStore::open(&resources()).unwrap();

        assert_eq!(store.len(), SOURCES.len());
        assert_eq!(
            store.get("a_color_of_his_own").unwrap().title,
            "A Color of His Own"
        );
        assert_eq!(
            store.get("fishing_in_the_air").unwrap().title,
            "Fishing in the Air"
        );
    }

    #[test]
    fn shipped_titles_match_their_keys() {
        let store = BookStore::open(&resources()).unwrap();

        for id in SOURCES {
            assert_eq!(normalize_title(&store.get(id).unwrap().title), id);
        }
    }

    #[test]
    fn get_is_exact() {
        let store = BookStore::open(&resources()).unwrap();

        assert!(store.get("A Color of His Own").is_none());
        assert!(store.get("a_color_of_his_own ").is_none());
    }

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();

        let err = BookStore::load(dir.path(), ["nowhere"]).unwrap_err();

        assert!(
            matches!(&err, LoadError::Read { path, .. } if path.ends_with("nowhere.json")),
            "{err}"
        );
    }

    #[test]
    fn malformed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{\"title\": \"Broken\"").unwrap();

        let err = BookStore::load(dir.path(), ["broken"]).unwrap_err();

        assert!(matches!(err, LoadError::Parse { .. }), "{err}");
    }

    #[test]
    fn wrong_shape() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("shapeless.json"),
            r#"{"title": "Shapeless", "author": "Nobody"}"#,
        )
        .unwrap();

        let err = BookStore::load(dir.path(), ["shapeless"]).unwrap_err();

        assert!(matches!(err, LoadError::Parse { .. }), "{err}");
    }

    #[test]
    fn first_failure_aborts() {
        let err = BookStore::load(&resources(), ["a_color_of_his_own", "missing"]).unwrap_err();

        assert!(matches!(err, LoadError::Read { .. }), "{err}");
    }

    #[test]
    fn mismatched_title_keeps_file_key() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("odd_one.json"),
            r#"{"title": "Something Else", "author": "Nobody", "pages": []}"#,
        )
        .unwrap();

        let store = BookStore::load(dir.path(), ["odd_one"]).unwrap();

        assert_eq!(store.get("odd_one").unwrap().title, "Something Else");
        assert!(store.get("something_else").is_none());
    }

    #[test]
    fn empty() {
        let store = BookStore::load(&resources(), Vec::<String>::new()).unwrap();

        assert!(store.is_empty());
    }
}
