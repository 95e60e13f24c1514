//! Finding books by title.

use crate::{data::BookStore, model::Book};
use tracing::debug;

/// Whether `c` separates words in a title.
///
/// This is the ECMAScript notion of whitespace: Unicode `White_Space` plus the byte order mark,
/// minus next line (U+0085).
fn is_title_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Turn a title into the key it is stored under: every run of whitespace becomes a single `_`,
/// then everything is lowercased.
///
/// Whitespace follows ECMAScript: the byte order mark counts, next line (U+0085) does not.
/// Leading and trailing whitespace is *not* trimmed, so `" Title "` becomes `"_title_"` and will
/// not match `"title"`. Whitespace-only input becomes `"_"`.
#[inline]
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if is_title_space(c) {
            if !in_whitespace {
                key.push('_');
            }
            in_whitespace = true;
        } else {
            key.push(c);
            in_whitespace = false;
        }
    }

    key.to_lowercase()
}

/// Find a book by its title. Returns [`None`] if no book matches; this is an expected outcome.
///
/// See [`normalize_title`] for how titles are matched.
#[inline]
#[must_use]
pub fn resolve_book<'s>(store: &'s BookStore, title: &str) -> Option<&'s Book> {
    let key = normalize_title(title);
    let book = store.get(&key);

    if book.is_none() {
        debug!(title, key = %key, "no such book");
    }

    book
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn book(title: &str) -> Book {
        Book {
            title: title.to_owned(),
            author: "Anonymous".to_owned(),
            pages: vec![Page {
                page_index: 0,
                content: String::new(),
                tokens: vec![],
            }],
        }
    }

    fn store() -> BookStore {
        [
            ("a_color_of_his_own", book("A Color of His Own")),
            ("fishing_in_the_air", book("Fishing in the Air")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn normalize_spaces_and_case() {
        assert_eq!(normalize_title("A Color of His Own"), "a_color_of_his_own");
        assert_eq!(normalize_title("fishing in the air"), "fishing_in_the_air");
        assert_eq!(normalize_title("Nonexistent Book"), "nonexistent_book");
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(
            normalize_title("  Fishing   In The Air  "),
            "_fishing_in_the_air_"
        );
        assert_eq!(normalize_title("Fishing\t\n In\u{a0}the Air"), "fishing_in_the_air");
    }

    #[test]
    fn normalize_byte_order_mark_is_space() {
        assert_eq!(
            normalize_title("Fishing\u{feff}in\u{feff}the\u{feff}Air"),
            "fishing_in_the_air"
        );
        assert_eq!(normalize_title("\u{feff}"), "_");
    }

    #[test]
    fn normalize_next_line_is_not_space() {
        assert_eq!(
            normalize_title("Fishing\u{85}in\u{85}the\u{85}Air"),
            "fishing\u{85}in\u{85}the\u{85}air"
        );
    }

    #[test]
    fn normalize_degenerate() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title(" \t "), "_");
    }

    #[test]
    fn normalize_keeps_underscores_and_punctuation() {
        assert_eq!(normalize_title("Already_Snake _Case"), "already_snake__case");
        assert_eq!(normalize_title("Who's There?"), "who's_there?");
    }

    #[test]
    fn normalize_idempotent() {
        for title in [
            "A Color of His Own",
            "  Fishing   In The Air  ",
            "ΟΔΥΣΣΕΥΣ and Friends",
            "",
            " ",
        ] {
            let once = normalize_title(title);

            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn resolve_exact_and_case_insensitive() {
        let store = store();

        assert_eq!(
            resolve_book(&store, "A Color of His Own").unwrap().title,
            "A Color of His Own"
        );
        assert_eq!(
            resolve_book(&store, "fishing in the air").unwrap().title,
            "Fishing in the Air"
        );
        assert_eq!(
            resolve_book(&store, "FISHING IN THE AIR").unwrap().title,
            "Fishing in the Air"
        );
        assert_eq!(
            resolve_book(&store, "a_color_of_his_own").unwrap().title,
            "A Color of His Own"
        );
    }

    #[test]
    fn resolve_miss() {
        let store = store();

        assert!(resolve_book(&store, "Nonexistent Book").is_none());
        assert!(resolve_book(&store, "").is_none());
        assert!(resolve_book(&store, "   ").is_none());
        assert!(resolve_book(&store, "Fishing").is_none());
    }

    #[test]
    fn resolve_boundary_whitespace_misses() {
        let store = store();

        assert!(resolve_book(&store, "  Fishing   In The Air  ").is_none());
        assert!(resolve_book(&store, "Fishing   In The Air").is_some());
    }

    #[test]
    fn resolve_unusual_separators() {
        let store = store();

        assert!(resolve_book(&store, "Fishing\u{feff}in\u{3000}the\u{2028}Air").is_some());
        assert!(resolve_book(&store, "Fishing\u{85}in\u{85}the\u{85}Air").is_none());
    }
}
