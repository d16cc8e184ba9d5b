//! JSON file persistence adapter.
//!
//! Implements [`StateRepository`] over a single pretty-printed JSON
//! document: a `books` object mapping book id to its record, and a
//! `borrowed_records` array with ISO-8601 due dates. The whole document is
//! read once at startup and rewritten in full after every mutation; the
//! overwrite is not atomic, which is accepted at this scope.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Book, LibrarySnapshot, LoanRecord, StateRepository, StateRepositoryError};

/// Whole-document JSON store at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing document path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for JsonFileStore {
    fn load(&self) -> Result<Option<LibrarySnapshot>, StateRepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StateRepositoryError::Read {
                    message: err.to_string(),
                });
            }
        };
        let document: StateDocument =
            serde_json::from_str(&raw).map_err(|err| StateRepositoryError::Malformed {
                message: err.to_string(),
            })?;
        Ok(Some(document.into()))
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), StateRepositoryError> {
        let document = StateDocument::from(snapshot.clone());
        let raw = serde_json::to_string_pretty(&document).map_err(|err| {
            StateRepositoryError::Write {
                message: err.to_string(),
            }
        })?;
        fs::write(&self.path, raw).map_err(|err| StateRepositoryError::Write {
            message: err.to_string(),
        })
    }
}

/// On-disk document shape.
///
/// Both top-level fields default to empty so a hand-trimmed document still
/// loads. The `books` object is keyed by book id and its entry order is the
/// catalogue's insertion order, preserved in both directions.
#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    #[serde(with = "book_map", default)]
    books: Vec<Book>,
    #[serde(default)]
    borrowed_records: Vec<LoanRecord>,
}

impl From<StateDocument> for LibrarySnapshot {
    fn from(value: StateDocument) -> Self {
        Self {
            books: value.books,
            borrowed_records: value.borrowed_records,
        }
    }
}

impl From<LibrarySnapshot> for StateDocument {
    fn from(value: LibrarySnapshot) -> Self {
        Self {
            books: value.books,
            borrowed_records: value.borrowed_records,
        }
    }
}

/// Serialise the catalogue `Vec` as a JSON object keyed by book id, and
/// read it back in document order.
mod book_map {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::domain::Book;

    pub fn serialize<S: Serializer>(books: &[Book], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(books.len()))?;
        for book in books {
            map.serialize_entry(book.id.as_str(), book)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Book>, D::Error> {
        struct BookMapVisitor;

        impl<'de> Visitor<'de> for BookMapVisitor {
            type Value = Vec<Book>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of book id to book record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut books = Vec::with_capacity(access.size_hint().unwrap_or(0));
                // The key repeats the embedded id; the record is trusted,
                // matching the original document's reader.
                while let Some((_, book)) = access.next_entry::<String, Book>()? {
                    books.push(book);
                }
                Ok(books)
            }
        }

        deserializer.deserialize_map(BookMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, UserId};
    use chrono::NaiveDate;
    use rstest::rstest;
    use tempfile::TempDir;

    fn sample_snapshot() -> LibrarySnapshot {
        let book = |id: &str, title: &str, author: &str, copies: u32| Book {
            id: BookId::new(id).expect("valid id"),
            title: title.to_owned(),
            author: author.to_owned(),
            copies,
        };
        LibrarySnapshot {
            books: vec![
                book("2", "1984", "George Orwell", 5),
                book("1", "The Great Gatsby", "F. Scott Fitzgerald", 3),
            ],
            borrowed_records: vec![LoanRecord {
                user_id: UserId::new("u1").expect("valid user id"),
                book_id: BookId::new("2").expect("valid id"),
                due_date: NaiveDate::from_ymd_opt(2026, 9, 6).expect("valid date"),
            }],
        }
    }

    #[rstest]
    fn missing_document_loads_as_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("library_data.json"));
        assert_eq!(store.load().expect("load"), None);
    }

    #[rstest]
    fn snapshot_round_trips_with_order_preserved() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("library_data.json"));
        let snapshot = sample_snapshot();
        store.save(&snapshot).expect("save");
        let restored = store.load().expect("load").expect("document present");
        assert_eq!(restored, snapshot);
    }

    #[rstest]
    fn document_uses_the_original_layout() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("library_data.json");
        let store = JsonFileStore::new(&path);
        store.save(&sample_snapshot()).expect("save");

        let raw = fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["books"]["2"]["title"], "1984");
        assert_eq!(value["books"]["2"]["copies"], 5);
        assert_eq!(value["borrowed_records"][0]["user_id"], "u1");
        assert_eq!(value["borrowed_records"][0]["due_date"], "2026-09-06");
    }

    #[rstest]
    fn malformed_document_is_reported_not_swallowed() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("library_data.json");
        fs::write(&path, "{ not json").expect("write corrupt file");
        let err = JsonFileStore::new(&path).load().expect_err("malformed");
        assert!(matches!(err, StateRepositoryError::Malformed { .. }));
    }

    #[rstest]
    fn absent_top_level_fields_default_to_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("library_data.json");
        fs::write(&path, "{}").expect("write minimal file");
        let snapshot = JsonFileStore::new(&path)
            .load()
            .expect("load")
            .expect("document present");
        assert!(snapshot.books.is_empty());
        assert!(snapshot.borrowed_records.is_empty());
    }

    #[rstest]
    fn unwritable_path_surfaces_a_write_error() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("missing").join("library_data.json"));
        let err = store.save(&sample_snapshot()).expect_err("no parent dir");
        assert!(matches!(err, StateRepositoryError::Write { .. }));
    }
}
