//! Book catalogue entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors returned by [`BookId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookIdValidationError {
    /// The identifier is empty after trimming whitespace.
    #[error("book id must not be empty")]
    Empty,
    /// The identifier carries leading or trailing whitespace.
    #[error("book id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Opaque catalogue identifier.
///
/// Freshly added books receive a random UUID string; the seeded sample
/// catalogue uses the short ids `"1"`, `"2"`, `"3"`, so the type accepts
/// any non-empty trimmed string rather than insisting on UUID syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookId(String);

impl BookId {
    /// Validate and construct a [`BookId`].
    pub fn new(id: impl Into<String>) -> Result<Self, BookIdValidationError> {
        let raw = id.into();
        if raw.is_empty() {
            return Err(BookIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(BookIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<BookId> for String {
    fn from(value: BookId) -> Self {
        value.0
    }
}

impl TryFrom<String> for BookId {
    type Error = BookIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A title held by the library, with its total owned copy count.
///
/// ## Invariants
/// - `id` is unique across the catalogue.
/// - `copies` is the total owned; availability is derived by subtracting
///   active loans and is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Catalogue identifier.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Total owned copies.
    pub copies: u32,
}

/// A catalogue entry paired with its computed availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookStatus {
    /// The catalogue entry.
    pub book: Book,
    /// Copies not currently out on loan.
    pub available: u32,
}
