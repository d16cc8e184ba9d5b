//! Domain ports defining the edges of the hexagon.
//!
//! The store talks to persistence through [`StateRepository`] so the domain
//! never sees file paths or JSON. Adapters map their failures into the
//! strongly typed [`StateRepositoryError`] variants instead of returning
//! anyhow-style blobs.

use thiserror::Error;

use super::book::Book;
use super::loan::LoanRecord;

/// Full in-memory state handed across the persistence boundary.
///
/// Book order is significant: it is the catalogue's insertion order and
/// adapters must preserve it both ways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySnapshot {
    /// Catalogue entries in insertion order.
    pub books: Vec<Book>,
    /// Active loan records in creation order.
    pub borrowed_records: Vec<LoanRecord>,
}

/// Errors surfaced by the persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateRepositoryError {
    /// The state document exists but could not be read.
    #[error("state document could not be read: {message}")]
    Read {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// The state document was read but does not parse.
    #[error("state document is malformed: {message}")]
    Malformed {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// The state document could not be written.
    #[error("state document could not be written: {message}")]
    Write {
        /// Adapter-provided failure detail.
        message: String,
    },
}

/// Whole-document persistence for the library state.
///
/// `load` distinguishes "no document yet" (`Ok(None)`, first run) from a
/// document that exists but cannot be used (`Err`); the store seeds sample
/// data for the former and falls back to an empty catalogue for the latter.
#[cfg_attr(test, mockall::automock)]
pub trait StateRepository {
    /// Read the persisted snapshot, if one exists.
    fn load(&self) -> Result<Option<LibrarySnapshot>, StateRepositoryError>;

    /// Overwrite the persisted snapshot with the given state.
    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), StateRepositoryError>;
}
