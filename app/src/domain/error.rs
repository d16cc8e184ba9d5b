//! Domain-level error types.
//!
//! These errors are adapter agnostic: the console layer renders them as
//! user-facing messages, and nothing in here is fatal. Persistence failures
//! are deliberately absent — the store logs those and keeps running on its
//! in-memory state (see [`crate::domain::library::LibraryStore`]).

use thiserror::Error;

use super::book::BookId;
use super::loan::MAX_ACTIVE_LOANS;

/// Validation failures raised by lending and catalogue operations.
///
/// Every variant leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// No catalogue entry carries the requested id.
    #[error("book with id {0} not found")]
    BookNotFound(BookId),
    /// The book still has copies out on loan and cannot be removed.
    #[error("cannot delete '{title}': copies are currently borrowed")]
    ActiveLoansExist {
        /// Title of the book that was kept.
        title: String,
    },
    /// Every owned copy is already out.
    #[error("all copies of '{title}' are currently borrowed")]
    NoCopiesAvailable {
        /// Title of the exhausted book.
        title: String,
    },
    /// The user already holds the maximum number of active loans.
    #[error("maximum borrowing limit ({MAX_ACTIVE_LOANS} books) reached")]
    BorrowLimitReached,
    /// The user holds no active loan for the requested book.
    #[error("no borrowing record for book id {book_id}")]
    LoanNotFound {
        /// Book the return was attempted against.
        book_id: BookId,
    },
    /// A book must enter the catalogue with at least one copy.
    #[error("a book needs a positive number of copies")]
    ZeroCopies,
}

/// Authentication and registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The requested username is already registered.
    #[error("username '{username}' already exists")]
    UsernameTaken {
        /// The occupied login name.
        username: String,
    },
    /// Unknown user, wrong password, or wrong role for this entry point.
    #[error("invalid credentials or wrong role")]
    InvalidCredentials,
}
