//! Domain primitives and services.
//!
//! Purpose: strongly typed catalogue, loan, and account entities plus the
//! lending store that owns every business decision. Adapters at the edges
//! translate console input and JSON documents into these types; nothing in
//! here performs I/O beyond the [`ports::StateRepository`] boundary.
//!
//! Public surface:
//! - [`LibraryStore`] — catalogue CRUD, borrowing, returning, reporting.
//! - [`Directory`] / [`Session`] — in-memory accounts and login context.
//! - [`LibraryError`] / [`AuthError`] — validation failure taxonomy.

pub mod auth;
pub mod book;
pub mod error;
pub mod library;
pub mod loan;
pub mod ports;
pub mod user;

pub use self::auth::{Directory, Session};
pub use self::book::{Book, BookId, BookIdValidationError, BookStatus};
pub use self::error::{AuthError, LibraryError};
pub use self::library::{LibraryReport, LibraryStore};
pub use self::loan::{LOAN_PERIOD_DAYS, LoanRecord, MAX_ACTIVE_LOANS};
pub use self::ports::{LibrarySnapshot, StateRepository, StateRepositoryError};
pub use self::user::{Role, User, UserId, UserValidationError, Username};

/// Convenient result alias for lending operations.
pub type LibraryResult<T> = Result<T, LibraryError>;
