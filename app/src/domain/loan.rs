//! Active loan records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::book::BookId;
use super::user::UserId;

/// Days a borrowed copy may be held before it counts as overdue.
pub const LOAN_PERIOD_DAYS: u64 = 7;

/// Maximum simultaneous active loans per user.
pub const MAX_ACTIVE_LOANS: usize = 3;

/// Evidence that one copy of a book is out with a user.
///
/// Identity is the `(user_id, book_id)` pair; the same pair may appear more
/// than once when a user borrows additional copies of the same title, and
/// each record counts separately against availability and the per-user cap.
/// Records are created on borrow and destroyed on return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Borrowing account.
    pub user_id: UserId,
    /// Borrowed title; references a catalogue entry at creation time.
    pub book_id: BookId,
    /// Date the copy is due back, ISO-8601 on disk.
    pub due_date: NaiveDate,
}
