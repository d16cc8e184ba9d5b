//! Lending store: catalogue CRUD, borrowing, and reporting.
//!
//! Every decision the menus surface — availability, borrowing limits,
//! overdue detection — lives here. The store owns the in-memory catalogue
//! and loan list, consults an injected clock for "today", and pushes a full
//! snapshot through the [`StateRepository`] port after each mutation.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use mockable::Clock;
use tracing::{error, info};

use super::LibraryResult;
use super::book::{Book, BookId, BookStatus};
use super::error::LibraryError;
use super::loan::{LOAN_PERIOD_DAYS, LoanRecord, MAX_ACTIVE_LOANS};
use super::ports::{LibrarySnapshot, StateRepository};
use super::user::UserId;

/// Aggregate counters for the staff report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryReport {
    /// Distinct titles in the catalogue.
    pub unique_titles: usize,
    /// Total owned copies across all titles.
    pub total_copies: u32,
    /// Active loan records.
    pub active_loans: usize,
    /// Loans whose due date is strictly before today.
    pub overdue: usize,
}

/// In-memory catalogue and loan ledger with whole-document persistence.
///
/// Single-threaded and synchronous throughout; lookups are linear scans,
/// which is deliberate at this catalogue size.
pub struct LibraryStore<S> {
    repo: S,
    clock: Arc<dyn Clock>,
    books: Vec<Book>,
    loans: Vec<LoanRecord>,
}

impl<S: StateRepository> LibraryStore<S> {
    /// Open the store, restoring persisted state through the repository.
    ///
    /// No document yet means a first run and seeds the three sample books.
    /// A document that exists but cannot be loaded is logged and the store
    /// starts with an empty catalogue rather than crashing.
    pub fn open(repo: S, clock: Arc<dyn Clock>) -> Self {
        let (books, loans) = match repo.load() {
            Ok(Some(snapshot)) => {
                info!(
                    books = snapshot.books.len(),
                    loans = snapshot.borrowed_records.len(),
                    "library state loaded"
                );
                (snapshot.books, snapshot.borrowed_records)
            }
            Ok(None) => {
                info!("no state document found, seeding sample catalogue");
                (seed_catalogue(), Vec::new())
            }
            Err(err) => {
                error!(error = %err, "could not load library state, starting empty");
                (Vec::new(), Vec::new())
            }
        };
        Self {
            repo,
            clock,
            books,
            loans,
        }
    }

    /// Write the current state through the repository.
    ///
    /// Persistence failures are logged and otherwise swallowed: the
    /// in-memory state stays authoritative and the session carries on,
    /// possibly divergent from disk until the next successful write.
    pub fn persist(&self) {
        let snapshot = LibrarySnapshot {
            books: self.books.clone(),
            borrowed_records: self.loans.clone(),
        };
        if let Err(err) = self.repo.save(&snapshot) {
            error!(error = %err, "could not persist library state");
        }
    }

    /// Add a new title to the catalogue and persist.
    ///
    /// Rejects a zero copy count; otherwise mints a fresh id and appends
    /// the book, preserving catalogue insertion order.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        copies: u32,
    ) -> LibraryResult<Book> {
        if copies == 0 {
            return Err(LibraryError::ZeroCopies);
        }
        let book = Book {
            id: BookId::random(),
            title: title.into(),
            author: author.into(),
            copies,
        };
        self.books.push(book.clone());
        self.persist();
        Ok(book)
    }

    /// Remove a title from the catalogue and persist.
    ///
    /// Fails without mutation when the id is unknown or any copy is still
    /// out on loan.
    pub fn delete_book(&mut self, book_id: &BookId) -> LibraryResult<Book> {
        let Some(index) = self.books.iter().position(|b| &b.id == book_id) else {
            return Err(LibraryError::BookNotFound(book_id.clone()));
        };
        if self.borrowed_count(book_id) > 0 {
            let title = self
                .books
                .get(index)
                .map_or_else(String::new, |b| b.title.clone());
            return Err(LibraryError::ActiveLoansExist { title });
        }
        let book = self.books.remove(index);
        self.persist();
        Ok(book)
    }

    /// Case-insensitive substring search over title and author.
    ///
    /// Results keep catalogue insertion order and carry computed
    /// availability.
    pub fn search_books(&self, query: &str) -> Vec<BookStatus> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .map(|book| self.status_of(book))
            .collect()
    }

    /// Issue one copy of a book to a user and persist.
    ///
    /// Failure order mirrors the menu flow: the per-user cap is checked
    /// first, then book existence, then availability. Nothing prevents the
    /// same user borrowing the same title twice; each loan is independent.
    pub fn borrow_book(
        &mut self,
        book_id: &BookId,
        user_id: &UserId,
    ) -> LibraryResult<LoanRecord> {
        let held = self.loans.iter().filter(|r| &r.user_id == user_id).count();
        if held >= MAX_ACTIVE_LOANS {
            return Err(LibraryError::BorrowLimitReached);
        }
        let Some(book) = self.books.iter().find(|b| &b.id == book_id) else {
            return Err(LibraryError::BookNotFound(book_id.clone()));
        };
        if self.available_of(book) == 0 {
            return Err(LibraryError::NoCopiesAvailable {
                title: book.title.clone(),
            });
        }
        let record = LoanRecord {
            user_id: user_id.clone(),
            book_id: book_id.clone(),
            due_date: self.today() + Days::new(LOAN_PERIOD_DAYS),
        };
        self.loans.push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Take back one copy, removing the first matching loan record.
    pub fn return_book(
        &mut self,
        book_id: &BookId,
        user_id: &UserId,
    ) -> LibraryResult<LoanRecord> {
        let Some(index) = self
            .loans
            .iter()
            .position(|r| &r.user_id == user_id && &r.book_id == book_id)
        else {
            return Err(LibraryError::LoanNotFound {
                book_id: book_id.clone(),
            });
        };
        let record = self.loans.remove(index);
        self.persist();
        Ok(record)
    }

    /// Aggregate counters: titles, copies, active loans, overdue loans.
    ///
    /// A loan is overdue when its due date is strictly before today.
    pub fn report(&self) -> LibraryReport {
        let today = self.today();
        LibraryReport {
            unique_titles: self.books.len(),
            total_copies: self.books.iter().map(|b| b.copies).sum(),
            active_loans: self.loans.len(),
            overdue: self.loans.iter().filter(|r| r.due_date < today).count(),
        }
    }

    /// Full catalogue with computed availability, insertion order.
    pub fn list_all_books(&self) -> Vec<BookStatus> {
        self.books.iter().map(|book| self.status_of(book)).collect()
    }

    /// Catalogue entries with at least one copy free to borrow.
    pub fn list_available_books(&self) -> Vec<BookStatus> {
        self.list_all_books()
            .into_iter()
            .filter(|status| status.available > 0)
            .collect()
    }

    /// Active loans held by one user, creation order.
    pub fn loans_for_user(&self, user_id: &UserId) -> Vec<LoanRecord> {
        self.loans
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Every user holding at least one loan, with their loans.
    ///
    /// Users appear in the order their first loan was created.
    pub fn active_borrowers(&self) -> Vec<(UserId, Vec<LoanRecord>)> {
        let mut order: Vec<UserId> = Vec::new();
        for record in &self.loans {
            if !order.contains(&record.user_id) {
                order.push(record.user_id.clone());
            }
        }
        order
            .into_iter()
            .map(|user_id| {
                let loans = self.loans_for_user(&user_id);
                (user_id, loans)
            })
            .collect()
    }

    /// Look up a catalogue entry by id.
    pub fn find_book(&self, book_id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == book_id)
    }

    /// Whether the catalogue holds an entry with this id.
    pub fn contains_book(&self, book_id: &BookId) -> bool {
        self.find_book(book_id).is_some()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// How many copies of one title are currently out.
    pub fn borrowed_count(&self, book_id: &BookId) -> u32 {
        let count = self.loans.iter().filter(|r| &r.book_id == book_id).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn available_of(&self, book: &Book) -> u32 {
        book.copies.saturating_sub(self.borrowed_count(&book.id))
    }

    fn status_of(&self, book: &Book) -> BookStatus {
        BookStatus {
            book: book.clone(),
            available: self.available_of(book),
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

fn seed_book(id: &str, title: &str, author: &str, copies: u32) -> Book {
    let id = match BookId::new(id) {
        Ok(value) => value,
        Err(err) => panic!("seed book id must be valid: {err}"),
    };
    Book {
        id,
        title: title.to_owned(),
        author: author.to_owned(),
        copies,
    }
}

/// The fixed sample catalogue used on first run.
fn seed_catalogue() -> Vec<Book> {
    vec![
        seed_book("1", "The Great Gatsby", "F. Scott Fitzgerald", 3),
        seed_book("2", "1984", "George Orwell", 5),
        seed_book("3", "Moby Dick", "Herman Melville", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockStateRepository, StateRepositoryError};
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(fixed_now);
        Arc::new(clock)
    }

    fn accepting_repo(load: Option<LibrarySnapshot>) -> MockStateRepository {
        let mut repo = MockStateRepository::new();
        repo.expect_load().times(1).return_once(move || Ok(load));
        repo.expect_save().returning(|_| Ok(()));
        repo
    }

    fn fresh_store() -> LibraryStore<MockStateRepository> {
        LibraryStore::open(accepting_repo(None), fixed_clock())
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).expect("valid user id")
    }

    #[rstest]
    fn seeds_sample_catalogue_when_no_document_exists() {
        let store = fresh_store();
        let report = store.report();
        assert_eq!(report.unique_titles, 3);
        assert_eq!(report.total_copies, 9);
        assert_eq!(report.active_loans, 0);
        assert_eq!(report.overdue, 0);
    }

    #[rstest]
    fn starts_empty_when_document_is_unreadable() {
        let mut repo = MockStateRepository::new();
        repo.expect_load().times(1).return_once(|| {
            Err(StateRepositoryError::Malformed {
                message: "not json".to_owned(),
            })
        });
        let store = LibraryStore::open(repo, fixed_clock());
        assert!(store.is_empty());
        assert_eq!(store.report().active_loans, 0);
    }

    #[rstest]
    fn add_book_rejects_zero_copies() {
        let mut store = fresh_store();
        assert_eq!(
            store.add_book("Dune", "Herbert", 0).expect_err("rejected"),
            LibraryError::ZeroCopies,
        );
        assert_eq!(store.report().unique_titles, 3);
    }

    #[rstest]
    fn add_book_appends_in_insertion_order() {
        let mut store = fresh_store();
        let dune = store.add_book("Dune", "Herbert", 2).expect("added");
        let all = store.list_all_books();
        assert_eq!(all.len(), 4);
        assert_eq!(all.last().map(|s| s.book.id.clone()), Some(dune.id));
    }

    #[rstest]
    fn borrowing_decrements_availability_by_one() {
        let mut store = fresh_store();
        let dune = store.add_book("Dune", "Herbert", 2).expect("added");
        store.borrow_book(&dune.id, &user("u1")).expect("borrowed");
        let status = store
            .search_books("dune")
            .into_iter()
            .next()
            .expect("found");
        assert_eq!(status.available, 1);
    }

    #[rstest]
    fn same_user_may_borrow_same_title_repeatedly_until_cap() {
        let mut store = fresh_store();
        let dune = store.add_book("Dune", "Herbert", 5).expect("added");
        let u1 = user("u1");
        for _ in 0..MAX_ACTIVE_LOANS {
            store.borrow_book(&dune.id, &u1).expect("under the cap");
        }
        assert_eq!(
            store.borrow_book(&dune.id, &u1).expect_err("capped"),
            LibraryError::BorrowLimitReached,
        );
        assert_eq!(store.loans_for_user(&u1).len(), MAX_ACTIVE_LOANS);
    }

    #[rstest]
    fn borrow_fails_for_unknown_book() {
        let mut store = fresh_store();
        let ghost = BookId::new("no-such-id").expect("valid id");
        assert_eq!(
            store.borrow_book(&ghost, &user("u1")).expect_err("unknown"),
            LibraryError::BookNotFound(ghost),
        );
    }

    #[rstest]
    fn borrow_fails_when_no_copies_available() {
        let mut store = fresh_store();
        let moby = BookId::new("3").expect("valid id");
        store.borrow_book(&moby, &user("u1")).expect("last copy");
        let err = store.borrow_book(&moby, &user("u2")).expect_err("empty");
        assert_eq!(
            err,
            LibraryError::NoCopiesAvailable {
                title: "Moby Dick".to_owned()
            },
        );
        assert_eq!(store.report().active_loans, 1);
    }

    #[rstest]
    fn borrow_sets_due_date_one_week_out() {
        let mut store = fresh_store();
        let record = store
            .borrow_book(&BookId::new("1").expect("valid id"), &user("u1"))
            .expect("borrowed");
        let expected = fixed_now().date_naive() + Days::new(LOAN_PERIOD_DAYS);
        assert_eq!(record.due_date, expected);
    }

    #[rstest]
    fn returning_removes_the_first_matching_record_only() {
        let mut store = fresh_store();
        let orwell = BookId::new("2").expect("valid id");
        let u1 = user("u1");
        store.borrow_book(&orwell, &u1).expect("first copy");
        store.borrow_book(&orwell, &u1).expect("second copy");
        store.return_book(&orwell, &u1).expect("returned one");
        assert_eq!(store.loans_for_user(&u1).len(), 1);
        assert_eq!(store.borrowed_count(&orwell), 1);
    }

    #[rstest]
    fn return_without_matching_loan_is_reported() {
        let mut store = fresh_store();
        let gatsby = BookId::new("1").expect("valid id");
        assert_eq!(
            store.return_book(&gatsby, &user("u1")).expect_err("no loan"),
            LibraryError::LoanNotFound { book_id: gatsby },
        );
    }

    #[rstest]
    fn delete_fails_while_copies_are_out() {
        let mut store = fresh_store();
        let gatsby = BookId::new("1").expect("valid id");
        store.borrow_book(&gatsby, &user("u1")).expect("borrowed");
        assert_eq!(
            store.delete_book(&gatsby).expect_err("blocked"),
            LibraryError::ActiveLoansExist {
                title: "The Great Gatsby".to_owned()
            },
        );
        assert_eq!(store.report().unique_titles, 3);
    }

    #[rstest]
    fn delete_removes_a_loan_free_book() {
        let mut store = fresh_store();
        let moby = BookId::new("3").expect("valid id");
        let removed = store.delete_book(&moby).expect("deleted");
        assert_eq!(removed.title, "Moby Dick");
        assert!(!store.contains_book(&moby));
        assert_eq!(store.report().unique_titles, 2);
    }

    #[rstest]
    fn delete_fails_for_unknown_id() {
        let mut store = fresh_store();
        let ghost = BookId::new("404").expect("valid id");
        assert_eq!(
            store.delete_book(&ghost).expect_err("unknown"),
            LibraryError::BookNotFound(ghost),
        );
    }

    #[rstest]
    #[case("gatsby", &["The Great Gatsby"])]
    #[case("ORWELL", &["1984"])]
    #[case("he", &["The Great Gatsby", "Moby Dick"])]
    #[case("zzz", &[])]
    fn search_matches_title_or_author_case_insensitively(
        #[case] query: &str,
        #[case] expected: &[&str],
    ) {
        let store = fresh_store();
        let titles: Vec<String> = store
            .search_books(query)
            .into_iter()
            .map(|s| s.book.title)
            .collect();
        assert_eq!(titles, expected);
    }

    #[rstest]
    fn available_listing_hides_exhausted_titles() {
        let mut store = fresh_store();
        let moby = BookId::new("3").expect("valid id");
        store.borrow_book(&moby, &user("u1")).expect("last copy");
        let available: Vec<String> = store
            .list_available_books()
            .into_iter()
            .map(|s| s.book.title)
            .collect();
        assert_eq!(available, ["The Great Gatsby", "1984"]);
    }

    #[rstest]
    fn overdue_counts_strictly_before_today() {
        let today = fixed_now().date_naive();
        let snapshot = LibrarySnapshot {
            books: seed_catalogue(),
            borrowed_records: vec![
                LoanRecord {
                    user_id: user("u1"),
                    book_id: BookId::new("1").expect("valid id"),
                    due_date: today - Days::new(1),
                },
                LoanRecord {
                    user_id: user("u2"),
                    book_id: BookId::new("2").expect("valid id"),
                    due_date: today,
                },
            ],
        };
        let store = LibraryStore::open(accepting_repo(Some(snapshot)), fixed_clock());
        let report = store.report();
        assert_eq!(report.active_loans, 2);
        assert_eq!(report.overdue, 1);
    }

    #[rstest]
    fn active_borrowers_group_in_first_loan_order() {
        let mut store = fresh_store();
        let orwell = BookId::new("2").expect("valid id");
        let (u1, u2) = (user("u1"), user("u2"));
        store.borrow_book(&orwell, &u2).expect("borrowed");
        store.borrow_book(&orwell, &u1).expect("borrowed");
        store.borrow_book(&orwell, &u2).expect("borrowed");
        let borrowers = store.active_borrowers();
        let ids: Vec<&UserId> = borrowers.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, [&u2, &u1]);
        assert_eq!(borrowers.first().map(|(_, l)| l.len()), Some(2));
    }

    #[rstest]
    fn borrowed_count_never_exceeds_copies() {
        let mut store = fresh_store();
        let moby = BookId::new("3").expect("valid id");
        store.borrow_book(&moby, &user("u1")).expect("last copy");
        let _ = store.borrow_book(&moby, &user("u2"));
        let _ = store.borrow_book(&moby, &user("u3"));
        let copies = store.find_book(&moby).map(|b| b.copies).expect("present");
        assert!(store.borrowed_count(&moby) <= copies);
    }

    #[rstest]
    fn persistence_failure_keeps_in_memory_state() {
        let mut repo = MockStateRepository::new();
        repo.expect_load().times(1).return_once(|| Ok(None));
        repo.expect_save().returning(|_| {
            Err(StateRepositoryError::Write {
                message: "disk full".to_owned(),
            })
        });
        let mut store = LibraryStore::open(repo, fixed_clock());
        let dune = store.add_book("Dune", "Herbert", 2).expect("added anyway");
        assert!(store.contains_book(&dune.id));
    }

    #[rstest]
    fn mutations_push_a_snapshot_through_the_port() {
        let mut repo = MockStateRepository::new();
        repo.expect_load().times(1).return_once(|| Ok(None));
        repo.expect_save()
            .withf(|snapshot: &LibrarySnapshot| snapshot.books.len() == 4)
            .times(1)
            .returning(|_| Ok(()));
        let mut store = LibraryStore::open(repo, fixed_clock());
        store.add_book("Dune", "Herbert", 2).expect("added");
    }
}
