//! Fixed-width table rendering for the console menus.
//!
//! Pure string builders so the layouts stay testable without capturing
//! stdout. Column widths follow the original terminal layout: 10 for ids,
//! 40 for titles, 25 for authors.

use chrono::NaiveDate;

use crate::domain::{BookId, BookStatus, LibraryReport};

/// One row of the "my borrowed books" table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanLine {
    /// Borrowed book id.
    pub book_id: BookId,
    /// Resolved title, or a placeholder when the book left the catalogue.
    pub title: String,
    /// Due date for the copy.
    pub due_date: NaiveDate,
}

/// Full catalogue table with copy counts and availability.
pub fn catalogue_table(rows: &[BookStatus]) -> String {
    let mut lines = vec![
        "--- LIBRARY BOOK CATALOGUE ---".to_owned(),
        format!(
            "{:<10} | {:<40} | {:<25} | {:<8} | {:<10}",
            "ID", "Title", "Author", "Copies", "Available"
        ),
        "-".repeat(100),
    ];
    for row in rows {
        lines.push(format!(
            "{:<10} | {:<40} | {:<25} | {:<8} | {:<10}",
            row.book.id, row.book.title, row.book.author, row.book.copies, row.available
        ));
    }
    lines.push("-".repeat(100));
    lines.join("\n")
}

/// Search result table: no copy counts, availability only.
pub fn search_results_table(query: &str, rows: &[BookStatus]) -> String {
    let mut lines = vec![
        format!("--- SEARCH RESULTS for '{query}' ---"),
        format!(
            "{:<10} | {:<40} | {:<25} | {:<10}",
            "ID", "Title", "Author", "Available"
        ),
        "-".repeat(90),
    ];
    for row in rows {
        lines.push(format!(
            "{:<10} | {:<40} | {:<25} | {:<10}",
            row.book.id, row.book.title, row.book.author, row.available
        ));
    }
    lines.push("-".repeat(90));
    lines.join("\n")
}

/// Borrowable titles with their free copy counts.
pub fn available_table(rows: &[BookStatus]) -> String {
    let mut lines = vec![
        "--- BOOKS AVAILABLE TO BORROW ---".to_owned(),
        format!(
            "{:<10} | {:<40} | {:<25} | {:<18}",
            "ID", "Title", "Author", "Available Copies"
        ),
        "-".repeat(100),
    ];
    for row in rows {
        lines.push(format!(
            "{:<10} | {:<40} | {:<25} | {:<18}",
            row.book.id, row.book.title, row.book.author, row.available
        ));
    }
    lines.push("-".repeat(100));
    lines.join("\n")
}

/// A customer's active loans with due dates.
pub fn loans_table(rows: &[LoanLine]) -> String {
    let mut lines = vec![
        "--- YOUR BORROWED BOOKS ---".to_owned(),
        format!("{:<10} | {:<40} | {:<12}", "ID", "Title", "Due Date"),
        "-".repeat(65),
    ];
    for row in rows {
        lines.push(format!(
            "{:<10} | {:<40} | {:<12}",
            row.book_id, row.title, row.due_date
        ));
    }
    lines.push("-".repeat(65));
    lines.join("\n")
}

/// The staff report block.
pub fn report_block(report: &LibraryReport) -> String {
    [
        "--- LIBRARY REPORT ---".to_owned(),
        format!("Total Unique Book Titles: {}", report.unique_titles),
        format!("Total Physical Copies in Catalogue: {}", report.total_copies),
        format!("Total Books Currently Issued: {}", report.active_loans),
        format!("Total Overdue Books: {}", report.overdue),
        "-".repeat(30),
    ]
    .join("\n")
}
