//! Role-gated menu tree driving the lending store.
//!
//! The controller is deliberately thin: it renders menus, collects input,
//! and relays typed domain results back as console messages. Every business
//! decision stays in [`LibraryStore`] and [`Directory`]. An aborted prompt
//! (end of input) backs out of the current menu after persisting, and every
//! exit path persists before terminating.

use crate::domain::{
    BookId, Directory, LibraryStore, Role, Session, StateRepository, Username,
};

use super::console;
use super::views::{self, LoanLine};

/// Outcome of one menu layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Return to the enclosing menu.
    Continue,
    /// Tear the whole application down.
    Exit,
}

/// Drives the console menus over the store and account directory.
pub struct SessionController<S> {
    store: LibraryStore<S>,
    directory: Directory,
}

impl<S: StateRepository> SessionController<S> {
    /// Wire a controller over an opened store and directory.
    pub fn new(store: LibraryStore<S>, directory: Directory) -> Self {
        Self { store, directory }
    }

    /// Run the role-selection loop until the user exits.
    pub fn run(&mut self) {
        loop {
            println!("\n\n=============== LIBRARY MANAGEMENT SYSTEM ===============");
            println!("Please identify your role:");
            println!("1. Staff Member");
            println!("2. Customer");
            println!("3. Exit Application");
            println!("=======================================================");

            let Some(choice) = console::prompt("Enter choice: ") else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.access_menu(Role::Staff),
                "2" => self.access_menu(Role::Customer),
                "3" => break,
                _ => {
                    println!("\n[ERROR] Invalid choice. Please select 1, 2, or 3.");
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        self.store.persist();
        println!("\nExiting application. Goodbye!");
    }

    /// Login-or-register sub-menu for one role.
    fn access_menu(&mut self, role: Role) -> Flow {
        let heading = match role {
            Role::Staff => "STAFF ACCESS",
            Role::Customer => "CUSTOMER ACCESS",
        };
        let title = role_title(role);
        println!("\n--- {heading} ---");
        println!("1. Returning {title} (Login)");
        println!("2. New {title} (Register)");
        println!("3. Back to Main Menu");

        let Some(choice) = console::prompt("Enter choice: ") else {
            return Flow::Continue;
        };
        let session = match choice.as_str() {
            "1" => self.login_dialog(role),
            "2" => self.register_dialog(role),
            "3" => None,
            _ => {
                println!("\n[ERROR] Invalid choice. Please select 1, 2, or 3.");
                None
            }
        };
        match session {
            Some(session) if role == Role::Staff => self.staff_menu(&session),
            Some(session) => self.customer_menu(&session),
            None => Flow::Continue,
        }
    }

    fn login_dialog(&self, role: Role) -> Option<Session> {
        println!("\n--- {} LOGIN ---", role_heading(role));
        let username = console::prompt("Enter Username: ")?;
        let password = console::prompt("Enter Password: ")?;
        match self.directory.login(&username, &password, role) {
            Ok(user) => {
                println!("\n[SUCCESS] Welcome back, {username}!");
                Some(Session::new(user))
            }
            Err(err) => {
                println!("\n[ERROR] {err}.");
                None
            }
        }
    }

    fn register_dialog(&mut self, role: Role) -> Option<Session> {
        println!("\n--- {} REGISTRATION ---", role_heading(role));
        let username = loop {
            let raw = console::prompt("Enter New Username: ")?;
            match Username::new(raw) {
                Ok(name) if self.directory.find_by_username(name.as_str()).is_none() => break name,
                Ok(_) => println!("[ERROR] Username already exists. Try again."),
                Err(err) => println!("[ERROR] {err}."),
            }
        };
        let password = console::prompt("Create Password: ")?;
        match self.directory.register(username, password, role) {
            Ok(user) => {
                println!(
                    "\n[SUCCESS] {} {} registered and logged in successfully!",
                    role_title(role),
                    user.username()
                );
                Some(Session::new(user))
            }
            Err(err) => {
                println!("\n[ERROR] {err}.");
                None
            }
        }
    }

    fn staff_menu(&mut self, session: &Session) -> Flow {
        loop {
            println!("\n--- STAFF MAIN MENU ---");
            println!("Logged in as: {}", session.user().username());
            println!("1. Check Customer List & Borrowing Records");
            println!("2. Access Book Database (Add/Delete/Search)");
            println!("3. Generate Library Report");
            println!("4. Logout");
            println!("5. Exit Application");

            let Some(choice) = console::prompt("Enter choice: ") else {
                return self.logout();
            };
            match choice.as_str() {
                "1" => self.show_customers_with_loans(),
                "2" => {
                    if self.catalogue_menu() == Flow::Exit {
                        return Flow::Exit;
                    }
                }
                "3" => println!("\n{}", views::report_block(&self.store.report())),
                "4" => return self.logout(),
                "5" => {
                    self.store.persist();
                    return Flow::Exit;
                }
                _ => println!("[ERROR] Invalid choice. Please select 1-5."),
            }
        }
    }

    fn catalogue_menu(&mut self) -> Flow {
        loop {
            println!("\n--- BOOK MANAGEMENT MENU ---");
            println!("1. View Full Book Catalogue");
            println!("2. Add New Book");
            println!("3. Delete Book");
            println!("4. Search Books");
            println!("5. Return to Staff Menu");
            println!("6. Exit Application");

            let Some(choice) = console::prompt("Enter choice: ") else {
                return Flow::Continue;
            };
            match choice.as_str() {
                "1" => self.show_catalogue(),
                "2" => self.add_book_dialog(),
                "3" => self.delete_book_dialog(),
                "4" => self.search_dialog(),
                "5" => return Flow::Continue,
                "6" => {
                    self.store.persist();
                    return Flow::Exit;
                }
                _ => println!("[ERROR] Invalid choice. Please select 1-6."),
            }
        }
    }

    fn customer_menu(&mut self, session: &Session) -> Flow {
        loop {
            println!("\n--- CUSTOMER MAIN MENU ---");
            println!("Logged in as: {}", session.user().username());
            println!("1. View Available Books");
            println!("2. Borrow a Book");
            println!("3. View My Borrowed Books");
            println!("4. Return a Book");
            println!("5. Logout");
            println!("6. Exit Application");

            let Some(choice) = console::prompt("Enter choice: ") else {
                return self.logout();
            };
            match choice.as_str() {
                "1" => self.show_available(),
                "2" => self.borrow_dialog(session),
                "3" => self.show_my_books(session),
                "4" => self.return_dialog(session),
                "5" => return self.logout(),
                "6" => {
                    self.store.persist();
                    return Flow::Exit;
                }
                _ => println!("[ERROR] Invalid choice. Please select 1-6."),
            }
        }
    }

    fn logout(&self) -> Flow {
        self.store.persist();
        println!("\n[INFO] Logged out successfully.");
        Flow::Continue
    }

    fn show_catalogue(&self) {
        let rows = self.store.list_all_books();
        if rows.is_empty() {
            println!("\n[INFO] The main library catalogue is empty.");
            return;
        }
        println!("\n{}", views::catalogue_table(&rows));
    }

    fn show_available(&self) {
        let rows = self.store.list_available_books();
        if rows.is_empty() {
            println!("\n[INFO] No books are currently available to borrow.");
            return;
        }
        println!("\n{}", views::available_table(&rows));
    }

    fn show_customers_with_loans(&self) {
        let customers = self.directory.customers();
        if customers.is_empty() {
            println!("\n[INFO] No registered customers found.");
            return;
        }
        println!("\n--- REGISTERED CUSTOMERS AND BORROWED BOOKS ---");
        for customer in customers {
            println!("\nCustomer: {} (ID: {})", customer.username(), customer.id());
            let loans = self.store.loans_for_user(customer.id());
            if loans.is_empty() {
                println!("  - No books currently borrowed.");
            } else {
                println!("  - Currently Borrowing:");
                for record in loans {
                    println!(
                        "    -> '{}' (Due: {})",
                        self.title_of(&record.book_id),
                        record.due_date
                    );
                }
            }
        }
    }

    fn add_book_dialog(&mut self) {
        println!("\n--- ADD A NEW BOOK ---");
        let Some(title) = console::prompt("Enter Book Title: ") else {
            return;
        };
        let Some(author) = console::prompt("Enter Author Name: ") else {
            return;
        };
        let Some(copies) = console::prompt_positive("Enter Number of Copies to Add: ") else {
            return;
        };
        match self.store.add_book(title, author, copies) {
            Ok(book) => println!(
                "\n[SUCCESS] Book '{}' by {} added to the library.",
                book.title, book.author
            ),
            Err(err) => println!("[ERROR] {err}."),
        }
    }

    fn delete_book_dialog(&mut self) {
        self.show_catalogue();
        if self.store.is_empty() {
            return;
        }
        let Some(book_id) =
            self.prompt_known_book_id("\nEnter ID of the book to delete (or 'q' to cancel): ")
        else {
            return;
        };
        match self.store.delete_book(&book_id) {
            Ok(book) => {
                println!(
                    "\n[SUCCESS] Book '{}' has been permanently removed.",
                    book.title
                );
            }
            Err(err) => println!("[ERROR] {err}."),
        }
    }

    fn search_dialog(&self) {
        println!("\n--- BOOK SEARCH ---");
        let Some(query) = console::prompt("Enter Title or Author to search (or 'q' to cancel): ")
        else {
            return;
        };
        if query.eq_ignore_ascii_case("q") {
            return;
        }
        let rows = self.store.search_books(&query);
        if rows.is_empty() {
            println!("\n[INFO] No books found matching '{query}'.");
            return;
        }
        println!("\n{}", views::search_results_table(&query, &rows));
    }

    fn borrow_dialog(&mut self, session: &Session) {
        self.show_available();
        let Some(book_id) =
            self.prompt_known_book_id("\nEnter ID of the book to borrow (or 'q' to cancel): ")
        else {
            return;
        };
        match self.store.borrow_book(&book_id, session.user_id()) {
            Ok(record) => {
                println!(
                    "\n[SUCCESS] You have successfully borrowed '{}'.",
                    self.title_of(&record.book_id)
                );
                println!("Please return it by {}.", record.due_date);
            }
            Err(err) => println!("\n[ERROR] {err}."),
        }
    }

    fn show_my_books(&self, session: &Session) {
        let loans = self.store.loans_for_user(session.user_id());
        if loans.is_empty() {
            println!("\n[INFO] You currently have no books borrowed.");
            return;
        }
        let lines: Vec<LoanLine> = loans
            .into_iter()
            .map(|record| LoanLine {
                title: self.title_of(&record.book_id),
                book_id: record.book_id,
                due_date: record.due_date,
            })
            .collect();
        println!("\n{}", views::loans_table(&lines));
    }

    fn return_dialog(&mut self, session: &Session) {
        self.show_my_books(session);
        if self.store.loans_for_user(session.user_id()).is_empty() {
            return;
        }
        let Some(book_id) =
            self.prompt_known_book_id("\nEnter ID of the book to return (or 'q' to cancel): ")
        else {
            return;
        };
        match self.store.return_book(&book_id, session.user_id()) {
            Ok(record) => println!(
                "\n[SUCCESS] '{}' has been successfully returned. Thank you!",
                self.title_of(&record.book_id)
            ),
            Err(err) => println!("\n[ERROR] {err}."),
        }
    }

    /// Re-prompt until a catalogue id is entered; `None` on 'q' or aborted
    /// input.
    fn prompt_known_book_id(&self, label: &str) -> Option<BookId> {
        loop {
            let raw = console::prompt(label)?;
            if raw.eq_ignore_ascii_case("q") {
                return None;
            }
            if let Ok(book_id) = BookId::new(raw)
                && self.store.contains_book(&book_id)
            {
                return Some(book_id);
            }
            println!("[ERROR] Invalid Book ID. Please enter a valid ID or 'q'.");
        }
    }

    fn title_of(&self, book_id: &BookId) -> String {
        self.store
            .find_book(book_id)
            .map_or_else(|| format!("Unknown Book (ID: {book_id})"), |b| b.title.clone())
    }
}

fn role_heading(role: Role) -> &'static str {
    match role {
        Role::Staff => "STAFF",
        Role::Customer => "CUSTOMER",
    }
}

fn role_title(role: Role) -> &'static str {
    match role {
        Role::Staff => "Staff",
        Role::Customer => "Customer",
    }
}
