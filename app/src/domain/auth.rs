//! In-memory account directory and session context.
//!
//! Accounts are process-wide and never persisted; every restart begins with
//! just the two seeded defaults. The logged-in user travels as an explicit
//! [`Session`] value handed to whichever menu needs it, rather than ambient
//! shared state.

use super::error::AuthError;
use super::user::{Role, User, UserId, Username};

/// The registered account list, seeded with the two default logins.
#[derive(Debug, Clone)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    /// Build a directory holding the two seeded accounts:
    /// `admin`/`123` (staff) and `jane_doe`/`456` (customer).
    pub fn with_default_accounts() -> Self {
        Self {
            users: vec![
                seed_user("admin", "123", Role::Staff),
                seed_user("jane_doe", "456", Role::Customer),
            ],
        }
    }

    /// Look up an account by exact username.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username().as_str() == username)
    }

    /// Register a new account, failing if the username is taken.
    pub fn register(
        &mut self,
        username: Username,
        password: impl Into<String>,
        role: Role,
    ) -> Result<User, AuthError> {
        if self.find_by_username(username.as_str()).is_some() {
            return Err(AuthError::UsernameTaken {
                username: username.to_string(),
            });
        }
        let user = User::new(UserId::random(), username, password, role);
        self.users.push(user.clone());
        Ok(user)
    }

    /// Authenticate a username/password pair for the given role.
    ///
    /// Unknown users, wrong passwords, and role mismatches all collapse
    /// into [`AuthError::InvalidCredentials`]; callers learn nothing about
    /// which check failed.
    pub fn login(&self, username: &str, password: &str, role: Role) -> Result<User, AuthError> {
        self.find_by_username(username)
            .filter(|u| u.password_matches(password) && u.role() == role)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }

    /// All customer accounts, registration order.
    pub fn customers(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.role() == Role::Customer)
            .collect()
    }
}

/// Explicit session context for a logged-in user.
///
/// Created on successful login or registration and dropped on logout.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    /// Open a session for an authenticated user.
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// The logged-in account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Shorthand for the logged-in account id.
    pub fn user_id(&self) -> &UserId {
        self.user.id()
    }
}

fn seed_user(username: &str, password: &str, role: Role) -> User {
    let username = match Username::new(username) {
        Ok(value) => value,
        Err(err) => panic!("seed username must be valid: {err}"),
    };
    User::new(UserId::random(), username, password, role)
}
