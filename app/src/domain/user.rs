//! User accounts and roles.
//!
//! Accounts live in process memory only; nothing here is persisted with the
//! library state, so registered users vanish on restart apart from the two
//! seeded defaults in [`crate::domain::auth::Directory`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors returned by the user newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier carries leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    IdSurroundingWhitespace,
    /// Username is empty after trimming whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Opaque account identifier.
///
/// Registered accounts receive a random UUID string; loan records loaded
/// from disk may carry ids minted by earlier processes, so any non-empty
/// trimmed string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = id.into();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::IdSurroundingWhitespace);
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

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = name.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(raw))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access role gating the console menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Manages the catalogue and views lending reports.
    Staff,
    /// Borrows and returns books.
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staff => f.write_str("staff"),
            Self::Customer => f.write_str("customer"),
        }
    }
}

/// A registered account.
///
/// Passwords are stored and compared in plaintext, as the interactive
/// simulation this models does; there is no credential hardening in scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password: String,
    role: Role,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username, password: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username,
            password: password.into(),
            role,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Access role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Compare a candidate password against the stored one.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
