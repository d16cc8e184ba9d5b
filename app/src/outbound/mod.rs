//! Outbound adapters implementing domain ports.
//!
//! Thin translators between domain types and external representations; no
//! business logic. Persistence is a single JSON document on disk — see
//! [`json_store`].

pub mod json_store;

pub use self::json_store::JsonFileStore;
