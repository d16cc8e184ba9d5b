//! Library lending desk: domain services, JSON persistence, console menus.
//!
//! The crate is laid out hexagonally: [`domain`] owns every lending
//! decision, [`outbound`] adapts the persistence port to a JSON document on
//! disk, and [`inbound`] adapts the console menus to domain calls.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
