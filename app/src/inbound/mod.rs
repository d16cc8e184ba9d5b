//! Inbound console adapter translating menu input into domain calls.
//!
//! Keeps terminal details at the edge: [`console`] owns prompting,
//! [`views`] owns table layout, and [`session`] walks the role-gated menu
//! tree. No business logic lives here.

pub mod console;
pub mod session;
pub mod views;

pub use self::session::SessionController;
