//! Request context types shared across handlers.
//!
//! The session layer lives outside this crate; handlers only need to know who
//! is asking and which role they hold.

pub mod viewer;

pub use viewer::{Viewer, USER_HEADER};
