//! Tienda core: storefront domain model, error types, and catalog policies.
//!
//! This crate defines the records shared by the server and its tests, plus the
//! three decision functions the presentation layer consumes: who may manage
//! the catalog, which product attributes untrusted search input may filter on,
//! and how stock maps to a product card's availability. It carries no HTTP or
//! runtime dependencies.
//!
//! # Panics
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `TiendaError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod policy;

/// Shared result type.
pub use error::{Result, TiendaError};
