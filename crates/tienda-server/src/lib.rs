//! Tienda server library entry.
//!
//! This crate wires config, the catalog store, viewer resolution, and the
//! JSON handlers into an axum router. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod http;
pub mod ops;
pub mod router;
pub mod store;
