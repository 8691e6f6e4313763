//! Top-level facade crate for Tienda.
//!
//! Re-exports the core policies and the server library so users can depend on a single crate.

pub mod core {
    pub use tienda_core::*;
}

pub mod server {
    pub use tienda_server::*;
}
