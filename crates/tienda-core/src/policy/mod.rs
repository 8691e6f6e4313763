//! Catalog policies (authorization, search allowlist, stock state).
//!
//! All three are pure functions over already-loaded records. They hold no
//! state and are safe to call from any number of request handlers at once.

pub mod authz;
pub mod search;
pub mod stock;

pub use authz::{can_manage_catalog, ensure_capability, Affordances, Capability};
pub use search::{allowed_search_fields, DisallowedMode, SearchQuery, Searchable};
pub use stock::DisplayState;
