//! Storefront records: roles, users, products, categories.
//!
//! Records are plain data. Validation happens when a `New*` request is turned
//! into a stored record, so a `Product` or `User` in hand always satisfies
//! its invariants.

pub mod category;
pub mod product;
pub mod role;
pub mod user;

pub use category::{Category, CategoryField, CategoryId, NewCategory};
pub use product::{NewProduct, Product, ProductField, ProductId};
pub use role::{Role, RoleId, RoleKind};
pub use user::{Credential, NewUser, User, UserId};
