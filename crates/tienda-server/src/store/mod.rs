//! Persistence seam for the catalog.
//!
//! Search goes through [`CatalogStore::search_products`], which only accepts a
//! compiled [`SearchQuery`]. Raw request keys never reach a store.

pub mod memory;

use async_trait::async_trait;

use tienda_core::error::Result;
use tienda_core::model::{
    Category, CategoryField, NewCategory, NewProduct, NewUser, Product, ProductField, Role, RoleId,
    User,
};
use tienda_core::policy::SearchQuery;

pub use memory::MemoryStore;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Look a role up by exact (trimmed) name, creating it if absent.
    async fn find_or_create_role(&self, name: &str) -> Result<Role>;

    async fn role(&self, id: RoleId) -> Result<Option<Role>>;

    /// Fails with `NotFound` if the role does not exist, `Conflict` on a taken email.
    async fn create_user(&self, new: NewUser) -> Result<User>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn create_product(&self, new: NewProduct) -> Result<Product>;

    /// All products in creation order, capped at `limit`.
    async fn products(&self, limit: usize) -> Result<Vec<Product>>;

    async fn search_products(
        &self,
        query: &SearchQuery<ProductField>,
        limit: usize,
    ) -> Result<Vec<Product>>;

    /// Fails with `Conflict` if a category with the same name (ignoring case) exists.
    async fn create_category(&self, new: NewCategory) -> Result<Category>;

    async fn search_categories(&self, query: &SearchQuery<CategoryField>) -> Result<Vec<Category>>;
}
