use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use tienda_core::error::{Result, TiendaError};
use tienda_core::model::{
    Category, CategoryField, CategoryId, NewCategory, NewProduct, NewUser, Product, ProductField,
    ProductId, Role, RoleId, User, UserId,
};
use tienda_core::policy::SearchQuery;

use super::CatalogStore;

/// In-process store. Uniqueness is enforced through the `DashMap` entry API,
/// so concurrent find-or-create calls on one role name yield one role.
#[derive(Default)]
pub struct MemoryStore {
    seq: Sequences,
    roles: DashMap<String, Role>,
    users: DashMap<String, User>,
    products: DashMap<ProductId, Product>,
    categories: DashMap<String, Category>,
}

#[derive(Default)]
struct Sequences {
    role: AtomicU64,
    user: AtomicU64,
    product: AtomicU64,
    category: AtomicU64,
}

fn next(seq: &AtomicU64) -> u64 {
    seq.fetch_add(1, Ordering::Relaxed) + 1
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_or_create_role(&self, name: &str) -> Result<Role> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TiendaError::BadRequest("role name must not be empty".into()));
        }
        let role = self
            .roles
            .entry(name.to_string())
            .or_insert_with(|| Role {
                id: RoleId(next(&self.seq.role)),
                name: name.to_string(),
            })
            .value()
            .clone();
        Ok(role)
    }

    async fn role(&self, id: RoleId) -> Result<Option<Role>> {
        Ok(self
            .roles
            .iter()
            .find(|r| r.value().id == id)
            .map(|r| r.value().clone()))
    }

    async fn create_user(&self, new: NewUser) -> Result<User> {
        if self.role(new.role_id).await?.is_none() {
            return Err(TiendaError::NotFound(format!("role {}", new.role_id.0)));
        }
        let user = new.into_user(UserId(next(&self.seq.user)))?;
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                Err(TiendaError::Conflict(format!("email taken: {}", user.email)))
            }
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let key = email.trim().to_ascii_lowercase();
        Ok(self.users.get(&key).map(|u| u.value().clone()))
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let product = new.into_product(ProductId(next(&self.seq.product)), Utc::now())?;
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn products(&self, limit: usize) -> Result<Vec<Product>> {
        let mut all: Vec<Product> = self.products.iter().map(|p| p.value().clone()).collect();
        all.sort_by_key(|p| p.id);
        all.truncate(limit);
        Ok(all)
    }

    async fn search_products(
        &self,
        query: &SearchQuery<ProductField>,
        limit: usize,
    ) -> Result<Vec<Product>> {
        let all = self.products(usize::MAX).await?;
        Ok(query.run(&all).into_iter().take(limit).cloned().collect())
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category> {
        let category = new.into_category(CategoryId(next(&self.seq.category)))?;
        match self.categories.entry(category.name.to_lowercase()) {
            Entry::Occupied(_) => Err(TiendaError::Conflict(format!(
                "category exists: {}",
                category.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(category.clone());
                Ok(category)
            }
        }
    }

    async fn search_categories(&self, query: &SearchQuery<CategoryField>) -> Result<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.iter().map(|c| c.value().clone()).collect();
        all.sort_by_key(|c| c.id);
        Ok(query.run(&all).into_iter().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tienda_core::model::Credential;
    use tienda_core::policy::DisallowedMode;

    use super::*;

    fn new_user(email: &str, role_id: RoleId) -> NewUser {
        NewUser {
            email: email.into(),
            credential: Credential::new("password"),
            role_id,
        }
    }

    #[tokio::test]
    async fn find_or_create_role_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.find_or_create_role("Administrador").await.unwrap();
        let b = store.find_or_create_role(" Administrador ").await.unwrap();
        let c = store.find_or_create_role("Customer").await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a.id, c.id);
        assert_eq!(store.role(c.id).await.unwrap(), Some(c));
    }

    #[tokio::test]
    async fn concurrent_find_or_create_yields_one_role() {
        let store = Arc::new(MemoryStore::new());
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let s = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                s.find_or_create_role("Customer").await.unwrap().id
            }));
        }
        let mut ids = Vec::new();
        for t in tasks {
            ids.push(t.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn user_requires_existing_role() {
        let store = MemoryStore::new();
        let err = store.create_user(new_user("a@b.c", RoleId(99))).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let role = store.find_or_create_role("Customer").await.unwrap();
        store.create_user(new_user("c@example.com", role.id)).await.unwrap();
        let err = store.create_user(new_user("C@Example.com", role.id)).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "CONFLICT");
        assert!(store.user_by_email("c@EXAMPLE.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn search_respects_limit_and_order() {
        let store = MemoryStore::new();
        for (name, stock) in [("Laptop", 10), ("Tablet", 0), ("Laptop Pro", 3)] {
            store
                .create_product(NewProduct {
                    name: name.into(),
                    description: String::new(),
                    price: Decimal::from(100),
                    stock,
                })
                .await
                .unwrap();
        }
        let q = SearchQuery::compile([("name_cont", "laptop")], DisallowedMode::Reject).unwrap();
        let hits = store.search_products(&q, 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Laptop");
    }

    #[tokio::test]
    async fn category_names_unique_ignoring_case() {
        let store = MemoryStore::new();
        store.create_category(NewCategory { name: "Portátiles".into() }).await.unwrap();
        let err = store
            .create_category(NewCategory { name: "portátiles".into() })
            .await
            .unwrap_err();
        assert_eq!(err.client_code().as_str(), "CONFLICT");
    }
}
