//! Shared application state for the Tienda server.
//!
//! Holds the validated config and the catalog store, and seeds the store from
//! `seed:` at startup. Startup errors are returned, never panicked.

use std::sync::Arc;

use tienda_core::error::Result;
use tienda_core::model::{NewCategory, NewUser, RoleKind};
use tienda_core::policy::DisallowedMode;

use crate::config::TiendaConfig;
use crate::store::{CatalogStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: TiendaConfig,
    store: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Build state over a fresh in-memory store.
    pub async fn new(cfg: TiendaConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(MemoryStore::new())).await
    }

    pub async fn with_store(cfg: TiendaConfig, store: Arc<dyn CatalogStore>) -> Result<Self> {
        seed(&cfg, store.as_ref()).await?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, store }),
        })
    }

    pub fn cfg(&self) -> &TiendaConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<dyn CatalogStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn search_mode(&self) -> DisallowedMode {
        self.inner.cfg.search.on_disallowed_field
    }
}

async fn seed(cfg: &TiendaConfig, store: &dyn CatalogStore) -> Result<()> {
    let seed = &cfg.seed;

    let user_roles = seed.users.iter().map(|u| u.role.as_str());
    for name in seed.roles.iter().map(String::as_str).chain(user_roles) {
        let role = store.find_or_create_role(name).await?;
        if let RoleKind::Other(_) = role.kind() {
            tracing::warn!(role = %role.name, "seeded role grants no capabilities");
        }
    }

    for u in &seed.users {
        let role = store.find_or_create_role(&u.role).await?;
        store
            .create_user(NewUser {
                email: u.email.clone(),
                credential: u.password.clone(),
                role_id: role.id,
            })
            .await?;
    }

    for name in &seed.categories {
        store.create_category(NewCategory { name: name.clone() }).await?;
    }

    for p in &seed.products {
        store.create_product(p.clone()).await?;
    }

    tracing::info!(
        roles = seed.roles.len(),
        users = seed.users.len(),
        categories = seed.categories.len(),
        products = seed.products.len(),
        "store seeded"
    );
    Ok(())
}
