use std::net::SocketAddr;

use serde::Deserialize;
use tienda_core::error::{Result, TiendaError};
use tienda_core::model::{Credential, NewProduct};
use tienda_core::policy::DisallowedMode;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiendaConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub search: SearchSection,

    #[serde(default)]
    pub seed: SeedSection,
}

impl TiendaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TiendaError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.search.validate()?;
        self.seed.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            TiendaError::BadRequest(format!(
                "server.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSection {
    #[serde(default)]
    pub on_disallowed_field: DisallowedMode,

    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            on_disallowed_field: DisallowedMode::default(),
            max_results: default_max_results(),
        }
    }
}

impl SearchSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1000).contains(&self.max_results) {
            return Err(TiendaError::BadRequest(
                "search.max_results must be between 1 and 1000".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_results() -> usize {
    100
}

/// Records loaded into the store at startup.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SeedSection {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub products: Vec<NewProduct>,
}

impl SeedSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(r) = self.roles.iter().find(|r| r.trim().is_empty()) {
            return Err(TiendaError::BadRequest(format!("seed.roles has a blank name: {r:?}")));
        }
        if let Some(u) = self.users.iter().find(|u| u.role.trim().is_empty()) {
            return Err(TiendaError::BadRequest(format!("seed user {} has no role", u.email)));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub email: String,
    pub password: Credential,
    /// Role name; found or created at seed time.
    pub role: String,
}
