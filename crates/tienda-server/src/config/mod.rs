//! Storefront config loader (strict parsing).

pub mod schema;

use std::fs;

use tienda_core::error::{Result, TiendaError};

pub use schema::{SearchSection, SeedSection, SeedUser, ServerSection, TiendaConfig};

pub fn load_from_file(path: &str) -> Result<TiendaConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TiendaError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<TiendaConfig> {
    let cfg: TiendaConfig = serde_yaml::from_str(s)
        .map_err(|e| TiendaError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
