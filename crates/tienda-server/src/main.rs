//! Tienda storefront server.
//!
//! - Config: `TIENDA_CONFIG` (default `tienda.yaml`), strict parsing + validate
//! - Seeds an in-memory catalog from the config
//! - Serves the JSON storefront routes from `router::build_router`

use tracing_subscriber::{fmt, EnvFilter};

use tienda_core::error::{Result, TiendaError};
use tienda_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "tienda-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("TIENDA_CONFIG").unwrap_or_else(|_| "tienda.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg).await?;
    let app = router::build_router(state);

    tracing::info!(%listen, "tienda-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TiendaError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| TiendaError::Internal(format!("server failed: {e}")))
}
