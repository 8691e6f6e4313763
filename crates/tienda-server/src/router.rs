//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, http, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::home::home))
        .route("/search", get(http::catalog::search))
        .route(
            "/products",
            get(http::catalog::list_products).post(http::catalog::create_product),
        )
        .route(
            "/categories",
            get(http::catalog::list_categories).post(http::catalog::create_category),
        )
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
