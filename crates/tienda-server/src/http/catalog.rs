//! Product and category endpoints.
//!
//! Every filter goes through `SearchQuery::compile`, so only allowlisted
//! fields reach the store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use tienda_core::error::Result;
use tienda_core::model::{Category, CategoryField, NewCategory, NewProduct, ProductField};
use tienda_core::policy::{ensure_capability, Capability, DisallowedMode, SearchQuery};

use crate::app_state::AppState;
use crate::context::Viewer;
use crate::http::views::{cards, ProductCard, SearchResults};
use crate::http::{ApiError, ApiJson, ApiQuery};

/// Filter key the home search box maps to.
pub const TERM_KEY: &str = "name_or_description_cont";

#[derive(Debug, Deserialize)]
pub struct TermParams {
    #[serde(default)]
    pub q: String,
}

/// `GET /search?q=...`: the home page search form.
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TermParams>,
) -> std::result::Result<Json<SearchResults>, ApiError> {
    // TERM_KEY is allowlisted, so strict mode can only fail on a bad value.
    let term = [(TERM_KEY, params.q.as_str())];
    let query = SearchQuery::<ProductField>::compile(term, DisallowedMode::Reject)?;
    let hits = state
        .store()
        .search_products(&query, state.cfg().search.max_results)
        .await?;

    Ok(Json(SearchResults {
        products: cards(&hits),
        dropped: Vec::new(),
    }))
}

/// `GET /products?name_cont=...&price_lteq=...&s=price+desc`
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<Vec<(String, String)>>,
) -> std::result::Result<Json<SearchResults>, ApiError> {
    let query = SearchQuery::<ProductField>::compile(params, state.search_mode())?;
    let hits = state
        .store()
        .search_products(&query, state.cfg().search.max_results)
        .await?;

    Ok(Json(SearchResults {
        products: cards(&hits),
        dropped: query.dropped().to_vec(),
    }))
}

/// `POST /products` (administrators only).
pub async fn create_product(
    State(state): State<AppState>,
    viewer: Viewer,
    ApiJson(body): ApiJson<NewProduct>,
) -> std::result::Result<(StatusCode, Json<ProductCard>), ApiError> {
    authorize_manage(&viewer)?;
    let product = state.store().create_product(body).await?;
    tracing::info!(product_id = product.id.0, by = ?viewer.email(), "product created");
    Ok((StatusCode::CREATED, Json(ProductCard::from(&product))))
}

/// `GET /categories?name_cont=...`
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<Vec<(String, String)>>,
) -> std::result::Result<Json<Vec<Category>>, ApiError> {
    let query = SearchQuery::<CategoryField>::compile(params, state.search_mode())?;
    Ok(Json(state.store().search_categories(&query).await?))
}

/// `POST /categories` (administrators only).
pub async fn create_category(
    State(state): State<AppState>,
    viewer: Viewer,
    ApiJson(body): ApiJson<NewCategory>,
) -> std::result::Result<(StatusCode, Json<Category>), ApiError> {
    authorize_manage(&viewer)?;
    let category = state.store().create_category(body).await?;
    tracing::info!(category_id = category.id.0, by = ?viewer.email(), "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

fn authorize_manage(viewer: &Viewer) -> Result<()> {
    viewer.require_user()?;
    ensure_capability(viewer.role(), Capability::ManageCatalog)
}
