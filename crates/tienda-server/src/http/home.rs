use axum::extract::State;
use axum::Json;

use tienda_core::policy::{Affordances, SearchQuery};

use crate::app_state::AppState;
use crate::context::Viewer;
use crate::http::views::{cards, HomeView, SearchForm, SECTIONS, WELCOME_TITLE};
use crate::http::ApiError;

/// `GET /`: welcome banner, role-gated management controls, product cards.
pub async fn home(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<HomeView>, ApiError> {
    let store = state.store();
    let products = store.products(state.cfg().search.max_results).await?;
    let categories = store.search_categories(&SearchQuery::default()).await?;

    Ok(Json(HomeView {
        title: WELCOME_TITLE,
        sections: SECTIONS,
        signed_in_as: viewer.email().map(str::to_string),
        affordances: Affordances::for_role(viewer.role()),
        search: SearchForm::default(),
        products: cards(&products),
        categories,
    }))
}
