//! View models consumed by the storefront templates.

use rust_decimal::Decimal;
use serde::Serialize;

use tienda_core::model::{Category, Product, ProductId};
use tienda_core::policy::{Affordances, DisplayState};

pub const WELCOME_TITLE: &str = "BIENVENIDO A NUESTRA TIENDA";
pub const SECTIONS: [&str; 2] = ["Productos", "Categorías"];

/// One product card. `add_to_cart_enabled` always equals `state.can_add_to_cart()`.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub state: DisplayState,
    pub state_label: &'static str,
    pub add_to_cart_enabled: bool,
}

impl From<&Product> for ProductCard {
    fn from(p: &Product) -> Self {
        let state = p.display_state();
        Self {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            stock: p.stock,
            state,
            state_label: state.label(),
            add_to_cart_enabled: state.can_add_to_cart(),
        }
    }
}

pub fn cards(products: &[Product]) -> Vec<ProductCard> {
    products.iter().map(ProductCard::from).collect()
}

/// The home page search form.
#[derive(Debug, Serialize)]
pub struct SearchForm {
    pub label: &'static str,
    pub action: &'static str,
    pub param: &'static str,
    pub submit: &'static str,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            label: "Buscar productos",
            action: "/search",
            param: "q",
            submit: "Buscar",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub sections: [&'static str; 2],
    pub signed_in_as: Option<String>,
    pub affordances: Affordances,
    pub search: SearchForm,
    pub products: Vec<ProductCard>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub products: Vec<ProductCard>,
    /// Filter keys skipped because they are not searchable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}
