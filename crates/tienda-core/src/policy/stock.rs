//! Stock-gated product card state.

use serde::Serialize;

/// Availability shown on a product card. Two states, no thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Available,
    OutOfStock,
}

impl DisplayState {
    pub fn from_stock(stock: u32) -> Self {
        if stock == 0 {
            DisplayState::OutOfStock
        } else {
            DisplayState::Available
        }
    }

    /// Whether the add-to-cart control is enabled.
    pub fn can_add_to_cart(self) -> bool {
        matches!(self, DisplayState::Available)
    }

    /// Storefront label.
    pub fn label(self) -> &'static str {
        match self {
            DisplayState::Available => "Disponible",
            DisplayState::OutOfStock => "Producto Agotado",
        }
    }
}
