use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TiendaError};
use crate::policy::search::{FieldKind, FieldValue, SearchField, Searchable};
use crate::policy::stock::DisplayState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

/// A catalog entry. `stock` is unsigned so "negative stock" cannot be stored.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    /// Audit timestamp. Deliberately absent from [`ProductField`].
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn display_state(&self) -> DisplayState {
        DisplayState::from_stock(self.stock)
    }
}

/// Product creation request (untrusted input).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Result<Product> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(TiendaError::BadRequest("product name must not be empty".into()));
        }
        if self.price < Decimal::ZERO {
            return Err(TiendaError::BadRequest(format!(
                "product price must be non-negative: {}",
                self.price
            )));
        }
        let stock = u32::try_from(self.stock).map_err(|_| {
            TiendaError::BadRequest(format!("product stock out of range: {}", self.stock))
        })?;

        Ok(Product {
            id,
            name,
            description: self.description,
            price: self.price,
            stock,
            created_at,
        })
    }
}

/// Product attributes open to untrusted search input.
///
/// Static on purpose: new `Product` columns stay unsearchable until listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Description,
    Price,
}

impl SearchField for ProductField {
    const FIELDS: &'static [Self] = &[
        ProductField::Name,
        ProductField::Description,
        ProductField::Price,
    ];

    fn name(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            ProductField::Name | ProductField::Description => FieldKind::Text,
            ProductField::Price => FieldKind::Decimal,
        }
    }
}

impl Searchable for Product {
    type Field = ProductField;
    const RESOURCE: &'static str = "product";

    fn field_value(&self, field: ProductField) -> FieldValue<'_> {
        match field {
            ProductField::Name => FieldValue::Text(&self.name),
            ProductField::Description => FieldValue::Text(&self.description),
            ProductField::Price => FieldValue::Decimal(self.price),
        }
    }
}
