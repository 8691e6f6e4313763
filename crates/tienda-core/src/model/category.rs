use serde::{Deserialize, Serialize};

use crate::error::{Result, TiendaError};
use crate::policy::search::{FieldKind, FieldValue, SearchField, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn into_category(self, id: CategoryId) -> Result<Category> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(TiendaError::BadRequest("category name must not be empty".into()));
        }
        Ok(Category { id, name })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Name,
}

impl SearchField for CategoryField {
    const FIELDS: &'static [Self] = &[CategoryField::Name];

    fn name(&self) -> &'static str {
        match self {
            CategoryField::Name => "name",
        }
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }
}

impl Searchable for Category {
    type Field = CategoryField;
    const RESOURCE: &'static str = "category";

    fn field_value(&self, field: CategoryField) -> FieldValue<'_> {
        match field {
            CategoryField::Name => FieldValue::Text(&self.name),
        }
    }
}
