use std::fmt;

use serde::{Deserialize, Serialize};

/// Role identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub u64);

/// Named permission group. Immutable once users reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

impl Role {
    /// Resolve this role's name to the closed set of known roles.
    pub fn kind(&self) -> RoleKind {
        RoleKind::from_name(&self.name)
    }
}

/// Known roles. Anything unrecognized lands in `Other` and is granted nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Administrator,
    Customer,
    Other(String),
}

impl RoleKind {
    /// Case-insensitive lookup on the trimmed name.
    ///
    /// "Administrador" is the name the storefront seeds; "Administrator" is
    /// accepted as an alias. Same for "Customer" / "Cliente".
    pub fn from_name(name: &str) -> Self {
        let n = name.trim();
        if n.eq_ignore_ascii_case("administrador") || n.eq_ignore_ascii_case("administrator") {
            RoleKind::Administrator
        } else if n.eq_ignore_ascii_case("customer") || n.eq_ignore_ascii_case("cliente") {
            RoleKind::Customer
        } else {
            RoleKind::Other(n.to_string())
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Administrator => f.write_str("administrator"),
            RoleKind::Customer => f.write_str("customer"),
            RoleKind::Other(name) => write!(f, "other({name})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_names_resolve() {
        assert_eq!(RoleKind::from_name("Administrador"), RoleKind::Administrator);
        assert_eq!(RoleKind::from_name("Customer"), RoleKind::Customer);
    }

    #[test]
    fn aliases_and_case() {
        assert_eq!(RoleKind::from_name("  ADMINISTRATOR "), RoleKind::Administrator);
        assert_eq!(RoleKind::from_name("cliente"), RoleKind::Customer);
    }

    #[test]
    fn unknown_is_other() {
        assert_eq!(RoleKind::from_name("Vendedor"), RoleKind::Other("Vendedor".into()));
        assert_eq!(RoleKind::from_name(""), RoleKind::Other(String::new()));
    }
}
