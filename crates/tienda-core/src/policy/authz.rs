//! Role -> capability mapping.
//!
//! The whole allow/deny table lives in [`RoleKind::grants`]. Call sites ask for
//! a capability; they never compare role names.

use serde::Serialize;

use crate::error::{Result, TiendaError};
use crate::model::RoleKind;

/// Something a role may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create products and categories.
    ManageCatalog,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ManageCatalog => "manage_catalog",
        }
    }
}

impl RoleKind {
    /// Deny-by-default: only listed (role, capability) pairs pass.
    pub fn grants(&self, cap: Capability) -> bool {
        match (self, cap) {
            (RoleKind::Administrator, Capability::ManageCatalog) => true,
            (RoleKind::Customer, Capability::ManageCatalog) => false,
            (RoleKind::Other(_), _) => false,
        }
    }
}

/// True iff `role` is the administrator role.
pub fn can_manage_catalog(role: &RoleKind) -> bool {
    role.grants(Capability::ManageCatalog)
}

/// Error with `NotAllowed` when the role (or an anonymous caller) lacks `cap`.
pub fn ensure_capability(role: Option<&RoleKind>, cap: Capability) -> Result<()> {
    match role {
        Some(r) if r.grants(cap) => Ok(()),
        Some(r) => {
            tracing::debug!(role = %r, cap = cap.as_str(), "capability denied");
            Err(TiendaError::NotAllowed(format!("role lacks {}", cap.as_str())))
        }
        None => Err(TiendaError::NotAllowed(format!("anonymous caller lacks {}", cap.as_str()))),
    }
}

/// Management controls the home page may render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub add_product: bool,
    pub add_category: bool,
}

impl Affordances {
    /// `None` is an anonymous visitor or a user whose role could not be resolved.
    pub fn for_role(role: Option<&RoleKind>) -> Self {
        let manage = role.is_some_and(can_manage_catalog);
        Self {
            add_product: manage,
            add_category: manage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_administrator_manages() {
        assert!(can_manage_catalog(&RoleKind::Administrator));
        assert!(!can_manage_catalog(&RoleKind::Customer));
        assert!(!can_manage_catalog(&RoleKind::Other("Vendedor".into())));
    }

    #[test]
    fn affordances_follow_role() {
        let admin = Affordances::for_role(Some(&RoleKind::Administrator));
        assert!(admin.add_product && admin.add_category);

        assert_eq!(Affordances::for_role(Some(&RoleKind::Customer)), Affordances::default());
        assert_eq!(Affordances::for_role(None), Affordances::default());
    }

    #[test]
    fn ensure_capability_codes() {
        let admin = ensure_capability(Some(&RoleKind::Administrator), Capability::ManageCatalog);
        assert!(admin.is_ok());

        let denied = [
            ensure_capability(Some(&RoleKind::Customer), Capability::ManageCatalog),
            ensure_capability(None, Capability::ManageCatalog),
        ];
        for r in denied {
            match r {
                Err(e) => assert_eq!(e.client_code().as_str(), "NOT_ALLOWED"),
                Ok(()) => unreachable!("must deny"),
            }
        }
    }
}
