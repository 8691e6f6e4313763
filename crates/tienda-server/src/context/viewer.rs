use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tienda_core::error::{Result, TiendaError};
use tienda_core::model::{RoleKind, User};

use crate::app_state::AppState;
use crate::http::ApiError;

/// Header naming the signed-in user's email, set by the upstream session layer.
pub const USER_HEADER: &str = "x-user-email";

/// Who is making the request. Anonymous visitors have neither user nor role.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub user: Option<User>,
    /// `None` when anonymous, or when the user's role could not be loaded.
    pub role: Option<RoleKind>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<&RoleKind> {
        self.role.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    /// `AuthFailed` for anonymous callers.
    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(TiendaError::AuthFailed)
    }
}

/// Resolve the viewer from the user header value (if any).
///
/// An unknown email is `AuthFailed`. A user whose role is missing from the
/// store is treated as holding no role rather than failing the request.
pub async fn resolve_viewer(state: &AppState, email: Option<&str>) -> Result<Viewer> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(Viewer::anonymous());
    };

    let store = state.store();
    let user = store.user_by_email(email).await?.ok_or(TiendaError::AuthFailed)?;

    let role = match store.role(user.role_id).await? {
        Some(r) => Some(r.kind()),
        None => {
            tracing::warn!(
                user = %user.email,
                role_id = user.role_id.0,
                "user references a missing role"
            );
            None
        }
    };
    tracing::debug!(user = %user.email, role = ?role, "viewer resolved");

    Ok(Viewer {
        user: Some(user),
        role,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let email = match parts.headers.get(USER_HEADER) {
            Some(v) => Some(v.to_str().map_err(|_| TiendaError::AuthFailed)?),
            None => None,
        };
        Ok(resolve_viewer(state, email).await?)
    }
}
