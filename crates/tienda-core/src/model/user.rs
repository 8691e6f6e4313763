use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TiendaError};
use crate::model::RoleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Opaque credential secret. Stored as given, never interpreted or printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A storefront account. Always references exactly one role.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub credential: Credential,
    pub role_id: RoleId,
}

/// User creation request.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub credential: Credential,
    pub role_id: RoleId,
}

impl NewUser {
    /// Normalizes the email (trimmed, lowercased) and checks its shape.
    /// Role existence is the store's job.
    pub fn into_user(self, id: UserId) -> Result<User> {
        let email = self.email.trim().to_ascii_lowercase();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(TiendaError::BadRequest(format!("invalid email: {email}"))),
        }
        Ok(User {
            id,
            email,
            credential: self.credential,
            role_id: self.role_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            credential: Credential::new("password"),
            role_id: RoleId(1),
        }
    }

    #[test]
    fn email_is_normalized() {
        let u = new_user(" Admin@Example.com ").into_user(UserId(7)).unwrap();
        assert_eq!(u.email, "admin@example.com");
        assert_eq!(u.role_id, RoleId(1));
    }

    #[test]
    fn malformed_email_rejected() {
        for bad in ["", "admin", "@example.com", "admin@"] {
            let err = new_user(bad).into_user(UserId(1)).unwrap_err();
            assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "email={bad}");
        }
    }

    #[test]
    fn credential_never_printed() {
        let u = new_user("a@b.c").into_user(UserId(1)).unwrap();
        assert!(!format!("{u:?}").contains("password"));
    }
}
