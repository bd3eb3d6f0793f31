//! User records.

use chrono::{DateTime, Utc};
use emporia_core::Identify;
use serde::{Deserialize, Serialize};

/// A registered user, admin or customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identity.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role deciding admin-panel access.
    #[serde(default)]
    pub role: UserRole,
    /// Contact phone, if provided.
    #[serde(default)]
    pub phone: Option<String>,
    /// False when the account has been deactivated.
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    /// Account creation time.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Role of a user account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Operations dashboard access.
    Admin,
    /// Storefront customer.
    #[default]
    Customer,
}

/// Fields for creating a user; the server assigns the identity.
#[derive(Clone, Debug, Serialize)]
pub struct UserDraft {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password, hashed server-side.
    pub password: String,
    /// Role for the new account.
    pub role: UserRole,
}

impl Identify for User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_user() {
        let json = r#"{
            "_id": "u42",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin",
            "isActive": false,
            "createdAt": "2026-03-01T12:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u42");
        assert_eq!(user.role, UserRole::Admin);
        assert!(!user.is_active);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_decode_defaults() {
        let user: User =
            serde_json::from_str(r#"{"_id":"u1","name":"Bo","email":"bo@example.com"}"#).unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert!(user.is_active);
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_missing_id_fails() {
        let result: Result<User, _> =
            serde_json::from_str(r#"{"name":"Bo","email":"bo@example.com"}"#);
        assert!(result.is_err());
    }
}
