//! User accounts: customers, artists and admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Everything defaults to `Customer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Artist,
    Admin,
}

/// Public-facing artist profile, attached to artist accounts only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPortfolio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A registered user.
///
/// Credentials and OTP state never serialize; every handler can return a
/// `User` as-is without leaking secrets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Artist accounts only: whether an admin has approved the artist.
    pub verified_status: bool,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    #[serde(skip_serializing)]
    pub otp_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_portfolio: Option<ArtistPortfolio>,
    pub created_at: DateTime<Utc>,
}

/// Registration payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    pub artist_portfolio: Option<ArtistPortfolio>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Meera Kulkarni".to_string(),
            email: "meera@example.com".to_string(),
            password_hash: "deadbeef$cafebabe".to_string(),
            role: Role::Artist,
            verified_status: true,
            email_verified: true,
            otp: Some("123456".to_string()),
            otp_expiry: Some(Utc::now()),
            artist_portfolio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_secrets_never_serialize() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("otp").is_none());
        assert!(json.get("otpExpiry").is_none());
        assert_eq!(json["role"], "artist");
        assert!(json.get("verifiedStatus").is_some());
    }

    #[test]
    fn test_new_user_defaults_to_customer() {
        let body = r#"{"name":"A","email":"a@example.com","password":"pw"}"#;
        let new_user: NewUser = serde_json::from_str(body).unwrap();
        assert_eq!(new_user.role, Role::Customer);
        assert!(new_user.artist_portfolio.is_none());
    }

    #[test]
    fn test_role_round_trip() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::Artist).unwrap(), "\"artist\"");
    }
}
