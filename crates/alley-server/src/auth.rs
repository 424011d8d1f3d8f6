//! JWT authentication and password hashing.

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// Keys for signing and validating tokens.
#[derive(Clone)]
pub struct JwtConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Token claims: user identity plus expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

/// The authenticated caller, extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Role guard for protected handlers.
    pub fn require_role(&self, roles: &[Role]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

/// Issues a signed token for a user.
pub fn issue_token(
    config: &JwtConfig,
    user_id: Uuid,
    email: &str,
    role: Role,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &config.encoding)
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Extracts and validates the bearer token from the request headers.
pub fn require_user(config: &JwtConfig, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let data = decode::<Claims>(token, &config.decoding, &Validation::default())
        .map_err(|_| AppError::Forbidden("Invalid token".to_string()))?;

    Ok(AuthUser {
        id: data.claims.sub,
        email: data.claims.email,
        role: data.claims.role,
    })
}

/// Salted SHA-256 password hash, stored as `<salt hex>$<digest hex>`.
pub fn hash_password(plain: &str) -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let digest = salted_digest(&salt, plain);
    format!("{}${}", hex::encode(salt), hex::encode(digest))
}

/// Checks a candidate password against a stored hash.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    hex::encode(salted_digest(&salt, plain)) == digest_hex
}

fn salted_digest(salt: &[u8], plain: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plain.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> JwtConfig {
        JwtConfig::from_secret(b"test-secret")
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_token_round_trip() {
        let config = config();
        let id = Uuid::new_v4();
        let token = issue_token(&config, id, "artist@example.com", Role::Artist).unwrap();

        let user = require_user(&config, &headers_with(&token)).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "artist@example.com");
        assert_eq!(user.role, Role::Artist);
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let result = require_user(&config(), &HeaderMap::new());
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_token_is_forbidden() {
        let result = require_user(&config(), &headers_with("not-a-jwt"));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token =
            issue_token(&JwtConfig::from_secret(b"other"), Uuid::new_v4(), "a@b.c", Role::Admin)
                .unwrap();
        let result = require_user(&config(), &headers_with(&token));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_role_guard() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "c@example.com".to_string(),
            role: Role::Customer,
        };
        assert!(user.require_role(&[Role::Customer]).is_ok());
        assert!(user.require_role(&[Role::Artist, Role::Admin]).is_err());
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_password_hashes_are_salted() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_verify_rejects_malformed_stored_hash() {
        assert!(!verify_password("x", "no-separator"));
        assert!(!verify_password("x", "zz$notsalthex"));
    }
}
