//! Registration, login and email verification endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::AppError;
use crate::models::{NewUser, Role, User};
use crate::state::AppState;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-email", post(verify_email))
        .route("/resend-otp", post(resend_otp))
        .route("/logout", post(logout))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    user_id: Uuid,
    message: String,
    requires_verification: bool,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyEmailRequest {
    user_id: Uuid,
    otp: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResendOtpRequest {
    user_id: Uuid,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// POST /api/auth/register
///
/// Creates an account and emails (well, logs) a verification OTP.
async fn register(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if new_user.name.is_empty() || new_user.email.is_empty() || new_user.password.is_empty() {
        return Err(AppError::BadRequest("Invalid user data".to_string()));
    }

    if state.store.get_user_by_email(&new_user.email).is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let otp = state.email.generate_otp();
    let user = state.store.create_user(User {
        id: Uuid::new_v4(),
        name: new_user.name,
        email: new_user.email.clone(),
        password_hash: hash_password(&new_user.password),
        role: new_user.role,
        verified_status: false,
        email_verified: false,
        otp: Some(otp.clone()),
        otp_expiry: Some(state.email.otp_expiry()),
        artist_portfolio: new_user.artist_portfolio,
        created_at: Utc::now(),
    });

    state.email.send_otp(&new_user.email, &otp);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            message: "Registration successful. Please check your email for verification code."
                .to_string(),
            requires_verification: true,
        }),
    ))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state
        .store
        .get_user_by_email(&request.email)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(&state.jwt, user.id, &user.email, user.role)?;
    Ok(Json(TokenResponse { token, user }))
}

/// POST /api/auth/verify-email
///
/// Confirms the OTP, marks the email verified and logs the user in.
async fn verify_email(
    State(state): State<AppState>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state
        .store
        .get_user(request.user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.email_verified {
        return Err(AppError::BadRequest("Email already verified".to_string()));
    }

    if user.otp.as_deref() != Some(request.otp.as_str()) {
        return Err(AppError::BadRequest("Invalid verification code".to_string()));
    }

    if !state
        .email
        .is_otp_valid(&request.otp, user.otp.as_deref(), user.otp_expiry)
    {
        return Err(AppError::BadRequest(
            "Verification code has expired".to_string(),
        ));
    }

    let user = state
        .store
        .update_user(request.user_id, |u| {
            u.email_verified = true;
            u.otp = None;
            u.otp_expiry = None;
        })
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let token = issue_token(&state.jwt, user.id, &user.email, user.role)?;
    Ok(Json(TokenResponse { token, user }))
}

/// POST /api/auth/resend-otp
async fn resend_otp(
    State(state): State<AppState>,
    Json(request): Json<ResendOtpRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = state
        .store
        .get_user(request.user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.email_verified {
        return Err(AppError::BadRequest("Email already verified".to_string()));
    }

    let otp = state.email.generate_otp();
    let expiry = state.email.otp_expiry();
    state.store.update_user(request.user_id, |u| {
        u.otp = Some(otp.clone());
        u.otp_expiry = Some(expiry);
    });

    state.email.send_otp(&user.email, &otp);

    Ok(Json(MessageResponse {
        message: "Verification code sent".to_string(),
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; this exists so clients have something to call.
async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_response_shape() {
        let response = RegisterResponse {
            user_id: Uuid::new_v4(),
            message: "ok".to_string(),
            requires_verification: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("userId").is_some());
        assert_eq!(json["requiresVerification"], true);
    }

    #[test]
    fn test_verify_email_request_parses_camel_case() {
        let body = format!(r#"{{"userId":"{}","otp":"123456"}}"#, Uuid::new_v4());
        let request: VerifyEmailRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.otp, "123456");
    }
}
