//! Authentication
//!
//! HTTP Basic credential extraction, password hashing, and the signup and
//! signin handlers.

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::info;

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{SigninRequest, SignupRequest, User, UserResponse};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Emails are stored and looked up trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Extracts `(email, password)` from an `Authorization: Basic` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// Hashes a password with bcrypt off the async executor.
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// Checks a password against a bcrypt hash off the async executor.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("password verification failed: {}", e)))
}

/// Looks up `email` and returns the user if `password` matches.
async fn authenticate(state: &AppState, email: &str, password: String) -> Result<Option<User>> {
    let Some(user) = state.users.find_by_email(&normalize_email(email)).await? else {
        return Ok(None);
    };

    if verify_password(password, user.password_hash.clone()).await? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

// == Auth User Extractor ==
/// Caller authenticated with HTTP Basic credentials.
///
/// Rejects with 401 when the header is missing or the credentials don't match.
/// Use [`MaybeAuthUser`] for endpoints where signing in is optional.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let (email, password) = basic_credentials(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        authenticate(state, &email, password)
            .await?
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}

/// Caller who may or may not have signed in.
///
/// No `Authorization` header yields `None`. A header that is present but
/// malformed or carries wrong credentials is rejected with 401, as for
/// [`AuthUser`].
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }

        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        Ok(MaybeAuthUser(Some(user)))
    }
}

/// Handler for POST /api/auth/signup
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let email = normalize_email(&req.email);
    if state.users.exists_by_email(&email).await? {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let password_hash = hash_password(req.password, state.bcrypt_cost).await?;
    let user = state
        .users
        .create(req.name.trim(), &email, &password_hash)
        .await?;
    info!(user_id = user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Handler for POST /api/auth/signin
pub async fn signin_handler(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<UserResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    authenticate(&state, &req.email, req.password)
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
}
