//! Request DTOs for the API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use validator::validate_email;

/// Longest review text accepted, in characters
pub const MAX_REVIEW_LENGTH: usize = 2000;

/// Default width for proxied photos
pub const DEFAULT_PHOTO_WIDTH: u32 = 800;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_email(value: &str) -> bool {
    validate_email(value.trim())
}

fn validate_review(rating: i64, text: &str) -> Option<String> {
    if !(1..=5).contains(&rating) {
        return Some("rating must be between 1 and 5".to_string());
    }
    if is_blank(text) {
        return Some("review text cannot be empty".to_string());
    }
    if text.chars().count() > MAX_REVIEW_LENGTH {
        return Some(format!(
            "review text exceeds maximum length of {} characters",
            MAX_REVIEW_LENGTH
        ));
    }
    None
}

/// Request body for POST /api/auth/signup
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if is_blank(&self.name) {
            return Some("name cannot be empty".to_string());
        }
        if !is_email(&self.email) {
            return Some("email must be a valid address".to_string());
        }
        if is_blank(&self.password) {
            return Some("password cannot be empty".to_string());
        }
        None
    }
}

/// Request body for POST /api/auth/signin
#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    pub fn validate(&self) -> Option<String> {
        if !is_email(&self.email) {
            return Some("email must be a valid address".to_string());
        }
        if is_blank(&self.password) {
            return Some("password cannot be empty".to_string());
        }
        None
    }
}

/// Request body for POST /api/:type/:id/reviews
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i64,
    pub text: String,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Option<String> {
        validate_review(self.rating, &self.text)
    }
}

/// Request body for POST /api/reviews
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationReviewRequest {
    pub rating: i64,
    pub review: String,
    pub location: String,
}

impl CreateLocationReviewRequest {
    pub fn validate(&self) -> Option<String> {
        if is_blank(&self.location) {
            return Some("location cannot be empty".to_string());
        }
        validate_review(self.rating, &self.review)
    }
}

/// Query string for POST /api/users/:id/favorites
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteQuery {
    #[serde(rename = "type")]
    pub target_type: String,
    pub target_id: String,
}

impl FavoriteQuery {
    pub fn validate(&self) -> Option<String> {
        if is_blank(&self.target_type) {
            return Some("type cannot be empty".to_string());
        }
        if is_blank(&self.target_id) {
            return Some("targetId cannot be empty".to_string());
        }
        None
    }
}

/// Query string for GET /api/places/photo
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoQuery {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default = "default_photo_width")]
    pub max_width: u32,
}

fn default_photo_width() -> u32 {
    DEFAULT_PHOTO_WIDTH
}
