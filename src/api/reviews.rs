//! Review Handlers
//!
//! Reviews attached to any target, plus anonymous location reviews.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::auth::{AuthUser, MaybeAuthUser};
use super::AppState;
use crate::db::{NewReview, LOCATION_TARGET};
use crate::error::{AppError, Result};
use crate::models::{
    CreateLocationReviewRequest, CreateReviewRequest, CreatedResponse, LocationReviewsResponse,
    Review,
};

/// Name shown on reviews submitted without signing in.
pub const ANONYMOUS_NAME: &str = "Anonymous User";

/// Handler for GET /api/:type/:id/reviews
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path((target_type, target_id)): Path<(String, String)>,
) -> Result<Json<Vec<Review>>> {
    let reviews = state
        .reviews
        .find_by_target(&target_type, &target_id)
        .await?;
    Ok(Json(reviews))
}

/// Handler for POST /api/:type/:id/reviews
pub async fn create_review_handler(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    Path((target_type, target_id)): Path<(String, String)>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let id = state
        .reviews
        .create(NewReview {
            target_type: &target_type,
            target_id: &target_id,
            author_id: Some(author.id),
            user_name: None,
            rating: req.rating,
            text: req.text.trim(),
        })
        .await?;
    info!(review_id = id, %target_type, %target_id, "review created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// Handler for GET /api/reviews/:location
pub async fn location_reviews_handler(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<LocationReviewsResponse>> {
    let reviews = state
        .reviews
        .find_by_target(LOCATION_TARGET, &location)
        .await?;
    Ok(Json(LocationReviewsResponse::new(location, reviews)))
}

/// Handler for POST /api/reviews
///
/// Signing in is optional; signed-in authors are credited by name.
pub async fn create_location_review_handler(
    State(state): State<AppState>,
    MaybeAuthUser(author): MaybeAuthUser,
    Json(req): Json<CreateLocationReviewRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let (author_id, user_name) = match &author {
        Some(user) => (Some(user.id), user.name.as_str()),
        None => (None, ANONYMOUS_NAME),
    };

    let id = state
        .reviews
        .create(NewReview {
            target_type: LOCATION_TARGET,
            target_id: req.location.trim(),
            author_id,
            user_name: Some(user_name),
            rating: req.rating,
            text: req.review.trim(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::with_message(
            id,
            "Review submitted successfully",
        )),
    ))
}

/// Handler for GET /api/reviews/user/:user_name
pub async fn user_reviews_handler(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<Json<Vec<Review>>> {
    let reviews = state.reviews.find_by_user_name(user_name.trim()).await?;
    Ok(Json(reviews))
}
