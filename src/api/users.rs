//! User Handlers
//!
//! Profile and favorites of the signed-in user.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::auth::AuthUser;
use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{Favorite, FavoriteQuery, User, UserResponse};

/// Handler for GET /api/users/me
pub async fn me_handler(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Loads user `id`, allowing only the caller to act on their own account.
async fn owned_user(state: &AppState, caller: &User, id: i64) -> Result<User> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    if user.id != caller.id {
        return Err(AppError::Forbidden(
            "Cannot access another user's favorites".to_string(),
        ));
    }
    Ok(user)
}

/// Handler for POST /api/users/:id/favorites?type=&targetId=
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<FavoriteQuery>,
) -> Result<StatusCode> {
    if let Some(error_msg) = query.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let user = owned_user(&state, &caller, id).await?;
    state
        .favorites
        .add(user.id, query.target_type.trim(), query.target_id.trim())
        .await?;

    Ok(StatusCode::CREATED)
}

/// Handler for GET /api/users/:id/favorites
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Favorite>>> {
    let user = owned_user(&state, &caller, id).await?;
    Ok(Json(state.favorites.find_by_user(user.id).await?))
}
