//! Places Handlers
//!
//! Google Places search, photo and details proxies.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::tourist::raw_json;
use super::AppState;
use crate::error::Result;
use crate::models::PhotoQuery;
use crate::services::Category;

/// Browsers may keep proxied photos for a day.
const PHOTO_CACHE_CONTROL: &str = "public, max-age=86400";

async fn search(state: AppState, category: Category, city: String) -> Result<Response> {
    let body = state.places.search(category, &city).await?;
    Ok(raw_json(body))
}

/// Handler for GET /api/places/hotels/:city
pub async fn hotels_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    search(state, Category::Hotels, city).await
}

/// Handler for GET /api/places/attractions/:city
pub async fn attractions_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    search(state, Category::Attractions, city).await
}

/// Handler for GET /api/places/monuments/:city
pub async fn monuments_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    search(state, Category::Monuments, city).await
}

/// Handler for GET /api/places/photo?ref=&maxWidth=
pub async fn photo_handler(
    State(state): State<AppState>,
    Query(query): Query<PhotoQuery>,
) -> Result<Response> {
    let image = state.places.photo(&query.reference, query.max_width).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, PHOTO_CACHE_CONTROL),
        ],
        image,
    )
        .into_response())
}

/// Handler for GET /api/places/details/:place_id
pub async fn details_handler(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Response> {
    let body = state.places.details(&place_id).await?;
    Ok(raw_json(body))
}
