//! Tourist Handlers
//!
//! Live Overpass search and catalog listings by city.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use super::AppState;
use crate::error::Result;
use crate::services::Category;

/// Wraps upstream JSON text in a response without re-parsing it.
pub(crate) fn raw_json(body: impl Into<String>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body.into()).into_response()
}

/// Handler for GET /api/tourist/:city
pub async fn tourist_places_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    let body = state.tourist.search_tourist_places(&city).await?;
    Ok(raw_json(body.as_ref()))
}

async fn listing(state: AppState, category: Category, city: String) -> Result<Response> {
    let body = state.tourist.listing(category, &city).await?;
    Ok(Json(body.as_ref()).into_response())
}

/// Handler for GET /api/tourist/hotels/:city
pub async fn hotels_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    listing(state, Category::Hotels, city).await
}

/// Handler for GET /api/tourist/attractions/:city
pub async fn attractions_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    listing(state, Category::Attractions, city).await
}

/// Handler for GET /api/tourist/monuments/:city
pub async fn monuments_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response> {
    listing(state, Category::Monuments, city).await
}
