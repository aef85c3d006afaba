//! Google Places Service
//!
//! Proxies text search, photo and details lookups to the Places API.

use tracing::info;

use crate::error::{AppError, Result};
use crate::http::{ApiRequest, UpstreamClient};
use crate::services::catalog::Category;
use crate::services::tourist::normalize_city;

/// Fields requested from the details endpoint.
pub const DETAIL_FIELDS: &str = "place_id,name,rating,user_ratings_total,price_level,\
formatted_address,geometry,editorial_summary,reviews";

/// Widest photo the Places API will render.
pub const MAX_PHOTO_WIDTH: u32 = 4800;

/// Free-text query sent to the text search endpoint.
pub fn search_phrase(category: Category, city: &str) -> String {
    match category {
        Category::Hotels => format!("hotels in {}", city),
        Category::Attractions => format!("tourist attractions in {}", city),
        Category::Monuments => format!("monuments in {}", city),
    }
}

pub struct PlacesService {
    client: UpstreamClient,
    api_key: Option<String>,
}

impl PlacesService {
    pub fn new(client: UpstreamClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("GOOGLE_API_KEY must be set".to_string()))
    }

    /// Raw text search results for `category` in `city`.
    pub async fn search(&self, category: Category, city: &str) -> Result<String> {
        let city = normalize_city(city)?;
        let key = self.api_key()?;

        info!(city, category = category.as_str(), "Places text search");
        let request = ApiRequest::get("/textsearch/json")
            .query("query", search_phrase(category, city))
            .query("key", key);
        Ok(self.client.fetch_text(&request).await?)
    }

    /// Image bytes for a photo reference, scaled to `max_width`.
    pub async fn photo(&self, reference: &str, max_width: u32) -> Result<Vec<u8>> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(AppError::Validation("ref is required".to_string()));
        }
        if max_width == 0 || max_width > MAX_PHOTO_WIDTH {
            return Err(AppError::Validation(format!(
                "maxWidth must be between 1 and {}",
                MAX_PHOTO_WIDTH
            )));
        }
        let key = self.api_key()?;

        let request = ApiRequest::get("/photo")
            .query("photoreference", reference)
            .query("maxwidth", max_width.to_string())
            .query("key", key);
        Ok(self.client.fetch(&request).await?)
    }

    /// Raw details document for `place_id`.
    pub async fn details(&self, place_id: &str) -> Result<String> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(AppError::Validation("placeId is required".to_string()));
        }
        let key = self.api_key()?;

        let request = ApiRequest::get("/details/json")
            .query("place_id", place_id)
            .query("fields", DETAIL_FIELDS)
            .query("key", key);
        Ok(self.client.fetch_text(&request).await?)
    }
}
