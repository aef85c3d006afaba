//! Tourist Service
//!
//! Cache-fronted lookups: live Overpass attraction searches and catalog
//! listings per city.

use std::sync::Arc;

use chrono::Duration;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheStats, Clock, SystemClock, TtlCache};
use crate::error::{AppError, Result};
use crate::http::{ApiRequest, UpstreamClient};
use crate::services::catalog::{self, Category};

/// Minutes a live Overpass answer stays cached.
pub const LIVE_TTL_MINUTES: i64 = 5;
/// Minutes a catalog listing stays cached.
pub const CATALOG_TTL_MINUTES: i64 = 10;

/// Trims `city`, rejecting blank input.
pub fn normalize_city(city: &str) -> Result<&str> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "city path variable must be provided".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Cache key for a trimmed `city`, prefixed by category when given.
pub fn cache_key(category: Option<Category>, city: &str) -> String {
    let city = city.trim().to_lowercase();
    match category {
        Some(category) => format!("{}{}", category.cache_prefix(), city),
        None => city,
    }
}

/// Overpass QL selecting every `tourism=attraction` inside the city's boundary.
pub fn overpass_query(city: &str) -> String {
    let escaped = city.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        r#"[out:json][timeout:25];
area["name"="{escaped}"]["boundary"="administrative"]->.searchArea;
(
  node["tourism"="attraction"](area.searchArea);
  way["tourism"="attraction"](area.searchArea);
  relation["tourism"="attraction"](area.searchArea);
);
out center;
"#
    )
}

// == Tourist Service ==
/// Live answers and catalog listings live in separate caches, so an Overpass
/// city named like a category key never shadows a listing.
pub struct TouristService {
    live: TtlCache<Arc<str>>,
    listings: TtlCache<Arc<Value>>,
    overpass: UpstreamClient,
}

impl TouristService {
    pub fn new(overpass: UpstreamClient) -> Self {
        Self::with_clock(overpass, Arc::new(SystemClock))
    }

    /// Creates a service whose caches read `clock`.
    pub fn with_clock(overpass: UpstreamClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            live: TtlCache::with_clock(clock.clone()),
            listings: TtlCache::with_clock(clock),
            overpass,
        }
    }

    /// Combined counters of both caches.
    pub async fn cache_stats(&self) -> CacheStats {
        self.live.stats().await.merge(self.listings.stats().await)
    }

    // == Search Tourist Places ==
    /// Returns the raw Overpass JSON listing attractions in `city`.
    ///
    /// Successful non-blank answers are cached for five minutes; failures and
    /// blank answers are not cached.
    pub async fn search_tourist_places(&self, city: &str) -> Result<Arc<str>> {
        let city = normalize_city(city)?;
        let key = cache_key(None, city);

        if let Some(body) = self.live.get(&key).await {
            return Ok(body);
        }

        info!(city, "querying Overpass for attractions");
        let request = ApiRequest::post_form(
            "/interpreter",
            vec![("data".to_string(), overpass_query(city))],
        );
        let body = self.overpass.fetch_text(&request).await?;

        if body.trim().is_empty() {
            return Err(AppError::NotFound(format!(
                "No tourist attractions found in {}",
                city
            )));
        }

        let body: Arc<str> = Arc::from(body);
        self.live
            .put(key, body.clone(), Duration::minutes(LIVE_TTL_MINUTES))
            .await;
        Ok(body)
    }

    // == Listing ==
    /// Returns the catalog listing of `category` for `city`.
    pub async fn listing(&self, category: Category, city: &str) -> Result<Arc<Value>> {
        let city = normalize_city(city)?;
        let key = cache_key(Some(category), city);

        if let Some(body) = self.listings.get(&key).await {
            return Ok(body);
        }

        debug!(city, category = category.as_str(), "building catalog listing");
        let body = catalog::listing(category, city)
            .map_err(|e| AppError::Internal(format!("failed to build listing: {}", e)))?;
        let body = Arc::new(body);
        self.listings
            .put(key, body.clone(), Duration::minutes(CATALOG_TTL_MINUTES))
            .await;
        Ok(body)
    }
}
