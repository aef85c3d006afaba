//! Response DTOs for the API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Review, User};

/// Public view of an account
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Response body for created resources
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { id, message: None }
    }

    pub fn with_message(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: Some(message.into()),
        }
    }
}

/// Response body for GET /api/reviews/:location
#[derive(Debug, Clone, Serialize)]
pub struct LocationReviewsResponse {
    pub reviews: Vec<Review>,
    pub location: String,
    pub total: usize,
}

impl LocationReviewsResponse {
    pub fn new(location: impl Into<String>, reviews: Vec<Review>) -> Self {
        Self {
            total: reviews.len(),
            location: location.into(),
            reviews,
        }
    }
}

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_response_skips_missing_message() {
        let json = serde_json::to_value(CreatedResponse::new(7)).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("message").is_none());

        let json =
            serde_json::to_value(CreatedResponse::with_message(7, "Review submitted")).unwrap();
        assert_eq!(json["message"], "Review submitted");
    }

    #[test]
    fn test_cache_stats_hit_rate() {
        let resp = CacheStatsResponse::from(CacheStats {
            hits: 80,
            misses: 20,
            total_entries: 3,
        });
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_location_reviews_total() {
        let resp = LocationReviewsResponse::new("Goa", Vec::new());
        assert_eq!(resp.total, 0);
        assert_eq!(resp.location, "Goa");
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
