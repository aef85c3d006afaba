//! Persisted entities
//!
//! Rows loaded from the relational store.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Registered account. The password hash never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Review of a hotel, attraction or free-form location.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub target_type: String,
    pub target_id: String,
    pub author_id: Option<i64>,
    /// Author's name when written by a registered user
    pub author_name: Option<String>,
    /// Display name for reviews submitted without an account
    pub user_name: Option<String>,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Place bookmarked by a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub target_type: String,
    pub target_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_serializes_camel_case() {
        let review = Review {
            id: 1,
            target_type: "hotel".to_string(),
            target_id: "abc".to_string(),
            author_id: None,
            author_name: None,
            user_name: Some("Anonymous User".to_string()),
            rating: 4,
            text: "Lovely".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["targetType"], "hotel");
        assert_eq!(json["userName"], "Anonymous User");
        assert!(json.get("createdAt").is_some());
    }
}
