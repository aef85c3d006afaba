use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Review;

const SELECT_REVIEW: &str = r#"
    SELECT r.id, r.target_type, r.target_id, r.author_id, u.name AS author_name,
           r.user_name, r.rating, r.text, r.created_at
    FROM reviews r
    LEFT JOIN users u ON u.id = r.author_id
"#;

/// Target type used for free-form location reviews.
pub const LOCATION_TARGET: &str = "location";

/// Fields of a review about to be stored.
#[derive(Debug, Clone)]
pub struct NewReview<'a> {
    pub target_type: &'a str,
    pub target_id: &'a str,
    pub author_id: Option<i64>,
    pub user_name: Option<&'a str>,
    pub rating: i64,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a review and returns its id.
    pub async fn create(&self, review: NewReview<'_>) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reviews (target_type, target_id, author_id, user_name, rating, text, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(review.target_type)
        .bind(review.target_id)
        .bind(review.author_id)
        .bind(review.user_name)
        .bind(review.rating)
        .bind(review.text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Reviews of one target, newest first.
    pub async fn find_by_target(&self, target_type: &str, target_id: &str) -> Result<Vec<Review>> {
        let query = format!(
            "{} WHERE r.target_type = ? AND r.target_id = ? ORDER BY r.created_at DESC, r.id DESC",
            SELECT_REVIEW
        );
        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(target_type)
            .bind(target_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }

    /// Reviews whose anonymous name or author name equals `name`, ignoring case.
    pub async fn find_by_user_name(&self, name: &str) -> Result<Vec<Review>> {
        let query = format!(
            "{} WHERE lower(r.user_name) = lower(?1) OR lower(u.name) = lower(?1) \
             ORDER BY r.created_at DESC, r.id DESC",
            SELECT_REVIEW
        );
        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }
}
