use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Favorite;

#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: SqlitePool,
}

impl FavoriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records the favorite unless the user already has it.
    pub async fn add(&self, user_id: i64, target_type: &str, target_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, target_type, target_id, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id, target_type, target_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(target_type)
        .bind(target_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, target_type, target_id, created_at
            FROM favorites
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_in_memory, UserRepository};

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        let user = UserRepository::new(pool.clone())
            .create("Asha", "asha@example.com", "hash")
            .await
            .unwrap();
        let repo = FavoriteRepository::new(pool);

        repo.add(user.id, "hotel", "h1").await.unwrap();
        repo.add(user.id, "hotel", "h1").await.unwrap();
        repo.add(user.id, "monument", "m1").await.unwrap();

        let favorites = repo.find_by_user(user.id).await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].target_id, "h1");
        assert_eq!(favorites[1].target_type, "monument");
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let pool = connect_in_memory().await.unwrap();
        let users = UserRepository::new(pool.clone());
        let a = users.create("A", "a@example.com", "hash").await.unwrap();
        let b = users.create("B", "b@example.com", "hash").await.unwrap();
        let repo = FavoriteRepository::new(pool);

        repo.add(a.id, "hotel", "h1").await.unwrap();

        assert_eq!(repo.find_by_user(a.id).await.unwrap().len(), 1);
        assert!(repo.find_by_user(b.id).await.unwrap().is_empty());
    }
}
