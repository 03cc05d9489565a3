use async_trait::async_trait;
use kinograph_model::{FilmId, UserId};
use sqlx::PgPool;
use tracing::info;

use crate::error::{DomainError, Result};
use crate::ports::likes::LikeRepository;

#[derive(Debug, Clone)]
pub struct PostgresLikeRepository {
    pool: PgPool,
}

impl PostgresLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<()> {
        sqlx::query("INSERT INTO film_likes (film_id, user_id) VALUES ($1, $2)")
            .bind(film_id)
            .bind(user_id)
            .execute(self.pool())
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to insert like: {e}")))?;

        info!("Added like for film {} by user {}", film_id, user_id);
        Ok(())
    }

    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<()> {
        sqlx::query("DELETE FROM film_likes WHERE film_id = $1 AND user_id = $2")
            .bind(film_id)
            .bind(user_id)
            .execute(self.pool())
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to delete like: {e}")))?;

        info!("Removed like for film {} by user {}", film_id, user_id);
        Ok(())
    }

    async fn count_for(&self, film_id: FilmId) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM film_likes WHERE film_id = $1",
        )
        .bind(film_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to count likes: {e}")))
    }
}
