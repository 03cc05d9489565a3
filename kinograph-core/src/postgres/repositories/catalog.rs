use async_trait::async_trait;
use kinograph_model::{Genre, GenreId, MpaRating, RatingId};
use sqlx::PgPool;

use crate::error::{DomainError, Result};
use crate::ports::catalog::{GenreRepository, RatingRepository};

#[derive(Debug, Clone, sqlx::FromRow)]
struct CatalogRow {
    id: i64,
    name: String,
}

#[derive(Debug, Clone)]
pub struct PostgresGenreRepository {
    pool: PgPool,
}

impl PostgresGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PostgresGenreRepository {
    async fn get_all(&self) -> Result<Vec<Genre>> {
        let rows = sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM genres ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to load genres: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| Genre { id: row.id, name: row.name })
            .collect())
    }

    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>> {
        let row = sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to load genre {id}: {e}")))?;

        Ok(row.map(|row| Genre { id: row.id, name: row.name }))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn get_all(&self) -> Result<Vec<MpaRating>> {
        let rows =
            sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM mpa_ratings ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::Internal(format!("Failed to load ratings: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| MpaRating { id: row.id, name: row.name })
            .collect())
    }

    async fn find_by_id(&self, id: RatingId) -> Result<Option<MpaRating>> {
        let row =
            sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM mpa_ratings WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Internal(format!("Failed to load rating {id}: {e}")))?;

        Ok(row.map(|row| MpaRating { id: row.id, name: row.name }))
    }
}
