use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use kinograph_model::{Film, FilmId, Genre, MpaRating, UserId};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::{DomainError, Result};
use crate::ports::films::{FilmRepository, NewFilmRecord};

const SELECT_FILM: &str = r#"
    SELECT
        f.id,
        f.title AS name,
        f.description,
        f.release_date,
        f.duration,
        r.id AS mpa_id,
        r.name AS mpa_name
    FROM films f
    LEFT JOIN mpa_ratings r ON f.rating_id = r.id
"#;

#[derive(Debug, Clone, sqlx::FromRow)]
struct FilmRow {
    id: i64,
    name: String,
    description: Option<String>,
    release_date: NaiveDate,
    duration: i64,
    mpa_id: Option<i64>,
    mpa_name: Option<String>,
}

impl FilmRow {
    fn into_film(self, genres: Vec<Genre>, likes: BTreeSet<UserId>) -> Film {
        let mpa = match (self.mpa_id, self.mpa_name) {
            (Some(id), Some(name)) => Some(MpaRating { id, name }),
            _ => None,
        };
        Film {
            id: self.id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa,
            genres,
            likes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresFilmRepository {
    pool: PgPool,
}

impl PostgresFilmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn genres_by_film(&self, film_ids: &[i64]) -> Result<HashMap<i64, Vec<Genre>>> {
        let rows = sqlx::query_as::<_, (i64, i64, String)>(
            r#"
            SELECT fg.film_id, g.id, g.name
            FROM film_genres fg
            JOIN genres g ON fg.genre_id = g.id
            WHERE fg.film_id = ANY($1)
            ORDER BY g.id
            "#,
        )
        .bind(film_ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load film genres: {e}")))?;

        let mut genres: HashMap<i64, Vec<Genre>> = HashMap::new();
        for (film_id, id, name) in rows {
            genres.entry(film_id).or_default().push(Genre { id, name });
        }
        Ok(genres)
    }

    async fn likes_by_film(&self, film_ids: &[i64]) -> Result<HashMap<i64, BTreeSet<UserId>>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            "SELECT film_id, user_id FROM film_likes WHERE film_id = ANY($1)",
        )
        .bind(film_ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load film likes: {e}")))?;

        let mut likes: HashMap<i64, BTreeSet<UserId>> = HashMap::new();
        for (film_id, user_id) in rows {
            likes.entry(film_id).or_default().insert(user_id);
        }
        Ok(likes)
    }

    async fn hydrate(&self, rows: Vec<FilmRow>) -> Result<Vec<Film>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut genres = self.genres_by_film(&ids).await?;
        let mut likes = self.likes_by_film(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let film_genres = genres.remove(&row.id).unwrap_or_default();
                let film_likes = likes.remove(&row.id).unwrap_or_default();
                row.into_film(film_genres, film_likes)
            })
            .collect())
    }
}

#[async_trait]
impl FilmRepository for PostgresFilmRepository {
    async fn get_all(&self) -> Result<Vec<Film>> {
        let rows = sqlx::query_as::<_, FilmRow>(
            &format!("{SELECT_FILM} ORDER BY f.id"),
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load films: {e}")))?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>> {
        let row = sqlx::query_as::<_, FilmRow>(
            &format!("{SELECT_FILM} WHERE f.id = $1"),
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load film {id}: {e}")))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, film: NewFilmRecord) -> Result<Film> {
        let mut tx = self.pool().begin().await.map_err(|e| {
            DomainError::Internal(format!("Failed to start transaction: {e}"))
        })?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO films (title, description, release_date, duration, rating_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to insert film: {e}")))?;

        for genre_id in &film.genre_ids {
            sqlx::query(
                "INSERT INTO film_genres (film_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(genre_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::Internal(format!("Failed to link genre {genre_id}: {e}"))
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::Internal(format!("Failed to commit film insert: {e}"))
        })?;

        info!("Created film with id {}", id);

        self.find_by_id(id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Film {id} vanished after insert"))
        })
    }

    async fn update(&self, film: &Film) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(|e| {
            DomainError::Internal(format!("Failed to start transaction: {e}"))
        })?;

        let result = sqlx::query(
            r#"
            UPDATE films
            SET title = $1, description = $2, release_date = $3, duration = $4, rating_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa.as_ref().map(|mpa| mpa.id))
        .bind(film.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to update film {}: {e}", film.id)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Internal(format!(
                "Update of film {} affected no rows",
                film.id
            )));
        }

        // Replace the genre set diff-wise: drop stale links, add new ones.
        let current: Vec<i64> = sqlx::query_scalar::<_, i64>(
            "SELECT genre_id FROM film_genres WHERE film_id = $1",
        )
        .bind(film.id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load genre links: {e}")))?;

        let wanted: BTreeSet<i64> = film.genres.iter().map(|genre| genre.id).collect();

        for genre_id in current.iter().filter(|id| !wanted.contains(id)) {
            sqlx::query("DELETE FROM film_genres WHERE film_id = $1 AND genre_id = $2")
                .bind(film.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::Internal(format!("Failed to unlink genre {genre_id}: {e}"))
                })?;
        }

        for genre_id in wanted.iter().filter(|id| !current.contains(id)) {
            sqlx::query("INSERT INTO film_genres (film_id, genre_id) VALUES ($1, $2)")
                .bind(film.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::Internal(format!("Failed to link genre {genre_id}: {e}"))
                })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::Internal(format!("Failed to commit film update: {e}"))
        })?;

        info!("Updated film with id {}", film.id);
        Ok(())
    }

    async fn delete_by_id(&self, id: FilmId) -> Result<()> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to delete film {id}: {e}")))?;

        if result.rows_affected() == 0 {
            warn!("Film with id {} not found for deletion", id);
        } else {
            info!("Deleted film with id {}", id);
        }

        Ok(())
    }

    async fn best_by_likes(&self, count: i64) -> Result<Vec<Film>> {
        let rows = sqlx::query_as::<_, FilmRow>(
            r#"
            SELECT
                f.id,
                f.title AS name,
                f.description,
                f.release_date,
                f.duration,
                r.id AS mpa_id,
                r.name AS mpa_name
            FROM films f
            LEFT JOIN mpa_ratings r ON f.rating_id = r.id
            LEFT JOIN film_likes l ON f.id = l.film_id
            GROUP BY f.id, r.id
            ORDER BY COUNT(l.user_id) DESC, f.id ASC
            LIMIT $1
            "#,
        )
        .bind(count)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to rank films by likes: {e}")))?;

        self.hydrate(rows).await
    }
}
