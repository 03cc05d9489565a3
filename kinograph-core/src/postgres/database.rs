use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::error::{DomainError, Result};
use crate::postgres::repositories::{
    PostgresFilmRepository, PostgresFriendshipRepository, PostgresGenreRepository,
    PostgresLikeRepository, PostgresRatingRepository, PostgresUserRepository,
};

/// Connection pool plus the concrete repositories built on it.
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    users: PostgresUserRepository,
    films: PostgresFilmRepository,
    likes: PostgresLikeRepository,
    friendships: PostgresFriendshipRepository,
    genres: PostgresGenreRepository,
    ratings: PostgresRatingRepository,
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| {
                DomainError::Internal(format!("Database connection failed: {e}"))
            })?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(Self {
            users: PostgresUserRepository::new(pool.clone()),
            films: PostgresFilmRepository::new(pool.clone()),
            likes: PostgresLikeRepository::new(pool.clone()),
            friendships: PostgresFriendshipRepository::new(pool.clone()),
            genres: PostgresGenreRepository::new(pool.clone()),
            ratings: PostgresRatingRepository::new(pool.clone()),
            pool,
        })
    }

    /// Applies the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn users(&self) -> &PostgresUserRepository {
        &self.users
    }

    pub fn films(&self) -> &PostgresFilmRepository {
        &self.films
    }

    pub fn likes(&self) -> &PostgresLikeRepository {
        &self.likes
    }

    pub fn friendships(&self) -> &PostgresFriendshipRepository {
        &self.friendships
    }

    pub fn genres(&self) -> &PostgresGenreRepository {
        &self.genres
    }

    pub fn ratings(&self) -> &PostgresRatingRepository {
        &self.ratings
    }
}
