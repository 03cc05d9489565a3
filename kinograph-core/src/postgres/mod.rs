//! Postgres-backed store.

pub mod database;
pub mod repositories;

pub use database::PostgresDatabase;
pub use repositories::{
    PostgresFilmRepository, PostgresFriendshipRepository, PostgresGenreRepository,
    PostgresLikeRepository, PostgresRatingRepository, PostgresUserRepository,
};
