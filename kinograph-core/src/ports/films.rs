use async_trait::async_trait;
use chrono::NaiveDate;
use kinograph_model::{Film, FilmId, GenreId, RatingId};

use crate::error::Result;

/// Field set for film creation. Genre and rating references are raw catalog
/// ids; the service validates them before they reach the store.
#[derive(Debug, Clone)]
pub struct NewFilmRecord {
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    pub mpa_id: Option<RatingId>,
    pub genre_ids: Vec<GenreId>,
}

#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// All films with mpa, genres and likes hydrated.
    async fn get_all(&self) -> Result<Vec<Film>>;

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>>;

    async fn create(&self, film: NewFilmRecord) -> Result<Film>;

    /// Updates the film row and fully replaces its genre set: stale links
    /// are removed, new ones inserted, unchanged ones left untouched.
    async fn update(&self, film: &Film) -> Result<()>;

    async fn delete_by_id(&self, id: FilmId) -> Result<()>;

    /// Up to `count` films ordered by like count descending, ties broken by
    /// ascending film id.
    async fn best_by_likes(&self, count: i64) -> Result<Vec<Film>>;
}
