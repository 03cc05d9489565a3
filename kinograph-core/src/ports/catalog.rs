use async_trait::async_trait;
use kinograph_model::{Genre, GenreId, MpaRating, RatingId};

use crate::error::Result;

/// Fixed genre catalog, seeded by migration.
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// All genres ordered by id.
    async fn get_all(&self) -> Result<Vec<Genre>>;

    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>>;
}

/// Fixed MPA rating catalog, seeded by migration.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// All ratings ordered by id.
    async fn get_all(&self) -> Result<Vec<MpaRating>>;

    async fn find_by_id(&self, id: RatingId) -> Result<Option<MpaRating>>;
}
