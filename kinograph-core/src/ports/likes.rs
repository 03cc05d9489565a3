use async_trait::async_trait;
use kinograph_model::{FilmId, UserId};

use crate::error::Result;

/// Many-to-many membership between films and users.
///
/// Duplicate detection happens in the service against the film's loaded
/// like set; the store-level primary key remains as a backstop.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<()>;

    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<()>;

    async fn count_for(&self, film_id: FilmId) -> Result<i64>;
}
