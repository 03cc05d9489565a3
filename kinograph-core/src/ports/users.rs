use async_trait::async_trait;
use chrono::NaiveDate;
use kinograph_model::{User, UserId};

use crate::error::Result;

/// Field set for user creation. The id is assigned by the store; the name
/// has already been normalized by the service.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub login: String,
    pub birthday: Option<NaiveDate>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users with their friends projection loaded.
    async fn get_all(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Inserts a user. Fails with `Conflict` when the login is taken.
    async fn create(&self, user: NewUserRecord) -> Result<User>;

    async fn update(&self, user: &User) -> Result<()>;

    /// Deletes the user together with every friendship edge and like
    /// referencing them.
    async fn delete_by_id(&self, id: UserId) -> Result<()>;

    async fn login_exists(&self, login: &str) -> Result<bool>;
}
