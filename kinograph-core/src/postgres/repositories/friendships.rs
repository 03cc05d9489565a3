use std::collections::BTreeSet;

use async_trait::async_trait;
use kinograph_model::{FriendshipStatus, UserId};
use sqlx::PgPool;
use tracing::info;

use crate::error::{DomainError, Result};
use crate::ports::friendships::FriendshipRepository;

#[derive(Debug, Clone)]
pub struct PostgresFriendshipRepository {
    pool: PgPool,
}

impl PostgresFriendshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FriendshipRepository for PostgresFriendshipRepository {
    async fn send_request(&self, requester_id: UserId, receiver_id: UserId) -> Result<()> {
        sqlx::query(
            "INSERT INTO friendships (requester_id, receiver_id, status) VALUES ($1, $2, $3)",
        )
        .bind(requester_id)
        .bind(receiver_id)
        .bind(FriendshipStatus::Unconfirmed.as_str())
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to insert friendship edge: {e}")))?;

        info!(
            "User with id {} sent friendship request to user with id {}",
            requester_id, receiver_id
        );
        Ok(())
    }

    async fn confirm(&self, requester_id: UserId, receiver_id: UserId) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE friendships
            SET status = $1
            WHERE requester_id = $2 AND receiver_id = $3
            "#,
        )
        .bind(FriendshipStatus::Confirmed.as_str())
        .bind(requester_id)
        .bind(receiver_id)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to confirm friendship: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "Friendship request not found for requester {requester_id} and receiver {receiver_id}"
            )));
        }

        info!(
            "Friendship confirmed between requester {} and receiver {}",
            requester_id, receiver_id
        );
        Ok(())
    }

    async fn cancel(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM friendships WHERE requester_id = $1 AND receiver_id = $2",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to delete friendship edge: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn friend_ids(&self, user_id: UserId) -> Result<BTreeSet<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT receiver_id FROM friendships WHERE requester_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load friend ids: {e}")))?;

        Ok(ids.into_iter().collect())
    }

    async fn exists(&self, requester_id: UserId, receiver_id: UserId) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM friendships WHERE requester_id = $1 AND receiver_id = $2)",
        )
        .bind(requester_id)
        .bind(receiver_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Friendship existence check failed: {e}")))
    }

    async fn status_of(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<FriendshipStatus>> {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM friendships WHERE requester_id = $1 AND receiver_id = $2",
        )
        .bind(requester_id)
        .bind(receiver_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load friendship status: {e}")))?;

        status
            .map(|raw| {
                FriendshipStatus::parse(&raw).ok_or_else(|| {
                    DomainError::Internal(format!("Unknown friendship status '{raw}'"))
                })
            })
            .transpose()
    }
}
