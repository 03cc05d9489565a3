use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use kinograph_model::{User, UserId};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::{DomainError, Result};
use crate::ports::users::{NewUserRecord, UserRepository};

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    login: String,
    birthday: Option<NaiveDate>,
}

impl UserRow {
    fn into_user(self, friends: BTreeSet<UserId>) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            login: self.login,
            birthday: self.birthday,
            friends,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn friend_ids_of(&self, id: UserId) -> Result<BTreeSet<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT receiver_id FROM friendships WHERE requester_id = $1",
        )
        .bind(id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load friend ids: {e}")))?;

        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to load users: {e}")))?;

        // One pass over the edge table instead of a query per user.
        let edges = sqlx::query_as::<_, (i64, i64)>(
            "SELECT requester_id, receiver_id FROM friendships",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to load friendships: {e}")))?;

        let mut by_requester: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        for (requester, receiver) in edges {
            by_requester.entry(requester).or_default().insert(receiver);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let friends = by_requester.remove(&row.id).unwrap_or_default();
                row.into_user(friends)
            })
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to load user {id}: {e}")))?;

        match row {
            Some(row) => {
                let friends = self.friend_ids_of(id).await?;
                Ok(Some(row.into_user(friends)))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, user: NewUserRecord) -> Result<User> {
        if self.login_exists(&user.login).await? {
            return Err(DomainError::Conflict(format!(
                "Login '{}' is already in use.",
                user.login
            )));
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, login, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.login)
        .bind(user.birthday)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to insert user: {e}")))?;

        info!("User with id {} was successfully created", id);

        Ok(User {
            id,
            name: user.name,
            email: user.email,
            login: user.login,
            birthday: user.birthday,
            friends: BTreeSet::new(),
        })
    }

    async fn update(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, login = $3, birthday = $4
            WHERE id = $5
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.login)
        .bind(user.birthday)
        .bind(user.id)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to update user {}: {e}", user.id)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Internal(format!(
                "Update of user {} affected no rows",
                user.id
            )));
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<()> {
        // Friendship edges and likes fall away through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to delete user {id}: {e}")))?;

        if result.rows_affected() == 0 {
            warn!("User with id {} not found for deletion", id);
        } else {
            info!("User with id {} deleted", id);
        }

        Ok(())
    }

    async fn login_exists(&self, login: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE login = $1)",
        )
        .bind(login)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(format!("Login existence check failed: {e}")))
    }
}
