use std::sync::Arc;

use chrono::NaiveDate;
use kinograph_model::{FriendshipStatus, User, UserId, normalized_name};
use tracing::{info, warn};

use crate::error::{DomainError, Result};
use crate::ports::users::NewUserRecord;
use crate::ports::{FriendshipRepository, UserRepository};

/// Input for user creation; the name may be blank and defaults to the login.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: String,
    pub login: String,
    pub birthday: Option<NaiveDate>,
}

/// Partial update: absent fields keep their current values.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Social service: user CRUD plus the friendship graph orchestration.
///
/// Every graph operation resolves its participants through the user
/// directory first; nothing is written when either side is missing.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    friendships: Arc<dyn FriendshipRepository>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        friendships: Arc<dyn FriendshipRepository>,
    ) -> Self {
        Self { users, friendships }
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.users.get_all().await
    }

    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User with id {id} not found")))
    }

    pub async fn create_user(&self, request: CreateUser) -> Result<User> {
        let name = normalized_name(request.name.as_deref(), &request.login);
        self.users
            .create(NewUserRecord {
                name,
                email: request.email,
                login: request.login,
                birthday: request.birthday,
            })
            .await
    }

    pub async fn update_user(&self, request: UpdateUser) -> Result<User> {
        let mut user = self.get_user(request.id).await?;

        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(login) = request.login {
            if login != user.login && self.users.login_exists(&login).await? {
                return Err(DomainError::Conflict(format!(
                    "Login '{login}' is already in use."
                )));
            }
            user.login = login;
        }
        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(birthday) = request.birthday {
            user.birthday = Some(birthday);
        }
        user.name = normalized_name(Some(&user.name), &user.login);

        self.users.update(&user).await?;
        info!("Updated user with id {}", user.id);
        Ok(user)
    }

    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.get_user(id).await?;
        self.users.delete_by_id(id).await
    }

    pub async fn get_user_friends(&self, id: UserId) -> Result<Vec<User>> {
        self.get_user(id).await?;
        let friend_ids = self.friendships.friend_ids(id).await?;

        let mut friends = Vec::with_capacity(friend_ids.len());
        for friend_id in friend_ids {
            friends.push(self.get_user(friend_id).await?);
        }
        Ok(friends)
    }

    pub async fn send_friend_request(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<()> {
        if requester_id == receiver_id {
            return Err(DomainError::Conflict(
                "User cannot add themselves as a friend.".to_string(),
            ));
        }

        self.get_user(requester_id).await?;
        self.get_user(receiver_id).await?;

        if self.friendships.exists(requester_id, receiver_id).await? {
            return Err(DomainError::Conflict(
                "Friendship request already exists.".to_string(),
            ));
        }

        self.friendships.send_request(requester_id, receiver_id).await?;
        info!(
            "User with id {} sent a friend request to user with id {}",
            requester_id, receiver_id
        );
        Ok(())
    }

    pub async fn approve_friend_request(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<()> {
        match self.friendships.status_of(requester_id, receiver_id).await? {
            None => Err(DomainError::NotFound(format!(
                "No friend request found from user with id {requester_id} to user with id {receiver_id}"
            ))),
            Some(FriendshipStatus::Confirmed) => {
                info!(
                    "Friendship between requester {} and receiver {} is already confirmed",
                    requester_id, receiver_id
                );
                Ok(())
            }
            Some(FriendshipStatus::Unconfirmed) => {
                self.friendships.confirm(requester_id, receiver_id).await?;
                info!(
                    "User with id {} confirmed friendship request from user with id {}",
                    receiver_id, requester_id
                );
                Ok(())
            }
        }
    }

    pub async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> Result<()> {
        self.get_user(user_id).await?;
        self.get_user(friend_id).await?;

        if self.friendships.cancel(user_id, friend_id).await? {
            info!("User with id {} removed friend with id {}", user_id, friend_id);
        } else {
            warn!(
                "Friendship between user {} and {} not found for deletion",
                user_id, friend_id
            );
        }
        Ok(())
    }

    pub async fn common_friends(&self, user_id: UserId, other_id: UserId) -> Result<Vec<User>> {
        self.get_user(user_id).await?;
        self.get_user(other_id).await?;

        let ours = self.friendships.friend_ids(user_id).await?;
        let theirs = self.friendships.friend_ids(other_id).await?;

        let mut common = Vec::new();
        for id in ours.intersection(&theirs) {
            common.push(self.get_user(*id).await?);
        }
        Ok(common)
    }
}
