use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use kinograph_core::services::{CreateUser, UpdateUser};
use kinograph_model::UserId;

use crate::{
    AppState,
    api::{NewUserRequest, UpdateUserRequest, UserDto},
    errors::AppResult,
};

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    let users = state.users.get_all_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<UserDto>> {
    let user = state.users.get_user(id).await?;
    Ok(Json(user.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUserRequest>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    request.validate()?;

    let user = state
        .users
        .create_user(CreateUser {
            name: request.name,
            email: request.email,
            login: request.login,
            birthday: request.birthday,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update_user(
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<UserDto>> {
    request.validate()?;

    let user = state
        .users
        .update_user(UpdateUser {
            id: request.id,
            name: request.name,
            email: request.email,
            login: request.login,
            birthday: request.birthday,
        })
        .await?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_friends(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<Vec<UserDto>>> {
    let friends = state.users.get_user_friends(id).await?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}

pub async fn common_friends(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(UserId, UserId)>,
) -> AppResult<Json<Vec<UserDto>>> {
    let friends = state.users.common_friends(id, other_id).await?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    state.users.send_friend_request(id, friend_id).await?;
    Ok(StatusCode::OK)
}

/// The receiver `{id}` approves the request previously sent by
/// `{friendId}`, hence the swapped argument order.
pub async fn confirm_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    state.users.approve_friend_request(friend_id, id).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    state.users.remove_friend(id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
