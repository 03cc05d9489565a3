use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use kinograph_core::services::{CreateFilm, UpdateFilm};
use kinograph_model::{FilmId, UserId};

use crate::{
    AppState,
    api::{FilmDto, NewFilmRequest, UpdateFilmRequest},
    errors::AppResult,
};

pub async fn list_films(State(state): State<AppState>) -> AppResult<Json<Vec<FilmDto>>> {
    let films = state.films.get_all_films().await?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<FilmId>,
) -> AppResult<Json<FilmDto>> {
    let film = state.films.get_film(id).await?;
    Ok(Json(film.into()))
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    count: Option<i64>,
}

pub async fn popular_films(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<Json<Vec<FilmDto>>> {
    let films = state.films.best_by_likes(params.count.unwrap_or(10)).await?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

pub async fn create_film(
    State(state): State<AppState>,
    Json(request): Json<NewFilmRequest>,
) -> AppResult<(StatusCode, Json<FilmDto>)> {
    request.validate()?;

    let genre_ids = request.genre_ids();
    let film = state
        .films
        .create_film(CreateFilm {
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
            mpa_id: request.mpa.map(|mpa| mpa.id),
            genre_ids,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(film.into())))
}

pub async fn update_film(
    State(state): State<AppState>,
    Json(request): Json<UpdateFilmRequest>,
) -> AppResult<Json<FilmDto>> {
    request.validate()?;

    let genre_ids = request.genre_ids();
    let film = state
        .films
        .update_film(UpdateFilm {
            id: request.id,
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
            mpa_id: request.mpa.map(|mpa| mpa.id),
            genre_ids,
        })
        .await?;

    Ok(Json(film.into()))
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<FilmId>,
) -> AppResult<StatusCode> {
    state.films.delete_film(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(FilmId, UserId)>,
) -> AppResult<Json<FilmDto>> {
    let film = state.films.add_like(id, user_id).await?;
    Ok(Json(film.into()))
}

pub async fn remove_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(FilmId, UserId)>,
) -> AppResult<Json<FilmDto>> {
    let film = state.films.remove_like(id, user_id).await?;
    Ok(Json(film.into()))
}
