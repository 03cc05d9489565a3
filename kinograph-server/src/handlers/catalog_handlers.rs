use axum::{
    Json,
    extract::{Path, State},
};

use kinograph_model::{GenreId, RatingId};

use crate::{
    AppState,
    api::{GenreDto, MpaDto},
    errors::AppResult,
};

pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<GenreDto>>> {
    let genres = state.films.get_all_genres().await?;
    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<GenreId>,
) -> AppResult<Json<GenreDto>> {
    let genre = state.films.get_genre(id).await?;
    Ok(Json(genre.into()))
}

pub async fn list_ratings(State(state): State<AppState>) -> AppResult<Json<Vec<MpaDto>>> {
    let ratings = state.films.get_all_ratings().await?;
    Ok(Json(ratings.into_iter().map(MpaDto::from).collect()))
}

pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<RatingId>,
) -> AppResult<Json<MpaDto>> {
    let rating = state.films.get_rating(id).await?;
    Ok(Json(rating.into()))
}
