use std::sync::Arc;

use chrono::NaiveDate;
use kinograph_model::{Film, FilmId, Genre, GenreId, MpaRating, RatingId, UserId};
use tracing::{info, warn};

use crate::error::{DomainError, Result};
use crate::ports::films::NewFilmRecord;
use crate::ports::{
    FilmRepository, GenreRepository, LikeRepository, RatingRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct CreateFilm {
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    pub mpa_id: Option<RatingId>,
    pub genre_ids: Vec<GenreId>,
}

/// Partial update: absent fields keep their current values. A present
/// `genre_ids` fully replaces the film's genre set.
#[derive(Debug, Clone)]
pub struct UpdateFilm {
    pub id: FilmId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i64>,
    pub mpa_id: Option<RatingId>,
    pub genre_ids: Option<Vec<GenreId>>,
}

/// Film CRUD, the like ledger and the fixed genre/rating catalog.
#[derive(Clone)]
pub struct FilmService {
    films: Arc<dyn FilmRepository>,
    likes: Arc<dyn LikeRepository>,
    users: Arc<dyn UserRepository>,
    genres: Arc<dyn GenreRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl std::fmt::Debug for FilmService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilmService").finish_non_exhaustive()
    }
}

impl FilmService {
    pub fn new(
        films: Arc<dyn FilmRepository>,
        likes: Arc<dyn LikeRepository>,
        users: Arc<dyn UserRepository>,
        genres: Arc<dyn GenreRepository>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self { films, likes, users, genres, ratings }
    }

    pub async fn get_all_films(&self) -> Result<Vec<Film>> {
        self.films.get_all().await
    }

    pub async fn get_film(&self, id: FilmId) -> Result<Film> {
        self.films
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Film with id {id} not found")))
    }

    pub async fn create_film(&self, request: CreateFilm) -> Result<Film> {
        self.validate_genres(&request.genre_ids).await?;
        self.validate_rating(request.mpa_id).await?;

        let film = self
            .films
            .create(NewFilmRecord {
                name: request.name,
                description: request.description,
                release_date: request.release_date,
                duration: request.duration,
                mpa_id: request.mpa_id,
                genre_ids: request.genre_ids,
            })
            .await?;

        info!("Film created successfully: {}", film.name);
        Ok(film)
    }

    pub async fn update_film(&self, request: UpdateFilm) -> Result<Film> {
        if let Some(genre_ids) = &request.genre_ids {
            self.validate_genres(genre_ids).await?;
        }
        self.validate_rating(request.mpa_id).await?;

        let mut film = self.get_film(request.id).await?;

        if let Some(name) = request.name {
            film.name = name;
        }
        if let Some(description) = request.description {
            film.description = Some(description);
        }
        if let Some(release_date) = request.release_date {
            film.release_date = release_date;
        }
        if let Some(duration) = request.duration {
            film.duration = duration;
        }
        if let Some(mpa_id) = request.mpa_id {
            film.mpa = self.ratings.find_by_id(mpa_id).await?;
        }
        if let Some(genre_ids) = request.genre_ids {
            let mut genres = Vec::with_capacity(genre_ids.len());
            for genre_id in genre_ids {
                if let Some(genre) = self.genres.find_by_id(genre_id).await? {
                    genres.push(genre);
                }
            }
            film.genres = genres;
        }

        self.films.update(&film).await?;
        self.get_film(film.id).await
    }

    pub async fn delete_film(&self, id: FilmId) -> Result<()> {
        self.films.delete_by_id(id).await
    }

    /// Records a like and returns the film with its updated like set.
    pub async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<Film> {
        let mut film = self.get_film(film_id).await?;
        self.validate_user_exists(user_id).await?;

        if !film.likes.insert(user_id) {
            return Err(DomainError::Conflict(format!(
                "User with id {user_id} already liked the film with id {film_id}"
            )));
        }

        self.likes.add(film_id, user_id).await?;
        info!("User with id {} liked the film with id {}", user_id, film_id);
        Ok(film)
    }

    /// Removes a like and returns the film with its updated like set.
    pub async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<Film> {
        let mut film = self.get_film(film_id).await?;
        self.validate_user_exists(user_id).await?;

        if !film.likes.remove(&user_id) {
            return Err(DomainError::NotFound(format!(
                "User with id {user_id} did not like the film with id {film_id}, so it cannot be removed."
            )));
        }

        self.likes.remove(film_id, user_id).await?;
        info!(
            "User with id {} removed like from the film with id {}",
            user_id, film_id
        );
        Ok(film)
    }

    pub async fn best_by_likes(&self, count: i64) -> Result<Vec<Film>> {
        if count <= 0 {
            return Err(DomainError::InvalidArgument(
                "Number of films should be greater than 0".to_string(),
            ));
        }

        let films = self.films.best_by_likes(count).await?;
        if films.is_empty() {
            warn!("No films found for the top {} by likes", count);
        }
        Ok(films)
    }

    pub async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        self.genres.get_all().await
    }

    pub async fn get_genre(&self, id: GenreId) -> Result<Genre> {
        self.genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Genre with id {id} not found")))
    }

    pub async fn get_all_ratings(&self) -> Result<Vec<MpaRating>> {
        self.ratings.get_all().await
    }

    pub async fn get_rating(&self, id: RatingId) -> Result<MpaRating> {
        self.ratings
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Rating with id {id} not found")))
    }

    async fn validate_genres(&self, genre_ids: &[GenreId]) -> Result<()> {
        for genre_id in genre_ids {
            if self.genres.find_by_id(*genre_id).await?.is_none() {
                return Err(DomainError::InvalidArgument(format!(
                    "Genre with id {genre_id} does not exist."
                )));
            }
        }
        Ok(())
    }

    async fn validate_rating(&self, mpa_id: Option<RatingId>) -> Result<()> {
        if let Some(mpa_id) = mpa_id {
            if self.ratings.find_by_id(mpa_id).await?.is_none() {
                return Err(DomainError::InvalidArgument(format!(
                    "Rating with id {mpa_id} does not exist."
                )));
            }
        }
        Ok(())
    }

    async fn validate_user_exists(&self, user_id: UserId) -> Result<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("User with id {user_id} not found")))
    }
}
