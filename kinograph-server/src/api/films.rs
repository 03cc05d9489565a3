use chrono::{NaiveDate, Utc};
use kinograph_model::{Film, FilmId, Genre, GenreId, MpaRating, RatingId, film::FIRST_FILM_SCREENING};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn release_date_in_bounds(release_date: &NaiveDate) -> Result<(), ValidationError> {
    if *release_date < FIRST_FILM_SCREENING {
        return Err(ValidationError::new("release_date_lower_bound")
            .with_message("Release date must not be before 1895-12-28".into()));
    }
    if *release_date >= Utc::now().date_naive() {
        return Err(ValidationError::new("release_date_future")
            .with_message("Release date must be in the past".into()));
    }
    Ok(())
}

/// Weak genre reference carried by film payloads, e.g. `{"id": 2}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: GenreId,
}

/// Weak MPA rating reference carried by film payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpaRef {
    pub id: RatingId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFilmRequest {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: String,

    #[validate(length(max = 200, message = "Description must not exceed 200 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "release_date_in_bounds"))]
    pub release_date: NaiveDate,

    #[validate(range(min = 1, message = "Duration must be a positive number"))]
    pub duration: i64,

    pub mpa: Option<MpaRef>,
    pub genres: Option<Vec<GenreRef>>,
}

impl NewFilmRequest {
    /// Genre ids deduplicated while keeping first-occurrence order.
    pub fn genre_ids(&self) -> Vec<GenreId> {
        let mut seen = std::collections::BTreeSet::new();
        self.genres
            .iter()
            .flatten()
            .filter(|genre| seen.insert(genre.id))
            .map(|genre| genre.id)
            .collect()
    }
}

/// Partial update addressed by the `id` carried in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmRequest {
    pub id: FilmId,

    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "Description must not exceed 200 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "release_date_in_bounds"))]
    pub release_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "Duration must be a positive number"))]
    pub duration: Option<i64>,

    pub mpa: Option<MpaRef>,
    pub genres: Option<Vec<GenreRef>>,
}

impl UpdateFilmRequest {
    pub fn genre_ids(&self) -> Option<Vec<GenreId>> {
        self.genres.as_ref().map(|genres| {
            let mut seen = std::collections::BTreeSet::new();
            genres
                .iter()
                .filter(|genre| seen.insert(genre.id))
                .map(|genre| genre.id)
                .collect()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreDto {
    pub id: GenreId,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self { id: genre.id, name: genre.name }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MpaDto {
    pub id: RatingId,
    pub name: String,
}

impl From<MpaRating> for MpaDto {
    fn from(rating: MpaRating) -> Self {
        Self { id: rating.id, name: rating.name }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDto {
    pub id: FilmId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    pub mpa: Option<MpaDto>,
    pub genres: Vec<GenreDto>,
    pub likes_amount: usize,
}

impl From<Film> for FilmDto {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            mpa: film.mpa.map(MpaDto::from),
            genres: film.genres.into_iter().map(GenreDto::from).collect(),
            likes_amount: film.likes.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewFilmRequest {
        NewFilmRequest {
            name: "The Matrix".to_string(),
            description: Some("A hacker learns the truth".to_string()),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            duration: 136,
            mpa: Some(MpaRef { id: 4 }),
            genres: Some(vec![GenreRef { id: 6 }, GenreRef { id: 4 }, GenreRef { id: 6 }]),
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_release_before_first_screening() {
        let mut req = request();
        req.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_overlong_description() {
        let mut req = request();
        req.description = Some("x".repeat(201));
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut req = request();
        req.duration = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn genre_ids_are_deduplicated_in_order() {
        assert_eq!(request().genre_ids(), vec![6, 4]);
    }
}
