use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Genre, MpaRating};
use crate::ids::{FilmId, UserId};

/// Earliest admissible release date: the first public film screening.
pub const FIRST_FILM_SCREENING: NaiveDate =
    match NaiveDate::from_ymd_opt(1895, 12, 28) {
        Some(date) => date,
        None => unreachable!(),
    };

/// A catalog film with its resolved rating, genres and like set.
///
/// `likes` is a cached view over the like ledger, loaded alongside the film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    pub mpa: Option<MpaRating>,
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub likes: BTreeSet<UserId>,
}

impl Film {
    pub fn likes_amount(&self) -> usize {
        self.likes.len()
    }
}
