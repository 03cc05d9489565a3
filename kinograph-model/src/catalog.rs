use serde::{Deserialize, Serialize};

use crate::ids::{GenreId, RatingId};

/// A fixed-catalog film genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// A fixed-catalog MPA content rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpaRating {
    pub id: RatingId,
    pub name: String,
}
