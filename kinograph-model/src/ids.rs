//! Identifier aliases.
//!
//! All identifiers are store-assigned 64-bit integers (`BIGSERIAL` in
//! Postgres, an internal counter in the in-memory store). Entities never
//! mint their own ids.

pub type UserId = i64;
pub type FilmId = i64;
pub type GenreId = i64;
pub type RatingId = i64;
