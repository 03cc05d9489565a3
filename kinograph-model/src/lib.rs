//! Core data model definitions shared across kinograph crates.

pub mod catalog;
pub mod film;
pub mod friendship;
pub mod ids;
pub mod user;

pub use catalog::{Genre, MpaRating};
pub use film::Film;
pub use friendship::FriendshipStatus;
pub use ids::{FilmId, GenreId, RatingId, UserId};
pub use user::{User, normalized_name};
