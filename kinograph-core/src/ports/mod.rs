//! Repository ports.
//!
//! Services depend on these traits only; the Postgres and in-memory stores
//! provide the implementations.

pub mod catalog;
pub mod films;
pub mod friendships;
pub mod likes;
pub mod users;

pub use catalog::{GenreRepository, RatingRepository};
pub use films::{FilmRepository, NewFilmRecord};
pub use friendships::FriendshipRepository;
pub use likes::LikeRepository;
pub use users::{NewUserRecord, UserRepository};
