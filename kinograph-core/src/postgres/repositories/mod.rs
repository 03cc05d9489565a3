pub mod catalog;
pub mod films;
pub mod friendships;
pub mod likes;
pub mod users;

pub use catalog::{PostgresGenreRepository, PostgresRatingRepository};
pub use films::PostgresFilmRepository;
pub use friendships::PostgresFriendshipRepository;
pub use likes::PostgresLikeRepository;
pub use users::PostgresUserRepository;
