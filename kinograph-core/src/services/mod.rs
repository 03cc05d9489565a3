//! Orchestration services composing the repository ports.

pub mod film_service;
pub mod user_service;

pub use film_service::{CreateFilm, FilmService, UpdateFilm};
pub use user_service::{CreateUser, UpdateUser, UserService};
