//! Request and response types for the REST surface.

pub mod films;
pub mod users;

pub use films::{
    FilmDto, GenreDto, GenreRef, MpaDto, MpaRef, NewFilmRequest, UpdateFilmRequest,
};
pub use users::{NewUserRequest, UpdateUserRequest, UserDto};
