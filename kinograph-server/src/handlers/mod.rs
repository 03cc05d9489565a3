//! Axum handlers, one module per controller surface.

pub mod catalog_handlers;
pub mod film_handlers;
pub mod user_handlers;
