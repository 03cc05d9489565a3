//! # Kinograph Server
//!
//! REST boundary over the kinograph domain core:
//!
//! - **Films**: CRUD, likes, popularity ranking
//! - **Users**: CRUD, friendship requests/confirmation, common friends
//! - **Catalog**: fixed genre and MPA rating lookups
//!
//! Built on axum with PostgreSQL for persistent storage.

pub mod api;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use errors::{AppError, AppResult};
pub use state::AppState;
