//! # Kinograph Core
//!
//! Domain core of the kinograph catalog/social service:
//!
//! - **Ports**: repository traits for users, films, likes, friendship edges
//!   and the fixed genre/rating catalog.
//! - **Postgres**: sqlx-backed implementations plus the embedded schema
//!   migrations.
//! - **In-memory store**: a complete non-persistent implementation of every
//!   port, used by the test suites.
//! - **Services**: `UserService` (user CRUD and the social graph) and
//!   `FilmService` (film CRUD, likes, popularity, catalog lookups).

pub mod error;
pub mod memory;
pub mod ports;
pub mod postgres;
pub mod services;

pub use error::{DomainError, Result};
pub use memory::InMemoryStore;
pub use postgres::PostgresDatabase;
pub use services::{FilmService, UserService};
