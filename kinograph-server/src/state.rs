use std::sync::Arc;

use kinograph_core::{FilmService, PostgresDatabase, UserService};

/// Shared handler state: the two domain services.
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub films: Arc<FilmService>,
}

impl AppState {
    pub fn new(users: UserService, films: FilmService) -> Self {
        Self { users: Arc::new(users), films: Arc::new(films) }
    }

    /// Wires both services to the Postgres store.
    pub fn from_database(db: &PostgresDatabase) -> Self {
        let users = UserService::new(
            Arc::new(db.users().clone()),
            Arc::new(db.friendships().clone()),
        );
        let films = FilmService::new(
            Arc::new(db.films().clone()),
            Arc::new(db.likes().clone()),
            Arc::new(db.users().clone()),
            Arc::new(db.genres().clone()),
            Arc::new(db.ratings().clone()),
        );
        Self::new(users, films)
    }
}
