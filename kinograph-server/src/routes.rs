use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState,
    handlers::{catalog_handlers, film_handlers, user_handlers},
};

/// Assembles the full REST surface.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // User directory and social graph
        .route(
            "/users",
            get(user_handlers::list_users)
                .post(user_handlers::create_user)
                .put(user_handlers::update_user),
        )
        .route(
            "/users/{id}",
            get(user_handlers::get_user).delete(user_handlers::delete_user),
        )
        .route("/users/{id}/friends", get(user_handlers::list_friends))
        .route(
            "/users/{id}/friends/common/{otherId}",
            get(user_handlers::common_friends),
        )
        .route(
            "/users/{id}/friends/{friendId}",
            put(user_handlers::add_friend).delete(user_handlers::delete_friend),
        )
        .route(
            "/users/{id}/friends/{friendId}/confirm",
            put(user_handlers::confirm_friend),
        )
        // Film directory and like ledger
        .route(
            "/films",
            get(film_handlers::list_films)
                .post(film_handlers::create_film)
                .put(film_handlers::update_film),
        )
        .route("/films/popular", get(film_handlers::popular_films))
        .route(
            "/films/{id}",
            get(film_handlers::get_film).delete(film_handlers::delete_film),
        )
        .route(
            "/films/{id}/like/{userId}",
            put(film_handlers::add_like).delete(film_handlers::remove_like),
        )
        // Fixed catalog
        .route("/genres", get(catalog_handlers::list_genres))
        .route("/genres/{id}", get(catalog_handlers::get_genre))
        .route("/mpa", get(catalog_handlers::list_ratings))
        .route("/mpa/{id}", get(catalog_handlers::get_rating))
        .with_state(state)
}
