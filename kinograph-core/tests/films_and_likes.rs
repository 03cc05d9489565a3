//! Film CRUD, the like ledger and popularity ranking over the in-memory
//! store.

use std::sync::Arc;

use chrono::NaiveDate;
use kinograph_core::services::{
    CreateFilm, CreateUser, FilmService, UpdateFilm, UserService,
};
use kinograph_core::{DomainError, InMemoryStore};
use kinograph_model::Film;

fn services() -> (FilmService, UserService) {
    let store = Arc::new(InMemoryStore::new());
    let films = FilmService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    let users = UserService::new(store.clone(), store.clone());
    (films, users)
}

fn new_film(name: &str) -> CreateFilm {
    CreateFilm {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
        duration: 136,
        mpa_id: Some(4),
        genre_ids: vec![4, 6],
    }
}

async fn register(users: &UserService, login: &str) -> i64 {
    users
        .create_user(CreateUser {
            name: None,
            email: format!("{login}@example.com"),
            login: login.to_string(),
            birthday: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn create_resolves_catalog_references() {
    let (films, _users) = services();
    let film = films.create_film(new_film("The Matrix")).await.unwrap();

    assert_eq!(film.mpa.as_ref().unwrap().name, "R");
    let genre_names: Vec<&str> =
        film.genres.iter().map(|genre| genre.name.as_str()).collect();
    assert_eq!(genre_names, vec!["Thriller", "Action"]);
}

#[tokio::test]
async fn unknown_genre_or_rating_is_rejected() {
    let (films, _users) = services();

    let mut bad_genre = new_film("A");
    bad_genre.genre_ids = vec![99];
    let err = films.create_film(bad_genre).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));

    let mut bad_rating = new_film("B");
    bad_rating.mpa_id = Some(99);
    let err = films.create_film(bad_rating).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[tokio::test]
async fn update_replaces_the_genre_set() {
    let (films, _users) = services();
    let film = films.create_film(new_film("The Matrix")).await.unwrap();

    let updated = films
        .update_film(UpdateFilm {
            id: film.id,
            name: None,
            description: None,
            release_date: None,
            duration: None,
            mpa_id: None,
            genre_ids: Some(vec![2]),
        })
        .await
        .unwrap();

    let genre_ids: Vec<i64> = updated.genres.iter().map(|genre| genre.id).collect();
    assert_eq!(genre_ids, vec![2]);
    // Untouched fields survive the partial update.
    assert_eq!(updated.name, "The Matrix");
    assert_eq!(updated.mpa.as_ref().unwrap().id, 4);
}

#[tokio::test]
async fn duplicate_like_conflicts_and_absent_unlike_is_not_found() {
    let (films, users) = services();
    let film = films.create_film(new_film("The Matrix")).await.unwrap();
    let user = register(&users, "neo").await;

    let liked = films.add_like(film.id, user).await.unwrap();
    assert_eq!(liked.likes_amount(), 1);

    let err = films.add_like(film.id, user).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let unliked = films.remove_like(film.id, user).await.unwrap();
    assert_eq!(unliked.likes_amount(), 0);

    let err = films.remove_like(film.id, user).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn like_operations_resolve_both_participants() {
    let (films, users) = services();
    let film = films.create_film(new_film("The Matrix")).await.unwrap();
    let user = register(&users, "neo").await;

    let err = films.add_like(404, user).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    let err = films.add_like(film.id, 404).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn popularity_ranks_by_like_count_with_id_tie_break() {
    let (films, users) = services();
    let first = films.create_film(new_film("First")).await.unwrap();
    let second = films.create_film(new_film("Second")).await.unwrap();
    let third = films.create_film(new_film("Third")).await.unwrap();

    let mut viewers = Vec::new();
    for login in ["u1", "u2", "u3"] {
        viewers.push(register(&users, login).await);
    }

    // Like counts: first = 3, second = 1, third = 2.
    for viewer in &viewers {
        films.add_like(first.id, *viewer).await.unwrap();
    }
    films.add_like(second.id, viewers[0]).await.unwrap();
    films.add_like(third.id, viewers[0]).await.unwrap();
    films.add_like(third.id, viewers[1]).await.unwrap();

    let top: Vec<i64> = films
        .best_by_likes(2)
        .await
        .unwrap()
        .iter()
        .map(|film: &Film| film.id)
        .collect();
    assert_eq!(top, vec![first.id, third.id]);

    // Unliked films tie at zero and fall back to id order.
    let all: Vec<i64> = films
        .best_by_likes(10)
        .await
        .unwrap()
        .iter()
        .map(|film: &Film| film.id)
        .collect();
    assert_eq!(all, vec![first.id, third.id, second.id]);
}

#[tokio::test]
async fn non_positive_count_is_invalid() {
    let (films, _users) = services();
    for count in [0, -1] {
        let err = films.best_by_likes(count).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }
}

#[tokio::test]
async fn catalog_lookups() {
    let (films, _users) = services();

    let genres = films.get_all_genres().await.unwrap();
    assert_eq!(genres.len(), 6);
    assert_eq!(films.get_genre(1).await.unwrap().name, "Comedy");

    let ratings = films.get_all_ratings().await.unwrap();
    assert_eq!(ratings.len(), 5);
    assert_eq!(films.get_rating(5).await.unwrap().name, "NC-17");

    let err = films.get_genre(99).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
