//! Non-persistent store implementing every repository port.
//!
//! Mirrors the Postgres store's semantics (directional friendship edges,
//! store-assigned ids, cascading cleanup on user deletion) over a single
//! locked state, and seeds the same fixed catalog the migrations do. The
//! service test suites run against it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use kinograph_model::{
    Film, FilmId, FriendshipStatus, Genre, GenreId, MpaRating, RatingId, User, UserId,
};
use tracing::{info, warn};

use crate::error::{DomainError, Result};
use crate::ports::{
    FilmRepository, FriendshipRepository, GenreRepository, LikeRepository, NewFilmRecord,
    NewUserRecord, RatingRepository, UserRepository,
};

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    email: String,
    login: String,
    birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
struct FilmRecord {
    name: String,
    description: Option<String>,
    release_date: NaiveDate,
    duration: i64,
    mpa_id: Option<RatingId>,
    genre_ids: BTreeSet<GenreId>,
}

#[derive(Debug, Default)]
struct StoreInner {
    users: BTreeMap<UserId, UserRecord>,
    films: BTreeMap<FilmId, FilmRecord>,
    friendships: BTreeMap<(UserId, UserId), FriendshipStatus>,
    likes: BTreeSet<(FilmId, UserId)>,
    genres: BTreeMap<GenreId, String>,
    ratings: BTreeMap<RatingId, String>,
    next_user_id: UserId,
    next_film_id: FilmId,
}

impl StoreInner {
    fn user_from(&self, id: UserId, record: &UserRecord) -> User {
        let friends = self
            .friendships
            .range((id, UserId::MIN)..=(id, UserId::MAX))
            .map(|((_, receiver), _)| *receiver)
            .collect();

        User {
            id,
            name: record.name.clone(),
            email: record.email.clone(),
            login: record.login.clone(),
            birthday: record.birthday,
            friends,
        }
    }

    fn film_from(&self, id: FilmId, record: &FilmRecord) -> Film {
        let mpa = record.mpa_id.and_then(|rating_id| {
            self.ratings
                .get(&rating_id)
                .map(|name| MpaRating { id: rating_id, name: name.clone() })
        });

        let genres = record
            .genre_ids
            .iter()
            .filter_map(|genre_id| {
                self.genres
                    .get(genre_id)
                    .map(|name| Genre { id: *genre_id, name: name.clone() })
            })
            .collect();

        let likes = self
            .likes
            .range((id, UserId::MIN)..=(id, UserId::MAX))
            .map(|(_, user_id)| *user_id)
            .collect();

        Film {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            release_date: record.release_date,
            duration: record.duration,
            mpa,
            genres,
            likes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        let mut inner = StoreInner::default();

        // Same fixed catalog the seed migration installs.
        for (id, name) in [
            (1, "Comedy"),
            (2, "Drama"),
            (3, "Cartoon"),
            (4, "Thriller"),
            (5, "Documentary"),
            (6, "Action"),
        ] {
            inner.genres.insert(id, name.to_string());
        }
        for (id, name) in [(1, "G"), (2, "PG"), (3, "PG-13"), (4, "R"), (5, "NC-17")] {
            inner.ratings.insert(id, name.to_string());
        }

        Self { inner: Arc::new(RwLock::new(inner)) }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<User>> {
        let inner = self.read();
        Ok(inner
            .users
            .iter()
            .map(|(id, record)| inner.user_from(*id, record))
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let inner = self.read();
        Ok(inner.users.get(&id).map(|record| inner.user_from(id, record)))
    }

    async fn create(&self, user: NewUserRecord) -> Result<User> {
        if self.login_exists(&user.login).await? {
            return Err(DomainError::Conflict(format!(
                "Login '{}' is already in use.",
                user.login
            )));
        }

        let mut inner = self.write();
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let record = UserRecord {
            name: user.name,
            email: user.email,
            login: user.login,
            birthday: user.birthday,
        };
        inner.users.insert(id, record.clone());

        info!("User with id {} was successfully created", id);
        Ok(inner.user_from(id, &record))
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut inner = self.write();
        let record = inner.users.get_mut(&user.id).ok_or_else(|| {
            DomainError::Internal(format!("Update of user {} affected no rows", user.id))
        })?;

        record.name = user.name.clone();
        record.email = user.email.clone();
        record.login = user.login.clone();
        record.birthday = user.birthday;
        Ok(())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<()> {
        let mut inner = self.write();
        if inner.users.remove(&id).is_none() {
            warn!("User with id {} not found for deletion", id);
            return Ok(());
        }

        inner
            .friendships
            .retain(|(requester, receiver), _| *requester != id && *receiver != id);
        inner.likes.retain(|(_, user_id)| *user_id != id);

        info!("User with id {} deleted", id);
        Ok(())
    }

    async fn login_exists(&self, login: &str) -> Result<bool> {
        Ok(self.read().users.values().any(|record| record.login == login))
    }
}

#[async_trait]
impl FilmRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Film>> {
        let inner = self.read();
        Ok(inner
            .films
            .iter()
            .map(|(id, record)| inner.film_from(*id, record))
            .collect())
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>> {
        let inner = self.read();
        Ok(inner.films.get(&id).map(|record| inner.film_from(id, record)))
    }

    async fn create(&self, film: NewFilmRecord) -> Result<Film> {
        let mut inner = self.write();
        inner.next_film_id += 1;
        let id = inner.next_film_id;
        let record = FilmRecord {
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            mpa_id: film.mpa_id,
            genre_ids: film.genre_ids.into_iter().collect(),
        };
        inner.films.insert(id, record.clone());

        info!("Created film with id {}", id);
        Ok(inner.film_from(id, &record))
    }

    async fn update(&self, film: &Film) -> Result<()> {
        let mut inner = self.write();
        let record = inner.films.get_mut(&film.id).ok_or_else(|| {
            DomainError::Internal(format!("Update of film {} affected no rows", film.id))
        })?;

        record.name = film.name.clone();
        record.description = film.description.clone();
        record.release_date = film.release_date;
        record.duration = film.duration;
        record.mpa_id = film.mpa.as_ref().map(|mpa| mpa.id);
        record.genre_ids = film.genres.iter().map(|genre| genre.id).collect();

        info!("Updated film with id {}", film.id);
        Ok(())
    }

    async fn delete_by_id(&self, id: FilmId) -> Result<()> {
        let mut inner = self.write();
        if inner.films.remove(&id).is_none() {
            warn!("Film with id {} not found for deletion", id);
            return Ok(());
        }
        inner.likes.retain(|(film_id, _)| *film_id != id);

        info!("Deleted film with id {}", id);
        Ok(())
    }

    async fn best_by_likes(&self, count: i64) -> Result<Vec<Film>> {
        let inner = self.read();
        let mut films: Vec<Film> = inner
            .films
            .iter()
            .map(|(id, record)| inner.film_from(*id, record))
            .collect();

        // Like count descending, film id ascending on ties; BTreeMap
        // iteration already yields ascending ids, so the sort only has to
        // be stable.
        films.sort_by(|a, b| b.likes_amount().cmp(&a.likes_amount()));
        films.truncate(count.max(0) as usize);
        Ok(films)
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<()> {
        self.write().likes.insert((film_id, user_id));
        info!("Added like for film {} by user {}", film_id, user_id);
        Ok(())
    }

    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<()> {
        self.write().likes.remove(&(film_id, user_id));
        info!("Removed like for film {} by user {}", film_id, user_id);
        Ok(())
    }

    async fn count_for(&self, film_id: FilmId) -> Result<i64> {
        let inner = self.read();
        Ok(inner
            .likes
            .range((film_id, UserId::MIN)..=(film_id, UserId::MAX))
            .count() as i64)
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryStore {
    async fn send_request(&self, requester_id: UserId, receiver_id: UserId) -> Result<()> {
        self.write()
            .friendships
            .insert((requester_id, receiver_id), FriendshipStatus::Unconfirmed);

        info!(
            "User with id {} sent friendship request to user with id {}",
            requester_id, receiver_id
        );
        Ok(())
    }

    async fn confirm(&self, requester_id: UserId, receiver_id: UserId) -> Result<()> {
        let mut inner = self.write();
        let status = inner
            .friendships
            .get_mut(&(requester_id, receiver_id))
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Friendship request not found for requester {requester_id} and receiver {receiver_id}"
                ))
            })?;

        *status = FriendshipStatus::Confirmed;
        info!(
            "Friendship confirmed between requester {} and receiver {}",
            requester_id, receiver_id
        );
        Ok(())
    }

    async fn cancel(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        Ok(self.write().friendships.remove(&(user_id, friend_id)).is_some())
    }

    async fn friend_ids(&self, user_id: UserId) -> Result<BTreeSet<UserId>> {
        let inner = self.read();
        Ok(inner
            .friendships
            .range((user_id, UserId::MIN)..=(user_id, UserId::MAX))
            .map(|((_, receiver), _)| *receiver)
            .collect())
    }

    async fn exists(&self, requester_id: UserId, receiver_id: UserId) -> Result<bool> {
        Ok(self.read().friendships.contains_key(&(requester_id, receiver_id)))
    }

    async fn status_of(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<FriendshipStatus>> {
        Ok(self.read().friendships.get(&(requester_id, receiver_id)).copied())
    }
}

#[async_trait]
impl GenreRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Genre>> {
        Ok(self
            .read()
            .genres
            .iter()
            .map(|(id, name)| Genre { id: *id, name: name.clone() })
            .collect())
    }

    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>> {
        Ok(self
            .read()
            .genres
            .get(&id)
            .map(|name| Genre { id, name: name.clone() }))
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<MpaRating>> {
        Ok(self
            .read()
            .ratings
            .iter()
            .map(|(id, name)| MpaRating { id: *id, name: name.clone() })
            .collect())
    }

    async fn find_by_id(&self, id: RatingId) -> Result<Option<MpaRating>> {
        Ok(self
            .read()
            .ratings
            .get(&id)
            .map(|name| MpaRating { id, name: name.clone() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(login: &str) -> NewUserRecord {
        NewUserRecord {
            name: login.to_string(),
            email: format!("{login}@example.com"),
            login: login.to_string(),
            birthday: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_by_the_store() {
        let store = InMemoryStore::new();
        let first = UserRepository::create(&store, user("first")).await.unwrap();
        let second = UserRepository::create(&store, user("second")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn deleting_a_user_sweeps_edges_and_likes() {
        let store = InMemoryStore::new();
        let a = UserRepository::create(&store, user("a")).await.unwrap();
        let b = UserRepository::create(&store, user("b")).await.unwrap();

        FriendshipRepository::send_request(&store, a.id, b.id)
            .await
            .unwrap();
        LikeRepository::add(&store, 7, b.id).await.unwrap();

        UserRepository::delete_by_id(&store, b.id).await.unwrap();

        assert!(FriendshipRepository::friend_ids(&store, a.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(LikeRepository::count_for(&store, 7).await.unwrap(), 0);
    }
}
