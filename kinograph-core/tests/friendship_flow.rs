//! Friendship state machine behavior, driven through the social service
//! over the in-memory store.

use std::sync::Arc;

use kinograph_core::ports::FriendshipRepository;
use kinograph_core::services::{CreateUser, UserService};
use kinograph_core::{DomainError, InMemoryStore};
use kinograph_model::{FriendshipStatus, User};

fn service() -> (UserService, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    (UserService::new(store.clone(), store.clone()), store)
}

async fn register(service: &UserService, login: &str) -> User {
    service
        .create_user(CreateUser {
            name: None,
            email: format!("{login}@example.com"),
            login: login.to_string(),
            birthday: None,
        })
        .await
        .unwrap()
}

fn friend_ids(user: &User) -> Vec<i64> {
    user.friends.iter().copied().collect()
}

#[tokio::test]
async fn request_creates_a_one_way_edge() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();

    let a = service.get_user(a.id).await.unwrap();
    let b = service.get_user(b.id).await.unwrap();
    assert_eq!(friend_ids(&a), vec![b.id]);
    assert!(b.friends.is_empty(), "the reverse edge must not appear");
}

#[tokio::test]
async fn self_friendship_is_rejected() {
    let (service, _store) = service();
    let a = register(&service, "a").await;

    let err = service.send_friend_request(a.id, a.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn request_to_missing_user_is_not_found() {
    let (service, _store) = service();
    let a = register(&service, "a").await;

    let err = service.send_friend_request(a.id, 404).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_request_conflicts() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    let err = service.send_friend_request(a.id, b.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // Still a conflict after confirmation: at most one edge per pair.
    service.approve_friend_request(a.id, b.id).await.unwrap();
    let err = service.send_friend_request(a.id, b.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn confirm_without_request_is_not_found() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    let err = service.approve_friend_request(a.id, b.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn reconfirming_a_confirmed_edge_is_a_no_op() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    service.approve_friend_request(a.id, b.id).await.unwrap();
    service.approve_friend_request(a.id, b.id).await.unwrap();
}

#[tokio::test]
async fn approval_transitions_the_edge_status() {
    let (service, store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    assert_eq!(
        store.status_of(a.id, b.id).await.unwrap(),
        Some(FriendshipStatus::Unconfirmed)
    );

    service.approve_friend_request(a.id, b.id).await.unwrap();
    assert_eq!(
        store.status_of(a.id, b.id).await.unwrap(),
        Some(FriendshipStatus::Confirmed)
    );

    // Approving again leaves the edge confirmed.
    service.approve_friend_request(a.id, b.id).await.unwrap();
    assert_eq!(
        store.status_of(a.id, b.id).await.unwrap(),
        Some(FriendshipStatus::Confirmed)
    );

    // The reverse direction never existed.
    assert_eq!(store.status_of(b.id, a.id).await.unwrap(), None);
}

#[tokio::test]
async fn cancel_is_idempotent_and_edge_can_be_recreated() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    service.remove_friend(a.id, b.id).await.unwrap();
    // Absent edge: logged, not an error.
    service.remove_friend(a.id, b.id).await.unwrap();

    service.send_friend_request(a.id, b.id).await.unwrap();
    let a = service.get_user(a.id).await.unwrap();
    assert_eq!(friend_ids(&a), vec![b.id]);
}

#[tokio::test]
async fn common_friends_is_symmetric() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;
    let c = register(&service, "c").await;

    service.send_friend_request(a.id, c.id).await.unwrap();
    service.send_friend_request(b.id, c.id).await.unwrap();

    let ab: Vec<i64> = service
        .common_friends(a.id, b.id)
        .await
        .unwrap()
        .iter()
        .map(|user| user.id)
        .collect();
    let ba: Vec<i64> = service
        .common_friends(b.id, a.id)
        .await
        .unwrap()
        .iter()
        .map(|user| user.id)
        .collect();

    assert_eq!(ab, vec![c.id]);
    assert_eq!(ab, ba);
}

#[tokio::test]
async fn disjoint_friend_sets_have_no_common_friends() {
    // A -> B confirmed, B -> C: friendIds(A) = {B}, friendIds(B) = {C}.
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;
    let c = register(&service, "c").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    service.approve_friend_request(a.id, b.id).await.unwrap();
    service.send_friend_request(b.id, c.id).await.unwrap();

    let a_loaded = service.get_user(a.id).await.unwrap();
    let b_loaded = service.get_user(b.id).await.unwrap();
    assert_eq!(friend_ids(&a_loaded), vec![b.id]);
    assert_eq!(friend_ids(&b_loaded), vec![c.id]);

    assert!(service.common_friends(a.id, b.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_user_removes_edges_referencing_them() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    service.delete_user(b.id).await.unwrap();

    let a = service.get_user(a.id).await.unwrap();
    assert!(a.friends.is_empty());
}

#[tokio::test]
async fn friends_listing_does_not_gate_on_confirmation() {
    let (service, _store) = service();
    let a = register(&service, "a").await;
    let b = register(&service, "b").await;

    service.send_friend_request(a.id, b.id).await.unwrap();
    let friends = service.get_user_friends(a.id).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].id, b.id);
}
