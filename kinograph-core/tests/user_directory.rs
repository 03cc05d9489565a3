//! User directory behavior: normalization, login uniqueness, partial
//! updates.

use std::sync::Arc;

use chrono::NaiveDate;
use kinograph_core::services::{CreateUser, UpdateUser, UserService};
use kinograph_core::{DomainError, InMemoryStore};

fn service() -> UserService {
    let store = Arc::new(InMemoryStore::new());
    UserService::new(store.clone(), store)
}

#[tokio::test]
async fn blank_name_defaults_to_login_on_create() {
    let service = service();
    let user = service
        .create_user(CreateUser {
            name: Some("   ".to_string()),
            email: "neo@example.com".to_string(),
            login: "neo".to_string(),
            birthday: NaiveDate::from_ymd_opt(1964, 9, 2),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "neo");
}

#[tokio::test]
async fn duplicate_login_conflicts() {
    let service = service();
    let request = CreateUser {
        name: None,
        email: "neo@example.com".to_string(),
        login: "neo".to_string(),
        birthday: None,
    };

    service.create_user(request.clone()).await.unwrap();
    let err = service.create_user(request).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let service = service();
    let user = service
        .create_user(CreateUser {
            name: Some("Thomas".to_string()),
            email: "neo@example.com".to_string(),
            login: "neo".to_string(),
            birthday: None,
        })
        .await
        .unwrap();

    let updated = service
        .update_user(UpdateUser {
            id: user.id,
            name: None,
            email: Some("anderson@example.com".to_string()),
            login: None,
            birthday: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.name, "Thomas");
    assert_eq!(updated.email, "anderson@example.com");
    assert_eq!(updated.login, "neo");
}

#[tokio::test]
async fn update_to_a_taken_login_conflicts() {
    let service = service();
    for login in ["neo", "trinity"] {
        service
            .create_user(CreateUser {
                name: None,
                email: format!("{login}@example.com"),
                login: login.to_string(),
                birthday: None,
            })
            .await
            .unwrap();
    }

    let trinity = service
        .get_all_users()
        .await
        .unwrap()
        .into_iter()
        .find(|user| user.login == "trinity")
        .unwrap();

    let err = service
        .update_user(UpdateUser {
            id: trinity.id,
            name: None,
            email: None,
            login: Some("neo".to_string()),
            birthday: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // Re-submitting the current login is not a conflict with itself.
    let kept = service
        .update_user(UpdateUser {
            id: trinity.id,
            name: None,
            email: None,
            login: Some("trinity".to_string()),
            birthday: None,
        })
        .await
        .unwrap();
    assert_eq!(kept.login, "trinity");
}

#[tokio::test]
async fn update_of_missing_user_is_not_found() {
    let service = service();
    let err = service
        .update_user(UpdateUser {
            id: 404,
            name: None,
            email: None,
            login: None,
            birthday: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn delete_of_missing_user_is_not_found() {
    let service = service();
    let err = service.delete_user(404).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
