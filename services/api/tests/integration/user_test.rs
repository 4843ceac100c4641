use foodgram_domain::pagination::PageRequest;
use foodgram_testing::fixture::png_data_uri;

use foodgram_api::error::ApiError;
use foodgram_api::usecase::subscription::SubscribeUseCase;
use foodgram_api::usecase::user::{
    DeleteAvatarUseCase, GetUserProfileUseCase, ListUsersUseCase, RegisterUserInput,
    RegisterUserUseCase, SetAvatarUseCase,
};

use crate::helpers::{ALICE, BOB, CAROL, MemoryImageStore, MemoryStore};

fn registration(email: &str, username: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: email.to_owned(),
        username: username.to_owned(),
        first_name: "Dana".to_owned(),
        last_name: "Baker".to_owned(),
    }
}

fn field_of<T: std::fmt::Debug>(result: Result<T, ApiError>) -> String {
    match result {
        Err(ApiError::Validation { field, .. }) => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn should_register_new_user() {
    let store = MemoryStore::seeded();
    let uc = RegisterUserUseCase {
        users: store.clone(),
    };

    let user = uc
        .execute(registration(" dana@example.com ", "dana"))
        .await
        .unwrap();

    assert_eq!(user.email, "dana@example.com");
    assert_eq!(user.username, "dana");
    assert!(user.avatar.is_none());
}

#[tokio::test]
async fn should_reject_taken_email_or_username() {
    let store = MemoryStore::seeded();
    let uc = RegisterUserUseCase {
        users: store.clone(),
    };

    let email = uc.execute(registration("alice@example.com", "alice2")).await;
    assert_eq!(field_of(email), "email");

    let username = uc.execute(registration("new@example.com", "alice")).await;
    assert_eq!(field_of(username), "username");
}

#[tokio::test]
async fn should_reject_reserved_username() {
    let store = MemoryStore::seeded();
    let result = RegisterUserUseCase {
        users: store.clone(),
    }
    .execute(registration("me@example.com", "me"))
    .await;

    assert_eq!(field_of(result), "username");
}

#[tokio::test]
async fn should_flag_subscribed_profiles_for_viewer() {
    let store = MemoryStore::seeded();
    SubscribeUseCase {
        users: store.clone(),
        subscriptions: store.clone(),
        recipes: store.clone(),
    }
    .execute(BOB, ALICE, None)
    .await
    .unwrap();
    let profile = GetUserProfileUseCase {
        users: store.clone(),
        subscriptions: store.clone(),
    };

    assert!(profile.execute(Some(BOB), ALICE).await.unwrap().is_subscribed);
    assert!(!profile.execute(Some(CAROL), ALICE).await.unwrap().is_subscribed);
    assert!(!profile.execute(None, ALICE).await.unwrap().is_subscribed);

    let missing = profile.execute(None, 404).await;
    assert!(matches!(missing, Err(ApiError::UserNotFound)));

    let page = ListUsersUseCase {
        users: store.clone(),
        subscriptions: store.clone(),
    }
    .execute(Some(BOB), PageRequest::default())
    .await
    .unwrap();
    assert_eq!(page.count, 3);
    let flags: Vec<bool> = page.items.iter().map(|v| v.is_subscribed).collect();
    assert_eq!(flags, vec![true, false, false]);
}

#[tokio::test]
async fn should_replace_and_delete_avatar() {
    let store = MemoryStore::seeded();
    let images = MemoryImageStore::default();
    let set = SetAvatarUseCase {
        users: store.clone(),
        images: images.clone(),
    };

    let first = set.execute(ALICE, &png_data_uri()).await.unwrap();
    let second = set.execute(ALICE, &png_data_uri()).await.unwrap();

    assert!(first.starts_with("users/images/"));
    assert_ne!(first, second);
    assert_eq!(images.paths(), vec![second.clone()]);

    DeleteAvatarUseCase {
        users: store.clone(),
        images: images.clone(),
    }
    .execute(ALICE)
    .await
    .unwrap();
    assert!(images.paths().is_empty());

    let profile = GetUserProfileUseCase {
        users: store.clone(),
        subscriptions: store.clone(),
    }
    .execute(None, ALICE)
    .await
    .unwrap();
    assert!(profile.user.avatar.is_none());
}

#[tokio::test]
async fn should_reject_malformed_avatar() {
    let store = MemoryStore::seeded();
    let result = SetAvatarUseCase {
        users: store.clone(),
        images: MemoryImageStore::default(),
    }
    .execute(ALICE, "data:text/plain;base64,aGk=")
    .await;

    assert_eq!(field_of(result), "avatar");
}
