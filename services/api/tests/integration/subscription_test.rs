use foodgram_domain::pagination::PageRequest;

use foodgram_api::error::ApiError;
use foodgram_api::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

use crate::helpers::{
    ALICE, BOB, CAROL, DINNER, EGGS, LUNCH, MILK, MemoryStore, line, seed_recipe,
};

fn subscribe_uc(store: &MemoryStore) -> SubscribeUseCase<MemoryStore, MemoryStore, MemoryStore> {
    SubscribeUseCase {
        users: store.clone(),
        subscriptions: store.clone(),
        recipes: store.clone(),
    }
}

fn unsubscribe_uc(store: &MemoryStore) -> UnsubscribeUseCase<MemoryStore, MemoryStore> {
    UnsubscribeUseCase {
        users: store.clone(),
        subscriptions: store.clone(),
    }
}

#[tokio::test]
async fn should_reject_self_subscription_regardless_of_state() {
    let store = MemoryStore::seeded();

    let first = subscribe_uc(&store).execute(ALICE, ALICE, None).await;
    assert!(
        matches!(first, Err(ApiError::Validation { ref field, .. }) if field == "author"),
        "expected validation error, got {first:?}"
    );

    // Even if a self row somehow existed, the check runs first.
    store.data.lock().unwrap().subscriptions.push((ALICE, ALICE));
    let second = subscribe_uc(&store).execute(ALICE, ALICE, None).await;
    assert!(matches!(second, Err(ApiError::Validation { .. })));

    // Self check precedes the existence check too.
    let unknown = subscribe_uc(&store).execute(99, 99, None).await;
    assert!(matches!(unknown, Err(ApiError::Validation { .. })));
}

#[tokio::test]
async fn should_reject_duplicate_subscription() {
    let store = MemoryStore::seeded();

    subscribe_uc(&store).execute(BOB, ALICE, None).await.unwrap();
    let again = subscribe_uc(&store).execute(BOB, ALICE, None).await;

    assert!(matches!(again, Err(ApiError::SubscriptionAlreadyExists)));
    assert_eq!(store.subscription_rows(BOB, ALICE), 1);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_author() {
    let store = MemoryStore::seeded();

    let result = subscribe_uc(&store).execute(BOB, 404, None).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));

    let result = unsubscribe_uc(&store).execute(BOB, 404).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn should_return_not_found_when_unsubscribing_missing_pair() {
    let store = MemoryStore::seeded();

    let result = unsubscribe_uc(&store).execute(BOB, ALICE).await;
    assert!(matches!(result, Err(ApiError::SubscriptionNotFound)));

    subscribe_uc(&store).execute(BOB, ALICE, None).await.unwrap();
    unsubscribe_uc(&store).execute(BOB, ALICE).await.unwrap();
    assert_eq!(store.subscription_rows(BOB, ALICE), 0);
}

#[tokio::test]
async fn should_preview_limited_recipes_with_full_count() {
    let store = MemoryStore::seeded();
    seed_recipe(&store, ALICE, "Soup", vec![LUNCH], vec![line(MILK, 1)]).await;
    seed_recipe(&store, ALICE, "Stew", vec![DINNER], vec![line(EGGS, 2)]).await;
    let newest = seed_recipe(&store, ALICE, "Omelette", vec![LUNCH], vec![line(EGGS, 3)]).await;

    let view = subscribe_uc(&store)
        .execute(BOB, ALICE, Some(1))
        .await
        .unwrap();

    assert_eq!(view.author.id, ALICE);
    assert_eq!(view.recipes_count, 3);
    assert_eq!(view.recipes.len(), 1);
    assert_eq!(view.recipes[0].id, newest);
}

#[tokio::test]
async fn should_list_followed_authors() {
    let store = MemoryStore::seeded();
    seed_recipe(&store, CAROL, "Salad", vec![LUNCH], vec![line(EGGS, 1)]).await;
    subscribe_uc(&store).execute(BOB, CAROL, None).await.unwrap();
    subscribe_uc(&store).execute(BOB, ALICE, None).await.unwrap();

    let page = ListSubscriptionsUseCase {
        subscriptions: store.clone(),
        recipes: store.clone(),
    }
    .execute(BOB, PageRequest::default(), None)
    .await
    .unwrap();

    assert_eq!(page.count, 2);
    let names: Vec<&str> = page
        .items
        .iter()
        .map(|v| v.author.username.as_str())
        .collect();
    assert_eq!(names, vec!["alice", "carol"]);
    assert_eq!(page.items[0].recipes_count, 0);
    assert_eq!(page.items[1].recipes_count, 1);
}
