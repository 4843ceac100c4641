use foodgram_api::domain::types::MarkKind;
use foodgram_api::error::ApiError;
use foodgram_api::usecase::mark::{AddMarkUseCase, RemoveMarkUseCase};

use crate::helpers::{ALICE, BOB, FLOUR, LUNCH, MemoryStore, line, seed_recipe};

fn add_uc(store: &MemoryStore) -> AddMarkUseCase<MemoryStore, MemoryStore> {
    AddMarkUseCase {
        recipes: store.clone(),
        marks: store.clone(),
    }
}

fn remove_uc(store: &MemoryStore) -> RemoveMarkUseCase<MemoryStore, MemoryStore> {
    RemoveMarkUseCase {
        recipes: store.clone(),
        marks: store.clone(),
    }
}

#[tokio::test]
async fn should_reject_second_favorite_without_duplicating() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Bread", vec![LUNCH], vec![line(FLOUR, 500)]).await;

    let recipe = add_uc(&store)
        .execute(MarkKind::Favorite, BOB, id)
        .await
        .unwrap();
    assert_eq!(recipe.id, id);
    assert_eq!(recipe.name, "Bread");

    let again = add_uc(&store).execute(MarkKind::Favorite, BOB, id).await;
    assert!(
        matches!(again, Err(ApiError::AlreadyMarked(MarkKind::Favorite))),
        "expected AlreadyMarked, got {again:?}"
    );
    assert_eq!(store.favorite_rows(BOB, id), 1);
}

#[tokio::test]
async fn should_reject_second_cart_entry() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Bread", vec![LUNCH], vec![line(FLOUR, 500)]).await;

    add_uc(&store)
        .execute(MarkKind::ShoppingCart, BOB, id)
        .await
        .unwrap();
    let again = add_uc(&store).execute(MarkKind::ShoppingCart, BOB, id).await;

    assert!(matches!(
        again,
        Err(ApiError::AlreadyMarked(MarkKind::ShoppingCart))
    ));
}

#[tokio::test]
async fn should_keep_favorites_and_cart_independent() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Bread", vec![LUNCH], vec![line(FLOUR, 500)]).await;

    add_uc(&store)
        .execute(MarkKind::Favorite, BOB, id)
        .await
        .unwrap();
    add_uc(&store)
        .execute(MarkKind::ShoppingCart, BOB, id)
        .await
        .unwrap();

    remove_uc(&store)
        .execute(MarkKind::ShoppingCart, BOB, id)
        .await
        .unwrap();
    assert_eq!(store.favorite_rows(BOB, id), 1);
}

#[tokio::test]
async fn should_return_not_found_when_removing_missing_pair() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Bread", vec![LUNCH], vec![line(FLOUR, 500)]).await;

    let result = remove_uc(&store).execute(MarkKind::Favorite, BOB, id).await;
    assert!(matches!(
        result,
        Err(ApiError::NotMarked(MarkKind::Favorite))
    ));

    let result = remove_uc(&store)
        .execute(MarkKind::ShoppingCart, BOB, id)
        .await;
    assert!(matches!(
        result,
        Err(ApiError::NotMarked(MarkKind::ShoppingCart))
    ));
}

#[tokio::test]
async fn should_return_not_found_for_missing_recipe() {
    let store = MemoryStore::seeded();

    let add = add_uc(&store).execute(MarkKind::Favorite, BOB, 77).await;
    assert!(matches!(add, Err(ApiError::RecipeNotFound)));

    let remove = remove_uc(&store).execute(MarkKind::Favorite, BOB, 77).await;
    assert!(matches!(remove, Err(ApiError::RecipeNotFound)));
}

#[tokio::test]
async fn should_allow_mark_again_after_removal() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Bread", vec![LUNCH], vec![line(FLOUR, 500)]).await;

    add_uc(&store)
        .execute(MarkKind::Favorite, BOB, id)
        .await
        .unwrap();
    remove_uc(&store)
        .execute(MarkKind::Favorite, BOB, id)
        .await
        .unwrap();
    add_uc(&store)
        .execute(MarkKind::Favorite, BOB, id)
        .await
        .unwrap();

    assert_eq!(store.favorite_rows(BOB, id), 1);
}
