use std::sync::Arc;

use foodgram_domain::short_code::ShortCodeCodec;

use foodgram_api::error::ApiError;
use foodgram_api::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

use crate::helpers::{ALICE, LUNCH, MILK, MemoryStore, line, seed_recipe};

fn codec() -> Arc<ShortCodeCodec> {
    Arc::new(ShortCodeCodec::new("integration-salt"))
}

#[tokio::test]
async fn should_assign_code_once_and_decode_back() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Soup", vec![LUNCH], vec![line(MILK, 1)]).await;
    let uc = GetShortLinkUseCase {
        recipes: store.clone(),
        codec: codec(),
    };

    let first = uc.execute(id).await.unwrap();
    let second = uc.execute(id).await.unwrap();

    assert_eq!(first, second, "short code must be stable");
    assert_eq!(codec().decode(&first), Some(id));
}

#[tokio::test]
async fn should_keep_existing_code_even_with_other_salt() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Soup", vec![LUNCH], vec![line(MILK, 1)]).await;

    let original = GetShortLinkUseCase {
        recipes: store.clone(),
        codec: codec(),
    }
    .execute(id)
    .await
    .unwrap();
    let later = GetShortLinkUseCase {
        recipes: store.clone(),
        codec: Arc::new(ShortCodeCodec::new("rotated")),
    }
    .execute(id)
    .await
    .unwrap();

    assert_eq!(original, later);
}

#[tokio::test]
async fn should_give_distinct_codes_to_distinct_recipes() {
    let store = MemoryStore::seeded();
    let a = seed_recipe(&store, ALICE, "Soup", vec![LUNCH], vec![line(MILK, 1)]).await;
    let b = seed_recipe(&store, ALICE, "Stew", vec![LUNCH], vec![line(MILK, 2)]).await;
    let uc = GetShortLinkUseCase {
        recipes: store.clone(),
        codec: codec(),
    };

    assert_ne!(uc.execute(a).await.unwrap(), uc.execute(b).await.unwrap());
}

#[tokio::test]
async fn should_resolve_assigned_code() {
    let store = MemoryStore::seeded();
    let id = seed_recipe(&store, ALICE, "Soup", vec![LUNCH], vec![line(MILK, 1)]).await;
    let code = GetShortLinkUseCase {
        recipes: store.clone(),
        codec: codec(),
    }
    .execute(id)
    .await
    .unwrap();

    let resolved = ResolveShortLinkUseCase {
        recipes: store.clone(),
    }
    .execute(&code)
    .await
    .unwrap();

    assert_eq!(resolved, id);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_code_or_recipe() {
    let store = MemoryStore::seeded();

    let resolved = ResolveShortLinkUseCase {
        recipes: store.clone(),
    }
    .execute("zzzzzz")
    .await;
    assert!(matches!(resolved, Err(ApiError::ShortLinkNotFound)));

    let link = GetShortLinkUseCase {
        recipes: store.clone(),
        codec: codec(),
    }
    .execute(12)
    .await;
    assert!(matches!(link, Err(ApiError::RecipeNotFound)));
}
