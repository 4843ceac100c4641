use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::MarkKind;
use crate::error::ApiError;
use crate::handlers::response::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::mark::{AddMarkUseCase, RemoveMarkUseCase};

async fn add_mark(
    state: AppState,
    kind: MarkKind,
    user_id: i32,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), ApiError> {
    let uc = AddMarkUseCase {
        recipes: state.recipe_repo(),
        marks: state.mark_repo(),
    };
    let recipe = uc.execute(kind, user_id, recipe_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeSummaryResponse::new(recipe, &state.image_store())),
    ))
}

async fn remove_mark(
    state: AppState,
    kind: MarkKind,
    user_id: i32,
    recipe_id: i32,
) -> Result<StatusCode, ApiError> {
    let uc = RemoveMarkUseCase {
        recipes: state.recipe_repo(),
        marks: state.mark_repo(),
    };
    uc.execute(kind, user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── /api/recipes/{id}/favorite ───────────────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), ApiError> {
    add_mark(state, MarkKind::Favorite, identity.user_id, recipe_id).await
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    remove_mark(state, MarkKind::Favorite, identity.user_id, recipe_id).await
}

// ── /api/recipes/{id}/shopping_cart ──────────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), ApiError> {
    add_mark(state, MarkKind::ShoppingCart, identity.user_id, recipe_id).await
}

pub async fn remove_from_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    remove_mark(state, MarkKind::ShoppingCart, identity.user_id, recipe_id).await
}
