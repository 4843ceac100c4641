use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::error::ApiError;
use crate::handlers::response::{PaginatedResponse, SubscriptionResponse};
use crate::handlers::{invalid_query, parse_recipes_limit};
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<String>,
}

// ── GET /api/users/subscriptions ─────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<SubscriptionQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<SubscriptionResponse>>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let recipes_limit = parse_recipes_limit(query.recipes_limit.as_deref())?;
    let request = PageRequest::from_query(query.page, query.limit);

    let uc = ListSubscriptionsUseCase {
        subscriptions: state.subscription_repo(),
        recipes: state.recipe_repo(),
    };
    let page = uc
        .execute(identity.user_id, request, recipes_limit)
        .await?;

    let images = state.image_store();
    let page = page.map(|view| SubscriptionResponse::new(view, &images));
    Ok(Json(PaginatedResponse::new(
        page,
        request,
        &state.public_base_url,
        &uri,
    )))
}

// ── POST /api/users/{id}/subscribe ───────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    query: Result<Query<SubscriptionQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let recipes_limit = parse_recipes_limit(query.recipes_limit.as_deref())?;

    let uc = SubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
        recipes: state.recipe_repo(),
    };
    let view = uc
        .execute(identity.user_id, author_id, recipes_limit)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::new(view, &state.image_store())),
    ))
}

// ── DELETE /api/users/{id}/subscribe ─────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let uc = UnsubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    uc.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
