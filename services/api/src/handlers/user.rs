use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, Uri},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::repository::ImageStore as _;
use crate::domain::types::UserView;
use crate::error::ApiError;
use crate::handlers::response::{AvatarResponse, PaginatedResponse, UserProfileResponse};
use crate::handlers::{PageQuery, invalid_body, invalid_query};
use crate::state::AppState;
use crate::usecase::user::{
    DeleteAvatarUseCase, GetUserProfileUseCase, ListUsersUseCase, RegisterUserInput,
    RegisterUserUseCase, SetAvatarUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct SetAvatarRequest {
    pub avatar: String,
}

// ── POST /api/users ──────────────────────────────────────────────────────────

pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserProfileResponse>), ApiError> {
    let Json(body) = body.map_err(invalid_body)?;
    let uc = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    let view = UserView {
        user,
        is_subscribed: false,
    };
    Ok((
        StatusCode::CREATED,
        Json(UserProfileResponse::new(view, &state.image_store())),
    ))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<UserProfileResponse>>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let request = query.page_request();
    let uc = ListUsersUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let page = uc.execute(identity.map(|i| i.user_id), request).await?;

    let images = state.image_store();
    let page = page.map(|view| UserProfileResponse::new(view, &images));
    Ok(Json(PaginatedResponse::new(
        page,
        request,
        &state.public_base_url,
        &uri,
    )))
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let uc = GetUserProfileUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let view = uc
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(UserProfileResponse::new(view, &state.image_store())))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let uc = GetUserProfileUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let view = uc.execute(identity.map(|i| i.user_id), user_id).await?;
    Ok(Json(UserProfileResponse::new(view, &state.image_store())))
}

// ── PUT /api/users/me/avatar ─────────────────────────────────────────────────

pub async fn set_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<SetAvatarRequest>, JsonRejection>,
) -> Result<Json<AvatarResponse>, ApiError> {
    let Json(body) = body.map_err(invalid_body)?;
    let images = state.image_store();
    let uc = SetAvatarUseCase {
        users: state.user_repo(),
        images: images.clone(),
    };
    let path = uc.execute(identity.user_id, &body.avatar).await?;
    Ok(Json(AvatarResponse {
        avatar: images.url(&path),
    }))
}

// ── DELETE /api/users/me/avatar ──────────────────────────────────────────────

pub async fn delete_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let uc = DeleteAvatarUseCase {
        users: state.user_repo(),
        images: state.image_store(),
    };
    uc.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
