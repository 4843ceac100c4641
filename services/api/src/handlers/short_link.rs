use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::handlers::response::ShortLinkResponse;
use crate::state::AppState;
use crate::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

// ── GET /api/recipes/{id}/get-link ───────────────────────────────────────────

pub async fn get_short_link(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, ApiError> {
    let uc = GetShortLinkUseCase {
        recipes: state.recipe_repo(),
        codec: state.codec.clone(),
    };
    let code = uc.execute(recipe_id).await?;
    Ok(Json(ShortLinkResponse {
        short_link: format!("{}/s/{code}", state.public_base_url),
    }))
}

// ── GET /s/{code} ────────────────────────────────────────────────────────────

pub async fn follow_short_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let uc = ResolveShortLinkUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe_id = uc.execute(&code).await?;
    let location = format!("{}/recipes/{recipe_id}", state.public_base_url);
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
