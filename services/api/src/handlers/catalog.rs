use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::invalid_query;
use crate::handlers::response::{IngredientResponse, TagResponse};
use crate::state::AppState;
use crate::usecase::catalog::{
    GetIngredientUseCase, GetTagUseCase, ListIngredientsUseCase, ListTagsUseCase,
};

#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

// ── GET /api/tags ────────────────────────────────────────────────────────────

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let uc = ListTagsUseCase {
        tags: state.tag_repo(),
    };
    let tags = uc.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id} ───────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<i32>,
) -> Result<Json<TagResponse>, ApiError> {
    let uc = GetTagUseCase {
        tags: state.tag_repo(),
    };
    Ok(Json(uc.execute(tag_id).await?.into()))
}

// ── GET /api/ingredients ─────────────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    query: Result<Query<IngredientQuery>, QueryRejection>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let uc = ListIngredientsUseCase {
        ingredients: state.ingredient_repo(),
    };
    let ingredients = uc.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients.into_iter().map(IngredientResponse::from).collect(),
    ))
}

// ── GET /api/ingredients/{id} ────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let uc = GetIngredientUseCase {
        ingredients: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(ingredient_id).await?.into()))
}
