use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, Uri},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::IngredientAmount;
use crate::error::ApiError;
use crate::handlers::response::{PaginatedResponse, RecipeResponse};
use crate::handlers::{flag, invalid_body, invalid_query};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeIngredientUseCase, DeleteRecipeUseCase,
    GetRecipeUseCase, ListRecipesInput, ListRecipesUseCase, UpdateRecipeInput,
    UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IngredientAmountRequest {
    /// Ingredient id.
    pub id: i32,
    pub amount: i32,
}

impl From<IngredientAmountRequest> for IngredientAmount {
    fn from(req: IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: req.id,
            amount: req.amount,
        }
    }
}

/// Missing fields fall back to empty values and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    pub tags: Vec<i32>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i32>,
    /// Tag slugs, any-of.
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

fn into_lines(lines: Vec<IngredientAmountRequest>) -> Vec<IngredientAmount> {
    lines.into_iter().map(IngredientAmount::from).collect()
}

async fn recipe_response(
    state: &AppState,
    viewer: Option<i32>,
    recipe_id: i32,
) -> Result<RecipeResponse, ApiError> {
    let uc = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        marks: state.mark_repo(),
        subscriptions: state.subscription_repo(),
    };
    let view = uc.execute(viewer, recipe_id).await?;
    Ok(RecipeResponse::new(view, &state.image_store()))
}

// ── GET /api/recipes ─────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<RecipeListQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<RecipeResponse>>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let request = PageRequest::from_query(query.page, query.limit);
    let input = ListRecipesInput {
        author_id: query.author,
        tag_slugs: query.tags,
        only_favorited: flag(query.is_favorited.as_deref()),
        only_in_shopping_cart: flag(query.is_in_shopping_cart.as_deref()),
    };

    let uc = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        marks: state.mark_repo(),
        subscriptions: state.subscription_repo(),
    };
    let page = uc
        .execute(identity.map(|i| i.user_id), input, request)
        .await?;

    let images = state.image_store();
    let page = page.map(|view| RecipeResponse::new(view, &images));
    Ok(Json(PaginatedResponse::new(
        page,
        request,
        &state.public_base_url,
        &uri,
    )))
}

// ── GET /api/recipes/{id} ────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let resp = recipe_response(&state, identity.map(|i| i.user_id), recipe_id).await?;
    Ok(Json(resp))
}

// ── POST /api/recipes ────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let Json(body) = body.map_err(invalid_body)?;
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
    };
    let recipe_id = uc
        .execute(
            identity.user_id,
            CreateRecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                tags: body.tags,
                ingredients: into_lines(body.ingredients),
            },
        )
        .await?;

    let resp = recipe_response(&state, Some(identity.user_id), recipe_id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

// ── PATCH /api/recipes/{id} ──────────────────────────────────────────────────

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    body: Result<Json<UpdateRecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(body) = body.map_err(invalid_body)?;
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
    };
    uc.execute(
        identity,
        recipe_id,
        UpdateRecipeInput {
            name: body.name,
            text: body.text,
            cooking_time: body.cooking_time,
            image: body.image,
            tags: body.tags,
            ingredients: body.ingredients.map(into_lines),
        },
    )
    .await?;

    let resp = recipe_response(&state, Some(identity.user_id), recipe_id).await?;
    Ok(Json(resp))
}

// ── DELETE /api/recipes/{id} ─────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        images: state.image_store(),
    };
    uc.execute(identity, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/recipes/{id}/ingredients/{ingredient_id} ─────────────────────

pub async fn delete_recipe_ingredient(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((recipe_id, ingredient_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let uc = DeleteRecipeIngredientUseCase {
        recipes: state.recipe_repo(),
    };
    uc.execute(identity, recipe_id, ingredient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
