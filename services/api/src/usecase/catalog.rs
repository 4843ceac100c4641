use crate::domain::repository::{IngredientRepository, TagRepository};
use crate::domain::types::{Ingredient, Tag};
use crate::error::ApiError;

// ── Tags ─────────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> ListTagsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tag>, ApiError> {
        self.tags.list().await
    }
}

pub struct GetTagUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> GetTagUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Tag, ApiError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TagNotFound)
    }
}

// ── Ingredients ──────────────────────────────────────────────────────────────

pub struct ListIngredientsUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> ListIngredientsUseCase<I> {
    /// Blank prefixes list everything.
    pub async fn execute(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
        self.ingredients.list(prefix).await
    }
}

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, ApiError> {
        self.ingredients
            .find_by_id(id)
            .await?
            .ok_or(ApiError::IngredientNotFound)
    }
}
