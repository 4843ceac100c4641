//! Favorite and shopping-cart toggles.

use crate::domain::repository::{RecipeMarkRepository, RecipeRepository};
use crate::domain::types::{MarkKind, Recipe};
use crate::error::ApiError;

// ── AddMark ──────────────────────────────────────────────────────────────────

pub struct AddMarkUseCase<R: RecipeRepository, M: RecipeMarkRepository> {
    pub recipes: R,
    pub marks: M,
}

impl<R: RecipeRepository, M: RecipeMarkRepository> AddMarkUseCase<R, M> {
    /// Returns the marked recipe for the summary response.
    pub async fn execute(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<Recipe, ApiError> {
        let recipe = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !self.marks.add(kind, user_id, recipe_id).await? {
            return Err(ApiError::AlreadyMarked(kind));
        }
        Ok(recipe)
    }
}

// ── RemoveMark ───────────────────────────────────────────────────────────────

pub struct RemoveMarkUseCase<R: RecipeRepository, M: RecipeMarkRepository> {
    pub recipes: R,
    pub marks: M,
}

impl<R: RecipeRepository, M: RecipeMarkRepository> RemoveMarkUseCase<R, M> {
    pub async fn execute(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<(), ApiError> {
        if self.recipes.find(recipe_id).await?.is_none() {
            return Err(ApiError::RecipeNotFound);
        }
        if !self.marks.remove(kind, user_id, recipe_id).await? {
            return Err(ApiError::NotMarked(kind));
        }
        Ok(())
    }
}
