use std::sync::Arc;

use foodgram_domain::short_code::ShortCodeCodec;

use crate::domain::repository::RecipeRepository;
use crate::error::ApiError;

// ── GetShortLink ─────────────────────────────────────────────────────────────

pub struct GetShortLinkUseCase<R: RecipeRepository> {
    pub recipes: R,
    pub codec: Arc<ShortCodeCodec>,
}

impl<R: RecipeRepository> GetShortLinkUseCase<R> {
    /// Short code of the recipe, assigned on first request.
    pub async fn execute(&self, recipe_id: i32) -> Result<String, ApiError> {
        let recipe = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if let Some(code) = recipe.short_code {
            return Ok(code);
        }
        let code = self.codec.encode(recipe.id);
        self.recipes.assign_short_code(recipe.id, &code).await
    }
}

// ── ResolveShortLink ─────────────────────────────────────────────────────────

pub struct ResolveShortLinkUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ResolveShortLinkUseCase<R> {
    /// Recipe id behind a short code.
    pub async fn execute(&self, code: &str) -> Result<i32, ApiError> {
        self.recipes
            .find_by_short_code(code)
            .await?
            .map(|recipe| recipe.id)
            .ok_or(ApiError::ShortLinkNotFound)
    }
}
