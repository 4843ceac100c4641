use std::collections::HashSet;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::image::ImagePayload;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    ImageStore, IngredientRepository, RecipeMarkRepository, RecipeRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    ImageFolder, IngredientAmount, RecipeDraft, RecipeFilter, RecipeReplacement, RecipeView,
};
use crate::domain::validation::{
    validate_cooking_time, validate_ingredient_amounts, validate_recipe_name,
    validate_recipe_text, validate_tag_ids,
};
use crate::error::ApiError;
use crate::usecase::view::recipe_views;

/// Every referenced tag and ingredient must exist in the catalog.
async fn ensure_catalog_refs<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    tag_ids: &[i32],
    lines: &[IngredientAmount],
) -> Result<(), ApiError> {
    let known_tags: HashSet<i32> = tags
        .find_by_ids(tag_ids)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();
    if let Some(missing) = tag_ids.iter().find(|id| !known_tags.contains(id)) {
        return Err(ApiError::validation(
            "tags",
            format!("tag {missing} does not exist"),
        ));
    }

    let ingredient_ids: Vec<i32> = lines.iter().map(|l| l.ingredient_id).collect();
    let known_ingredients: HashSet<i32> = ingredients
        .find_by_ids(&ingredient_ids)
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect();
    if let Some(missing) = ingredient_ids
        .iter()
        .find(|id| !known_ingredients.contains(id))
    {
        return Err(ApiError::validation(
            "ingredients",
            format!("ingredient {missing} does not exist"),
        ));
    }
    Ok(())
}

/// Remove an image that is no longer referenced. Failures only get logged.
async fn discard_image<S: ImageStore>(images: &S, path: &str) {
    if let Err(e) = images.delete(path).await {
        tracing::warn!(error = %e, path, "failed to delete image");
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// `data:image/...;base64,...`
    pub image: String,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

pub struct CreateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
}

impl<R, T, I, S> CreateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    /// Returns the id of the new recipe.
    pub async fn execute(&self, author_id: i32, input: CreateRecipeInput) -> Result<i32, ApiError> {
        validate_recipe_name(&input.name)?;
        validate_recipe_text(&input.text)?;
        validate_cooking_time(input.cooking_time)?;
        validate_tag_ids(&input.tags)?;
        validate_ingredient_amounts(&input.ingredients)?;
        let image =
            ImagePayload::from_data_uri(&input.image).map_err(|e| ApiError::image("image", e))?;
        ensure_catalog_refs(&self.tags, &self.ingredients, &input.tags, &input.ingredients)
            .await?;

        let image_path = self.images.save(ImageFolder::Recipes, &image).await?;
        let draft = RecipeDraft {
            author_id,
            name: input.name,
            text: input.text,
            cooking_time: input.cooking_time,
            image: image_path,
            tag_ids: input.tags,
            ingredients: input.ingredients,
        };
        match self.recipes.create(&draft).await {
            Ok(id) => {
                tracing::info!(recipe_id = id, author_id, "recipe created");
                Ok(id)
            }
            Err(e) => {
                discard_image(&self.images, &draft.image).await;
                Err(e)
            }
        }
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeInput {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    /// Required: the whole tag set is replaced.
    pub tags: Option<Vec<i32>>,
    /// Required: the whole ingredient set is replaced.
    pub ingredients: Option<Vec<IngredientAmount>>,
}

pub struct UpdateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
}

impl<R, T, I, S> UpdateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub async fn execute(
        &self,
        actor: IdentityHeaders,
        recipe_id: i32,
        input: UpdateRecipeInput,
    ) -> Result<(), ApiError> {
        let current = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !actor.can_modify(current.author_id) {
            return Err(ApiError::Forbidden);
        }

        let tag_ids = input
            .tags
            .ok_or_else(|| ApiError::validation("tags", "tags are required"))?;
        let lines = input
            .ingredients
            .ok_or_else(|| ApiError::validation("ingredients", "ingredients are required"))?;
        validate_tag_ids(&tag_ids)?;
        validate_ingredient_amounts(&lines)?;
        if let Some(ref name) = input.name {
            validate_recipe_name(name)?;
        }
        if let Some(ref text) = input.text {
            validate_recipe_text(text)?;
        }
        if let Some(minutes) = input.cooking_time {
            validate_cooking_time(minutes)?;
        }
        let image = input
            .image
            .as_deref()
            .map(ImagePayload::from_data_uri)
            .transpose()
            .map_err(|e| ApiError::image("image", e))?;
        ensure_catalog_refs(&self.tags, &self.ingredients, &tag_ids, &lines).await?;

        let new_image = match image {
            Some(ref payload) => Some(self.images.save(ImageFolder::Recipes, payload).await?),
            None => None,
        };
        let replacement = RecipeReplacement {
            name: input.name,
            text: input.text,
            cooking_time: input.cooking_time,
            image: new_image.clone(),
            tag_ids,
            ingredients: lines,
        };
        let outcome = self.recipes.replace(recipe_id, &replacement).await;
        match (outcome, new_image) {
            (Ok(true), Some(_)) => {
                discard_image(&self.images, &current.image).await;
                Ok(())
            }
            (Ok(true), None) => Ok(()),
            (Ok(false), new_image) => {
                if let Some(path) = new_image {
                    discard_image(&self.images, &path).await;
                }
                Err(ApiError::RecipeNotFound)
            }
            (Err(e), new_image) => {
                if let Some(path) = new_image {
                    discard_image(&self.images, &path).await;
                }
                Err(e)
            }
        }
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, S: ImageStore> {
    pub recipes: R,
    pub images: S,
}

impl<R: RecipeRepository, S: ImageStore> DeleteRecipeUseCase<R, S> {
    pub async fn execute(&self, actor: IdentityHeaders, recipe_id: i32) -> Result<(), ApiError> {
        let recipe = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !actor.can_modify(recipe.author_id) {
            return Err(ApiError::Forbidden);
        }
        if !self.recipes.delete(recipe_id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        discard_image(&self.images, &recipe.image).await;
        Ok(())
    }
}

// ── DeleteRecipeIngredient ───────────────────────────────────────────────────

pub struct DeleteRecipeIngredientUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeIngredientUseCase<R> {
    pub async fn execute(
        &self,
        actor: IdentityHeaders,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> Result<(), ApiError> {
        let recipe = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !actor.can_modify(recipe.author_id) {
            return Err(ApiError::Forbidden);
        }
        self.recipes
            .delete_ingredient_line(recipe_id, ingredient_id)
            .await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, U, M, S>
where
    R: RecipeRepository,
    U: UserRepository,
    M: RecipeMarkRepository,
    S: SubscriptionRepository,
{
    pub recipes: R,
    pub users: U,
    pub marks: M,
    pub subscriptions: S,
}

impl<R, U, M, S> GetRecipeUseCase<R, U, M, S>
where
    R: RecipeRepository,
    U: UserRepository,
    M: RecipeMarkRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(&self, viewer: Option<i32>, recipe_id: i32) -> Result<RecipeView, ApiError> {
        let recipe = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        let mut views = recipe_views(
            &self.recipes,
            &self.users,
            &self.marks,
            &self.subscriptions,
            viewer,
            vec![recipe],
        )
        .await?;
        views.pop().ok_or(ApiError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Raw list filters as sent by the client.
#[derive(Debug, Clone, Default)]
pub struct ListRecipesInput {
    pub author_id: Option<i32>,
    pub tag_slugs: Vec<String>,
    pub only_favorited: bool,
    pub only_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<R, U, M, S>
where
    R: RecipeRepository,
    U: UserRepository,
    M: RecipeMarkRepository,
    S: SubscriptionRepository,
{
    pub recipes: R,
    pub users: U,
    pub marks: M,
    pub subscriptions: S,
}

impl<R, U, M, S> ListRecipesUseCase<R, U, M, S>
where
    R: RecipeRepository,
    U: UserRepository,
    M: RecipeMarkRepository,
    S: SubscriptionRepository,
{
    /// The mark filters only apply to an authenticated viewer.
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        input: ListRecipesInput,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, ApiError> {
        let filter = RecipeFilter {
            author_id: input.author_id,
            tag_slugs: input.tag_slugs,
            favorited_by: viewer.filter(|_| input.only_favorited),
            in_cart_of: viewer.filter(|_| input.only_in_shopping_cart),
        };
        let page = self.recipes.list(&filter, page).await?;
        let views = recipe_views(
            &self.recipes,
            &self.users,
            &self.marks,
            &self.subscriptions,
            viewer,
            page.items,
        )
        .await?;
        Ok(Page::new(views, page.count))
    }
}
