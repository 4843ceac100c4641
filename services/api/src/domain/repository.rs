#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use foodgram_domain::image::ImagePayload;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::shopping_list::IngredientAmount as ShoppingLine;

use crate::domain::types::{
    ImageFolder, Ingredient, MarkKind, NewUser, Recipe, RecipeDetails, RecipeDraft, RecipeFilter,
    RecipeReplacement, Tag, User,
};
use crate::error::ApiError;

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Insert a user. A unique-constraint race on email or username surfaces
    /// as a validation error on that field.
    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError>;

    async fn set_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), ApiError>;
}

/// Tag catalog.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError>;
}

/// Ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// All ingredients, or those whose name starts with `name_prefix`
    /// (case-insensitive).
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError>;
}

/// Recipe aggregate storage.
pub trait RecipeRepository: Send + Sync {
    /// Insert the recipe row, its tag links and ingredient lines in one
    /// transaction. Returns the new recipe id.
    async fn create(&self, draft: &RecipeDraft) -> Result<i32, ApiError>;

    /// Update the row and swap its whole tag and ingredient sets in one
    /// transaction. Returns `false` if the recipe does not exist.
    async fn replace(&self, id: i32, replacement: &RecipeReplacement) -> Result<bool, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;

    async fn find(&self, id: i32) -> Result<Option<Recipe>, ApiError>;

    /// Newest first.
    async fn list(&self, filter: &RecipeFilter, page: PageRequest)
    -> Result<Page<Recipe>, ApiError>;

    /// Attach tags and ingredient lines, keeping the input order.
    async fn load_details(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetails>, ApiError>;

    /// Newest first, at most `limit` when given.
    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, ApiError>;

    async fn count_by_author(&self, author_id: i32) -> Result<u64, ApiError>;

    /// Store `code` unless the recipe already has one. Returns the stored code.
    async fn assign_short_code(&self, id: i32, code: &str) -> Result<String, ApiError>;

    async fn find_by_short_code(&self, code: &str) -> Result<Option<Recipe>, ApiError>;

    /// Delete one ingredient line while holding a lock on the recipe's lines.
    /// Fails with `RecipeIngredientNotFound` or `LastRecipeIngredient`.
    async fn delete_ingredient_line(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> Result<(), ApiError>;
}

/// Favorite and shopping-cart rows, unique per (user, recipe).
pub trait RecipeMarkRepository: Send + Sync {
    /// Returns `false` if the pair already exists.
    async fn add(&self, kind: MarkKind, user_id: i32, recipe_id: i32) -> Result<bool, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, kind: MarkKind, user_id: i32, recipe_id: i32)
    -> Result<bool, ApiError>;

    /// Subset of `recipe_ids` the user has marked.
    async fn marked_among(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError>;
}

/// Subscriptions, unique per (subscriber, author).
pub trait SubscriptionRepository: Send + Sync {
    /// Returns `false` if the pair already exists.
    async fn add(&self, subscriber_id: i32, author_id: i32) -> Result<bool, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, subscriber_id: i32, author_id: i32) -> Result<bool, ApiError>;

    /// Subset of `author_ids` the subscriber follows.
    async fn subscribed_among(
        &self,
        subscriber_id: i32,
        author_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError>;

    /// Authors the subscriber follows.
    async fn list_authors(
        &self,
        subscriber_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError>;
}

/// Read side of the shopping-list export.
pub trait ShoppingListRepository: Send + Sync {
    /// Every ingredient line of every recipe in the user's cart, in cart order
    /// then authored line order.
    async fn cart_lines(&self, user_id: i32) -> Result<Vec<ShoppingLine>, ApiError>;
}

/// File storage for uploaded images.
pub trait ImageStore: Send + Sync {
    /// Returns the storage path of the written file.
    async fn save(&self, folder: ImageFolder, image: &ImagePayload) -> Result<String, ApiError>;

    /// Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), ApiError>;

    /// Public URL of a stored file.
    fn url(&self, path: &str) -> String;
}
