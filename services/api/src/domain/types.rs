use std::fmt;

use chrono::{DateTime, Utc};

/// Registered user. Passwords and tokens belong to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Storage path of the avatar image.
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Recipe row without its tags and ingredient lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Storage path of the recipe picture.
    pub image: String,
    pub short_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One ingredient line as submitted by the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// One ingredient line joined with its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLine {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Recipe aggregate: row, tags, and ingredient lines in authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeLine>,
}

/// Validated input for a new recipe, image already stored.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Validated full replacement of a recipe's tags and lines. Scalar fields
/// left as `None` keep their stored value.
#[derive(Debug, Clone)]
pub struct RecipeReplacement {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Recipe list filters. The mark filters hold the id of the user whose marks
/// restrict the list.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<i32>,
    /// Any-of match on tag slugs.
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<i32>,
    pub in_cart_of: Option<i32>,
}

/// The two per-user recipe flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Favorite,
    ShoppingCart,
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorite => f.write_str("favorites"),
            Self::ShoppingCart => f.write_str("shopping cart"),
        }
    }
}

/// Folder an uploaded image is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Recipes,
    Avatars,
}

impl ImageFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recipes => "recipes/images",
            Self::Avatars => "users/images",
        }
    }
}

// ── Read models ──────────────────────────────────────────────────────────────

/// A user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub user: User,
    pub is_subscribed: bool,
}

/// A recipe aggregate as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub details: RecipeDetails,
    pub author: UserView,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionView {
    pub author: User,
    pub recipes: Vec<Recipe>,
    pub recipes_count: u64,
}
