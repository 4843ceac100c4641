//! JSON projections returned by the handlers.

use axum::http::Uri;
use serde::Serialize;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::ImageStore;
use crate::domain::types::{
    Ingredient, Recipe, RecipeLine, RecipeView, SubscriptionView, Tag, UserView,
};

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// Ingredient line inside a recipe; `id` is the ingredient id.
#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeLine> for RecipeIngredientResponse {
    fn from(line: RecipeLine) -> Self {
        Self {
            id: line.ingredient.id,
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserProfileResponse {
    pub fn new(view: UserView, images: &impl ImageStore) -> Self {
        let user = view.user;
        Self {
            avatar: user.avatar.as_deref().map(|path| images.url(path)),
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed: view.is_subscribed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserProfileResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeResponse {
    pub fn new(view: RecipeView, images: &impl ImageStore) -> Self {
        let recipe = view.details.recipe;
        Self {
            id: recipe.id,
            tags: view.details.tags.into_iter().map(TagResponse::from).collect(),
            author: UserProfileResponse::new(view.author, images),
            ingredients: view
                .details
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: recipe.name,
            image: images.url(&recipe.image),
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Compact recipe card used by marks and subscriptions.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl RecipeSummaryResponse {
    pub fn new(recipe: Recipe, images: &impl ImageStore) -> Self {
        Self {
            id: recipe.id,
            image: images.url(&recipe.image),
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserProfileResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl SubscriptionResponse {
    pub fn new(view: SubscriptionView, images: &impl ImageStore) -> Self {
        let author = UserView {
            user: view.author,
            is_subscribed: true,
        };
        Self {
            author: UserProfileResponse::new(author, images),
            recipes: view
                .recipes
                .into_iter()
                .map(|r| RecipeSummaryResponse::new(r, images))
                .collect(),
            recipes_count: view.recipes_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

// ── Pagination envelope ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// `next`/`previous` repeat the request URI with `page` rewritten.
    pub fn new(page: Page<T>, request: PageRequest, base_url: &str, uri: &Uri) -> Self {
        let request = request.clamped();
        let next = request
            .has_next(page.count)
            .then(|| page_link(base_url, uri, Some(request.page + 1)));
        let previous = request.has_previous().then(|| {
            let target = request.page - 1;
            page_link(base_url, uri, (target > 1).then_some(target))
        });
        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}

/// Request URI with its `page` parameter replaced; `None` drops it.
fn page_link(base_url: &str, uri: &Uri, page: Option<u32>) -> String {
    let mut params: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "page" && !pair.starts_with("page="))
        .map(str::to_owned)
        .collect();
    if let Some(page) = page {
        params.push(format!("page={page}"));
    }
    if params.is_empty() {
        format!("{base_url}{}", uri.path())
    } else {
        format!("{base_url}{}?{}", uri.path(), params.join("&"))
    }
}
