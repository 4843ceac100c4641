//! Read-model assembly shared by recipe and user use cases.

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;

use crate::domain::repository::{
    RecipeMarkRepository, RecipeRepository, SubscriptionRepository, UserRepository,
};
use crate::domain::types::{MarkKind, Recipe, RecipeView, User, UserView};
use crate::error::ApiError;

/// Attach details, authors and the viewer's flags to `recipes`, keeping order.
pub async fn recipe_views<R, U, M, S>(
    recipes_repo: &R,
    users: &U,
    marks: &M,
    subscriptions: &S,
    viewer: Option<i32>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeView>, ApiError>
where
    R: RecipeRepository,
    U: UserRepository,
    M: RecipeMarkRepository,
    S: SubscriptionRepository,
{
    if recipes.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let details = recipes_repo.load_details(recipes).await?;
    let authors: HashMap<i32, User> = users
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let (favorited, in_cart, subscribed) = match viewer {
        Some(viewer) => (
            marks
                .marked_among(MarkKind::Favorite, viewer, &recipe_ids)
                .await?,
            marks
                .marked_among(MarkKind::ShoppingCart, viewer, &recipe_ids)
                .await?,
            subscriptions.subscribed_among(viewer, &author_ids).await?,
        ),
        None => (HashSet::new(), HashSet::new(), HashSet::new()),
    };

    details
        .into_iter()
        .map(|details| {
            let recipe = &details.recipe;
            let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                anyhow!("author {} of recipe {} not found", recipe.author_id, recipe.id)
            })?;
            Ok(RecipeView {
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                author: UserView {
                    is_subscribed: subscribed.contains(&author.id),
                    user: author,
                },
                details,
            })
        })
        .collect()
}

/// Pair each user with whether the viewer follows them.
pub async fn user_views<S: SubscriptionRepository>(
    subscriptions: &S,
    viewer: Option<i32>,
    users: Vec<User>,
) -> Result<Vec<UserView>, ApiError> {
    let subscribed = match viewer {
        Some(viewer) => {
            let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
            subscriptions.subscribed_among(viewer, &ids).await?
        }
        None => HashSet::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserView {
            is_subscribed: subscribed.contains(&user.id),
            user,
        })
        .collect())
}
