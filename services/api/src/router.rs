use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use foodgram_core::health::healthz;
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    catalog::{get_ingredient, get_tag, list_ingredients, list_tags},
    health::readyz,
    mark::{add_favorite, add_to_shopping_cart, remove_favorite, remove_from_shopping_cart},
    recipe::{
        create_recipe, delete_recipe, delete_recipe_ingredient, get_recipe, list_recipes,
        update_recipe,
    },
    shopping_list::download_shopping_cart,
    short_link::{follow_short_link, get_short_link},
    subscription::{list_subscriptions, subscribe, unsubscribe},
    user::{delete_avatar, get_me, get_user, list_users, register_user, set_avatar},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/api/users", post(register_user).get(list_users))
        .route("/api/users/me", get(get_me))
        .route("/api/users/me/avatar", put(set_avatar).delete(delete_avatar))
        .route("/api/users/{id}", get(get_user))
        // Subscriptions
        .route("/api/users/subscriptions", get(list_subscriptions))
        .route("/api/users/{id}/subscribe", post(subscribe).delete(unsubscribe))
        // Catalog
        .route("/api/tags", get(list_tags))
        .route("/api/tags/{id}", get(get_tag))
        .route("/api/ingredients", get(list_ingredients))
        .route("/api/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/download_shopping_cart",
            get(download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/api/recipes/{id}/ingredients/{ingredient_id}",
            delete(delete_recipe_ingredient),
        )
        // Marks
        .route(
            "/api/recipes/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        // Short links
        .route("/api/recipes/{id}/get-link", get(get_short_link))
        .route("/s/{code}", get(follow_short_link))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}
