use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use foodgram_domain::image::ImageError;

use crate::domain::types::MarkKind;

/// API error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("recipe is already in {0}")]
    AlreadyMarked(MarkKind),
    #[error("already subscribed to this user")]
    SubscriptionAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("ingredient is not part of this recipe")]
    RecipeIngredientNotFound,
    #[error("short link not found")]
    ShortLinkNotFound,
    #[error("recipe is not in {0}")]
    NotMarked(MarkKind),
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("a recipe must keep at least one ingredient")]
    LastRecipeIngredient,
    #[error("shopping cart is empty")]
    EmptyShoppingCart,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Invalid image payload submitted in `field`.
    pub fn image(field: &str, err: ImageError) -> Self {
        Self::validation(field, err.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::AlreadyMarked(MarkKind::Favorite) => "ALREADY_FAVORITED",
            Self::AlreadyMarked(MarkKind::ShoppingCart) => "ALREADY_IN_SHOPPING_CART",
            Self::SubscriptionAlreadyExists => "SUBSCRIPTION_ALREADY_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::RecipeIngredientNotFound => "RECIPE_INGREDIENT_NOT_FOUND",
            Self::ShortLinkNotFound => "SHORT_LINK_NOT_FOUND",
            Self::NotMarked(MarkKind::Favorite) => "NOT_FAVORITED",
            Self::NotMarked(MarkKind::ShoppingCart) => "NOT_IN_SHOPPING_CART",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::LastRecipeIngredient => "LAST_RECIPE_INGREDIENT",
            Self::EmptyShoppingCart => "EMPTY_SHOPPING_CART",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::LastRecipeIngredient | Self::EmptyShoppingCart => {
                StatusCode::BAD_REQUEST
            }
            Self::AlreadyMarked(_) | Self::SubscriptionAlreadyExists => StatusCode::CONFLICT,
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::RecipeIngredientNotFound
            | Self::ShortLinkNotFound
            | Self::NotMarked(_)
            | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation { ref field, .. } = self {
            body["field"] = serde_json::Value::String(field.clone());
        }
        (self.status(), axum::Json(body)).into_response()
    }
}
