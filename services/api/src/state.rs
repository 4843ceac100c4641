use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use foodgram_domain::short_code::ShortCodeCodec;

use crate::config::ApiConfig;
use crate::infra::db::{
    DbIngredientRepository, DbRecipeMarkRepository, DbRecipeRepository, DbShoppingListRepository,
    DbSubscriptionRepository, DbTagRepository, DbUserRepository,
};
use crate::infra::storage::LocalImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub codec: Arc<ShortCodeCodec>,
    pub public_base_url: String,
    pub media_root: PathBuf,
    pub media_url: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &ApiConfig) -> Self {
        Self {
            db,
            codec: Arc::new(ShortCodeCodec::new(&config.short_link_salt)),
            public_base_url: config.public_base_url.clone(),
            media_root: config.media_root.clone(),
            media_url: config.media_url.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn mark_repo(&self) -> DbRecipeMarkRepository {
        DbRecipeMarkRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn shopping_list_repo(&self) -> DbShoppingListRepository {
        DbShoppingListRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> LocalImageStore {
        LocalImageStore {
            root: self.media_root.clone(),
            base_url: format!("{}{}", self.public_base_url, self.media_url),
        }
    }
}
