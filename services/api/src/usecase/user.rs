use foodgram_domain::image::ImagePayload;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{ImageStore, SubscriptionRepository, UserRepository};
use crate::domain::types::{ImageFolder, NewUser, User, UserView};
use crate::domain::validation::{validate_email, validate_person_name, validate_username};
use crate::error::ApiError;
use crate::usecase::view::user_views;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, ApiError> {
        let email = input.email.trim().to_owned();
        validate_email(&email)?;
        validate_username(&input.username)?;
        validate_person_name("first_name", &input.first_name)?;
        validate_person_name("last_name", &input.last_name)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::validation(
                "email",
                "a user with this email already exists",
            ));
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(ApiError::validation(
                "username",
                "a user with this username already exists",
            ));
        }
        let user = self
            .users
            .create(&NewUser {
                email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

// ── GetUserProfile ───────────────────────────────────────────────────────────

pub struct GetUserProfileUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> GetUserProfileUseCase<U, S> {
    pub async fn execute(&self, viewer: Option<i32>, user_id: i32) -> Result<UserView, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let mut views = user_views(&self.subscriptions, viewer, vec![user]).await?;
        views.pop().ok_or(ApiError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> ListUsersUseCase<U, S> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<UserView>, ApiError> {
        let page = self.users.list(page).await?;
        let views = user_views(&self.subscriptions, viewer, page.items).await?;
        Ok(Page::new(views, page.count))
    }
}

// ── SetAvatar ────────────────────────────────────────────────────────────────

pub struct SetAvatarUseCase<U: UserRepository, S: ImageStore> {
    pub users: U,
    pub images: S,
}

impl<U: UserRepository, S: ImageStore> SetAvatarUseCase<U, S> {
    /// Store a new avatar and drop the previous one. Returns the storage path.
    pub async fn execute(&self, user_id: i32, data_uri: &str) -> Result<String, ApiError> {
        let payload =
            ImagePayload::from_data_uri(data_uri).map_err(|e| ApiError::image("avatar", e))?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let path = self.images.save(ImageFolder::Avatars, &payload).await?;
        if let Err(e) = self.users.set_avatar(user_id, Some(&path)).await {
            if let Err(cleanup) = self.images.delete(&path).await {
                tracing::warn!(error = %cleanup, path, "failed to delete orphaned avatar");
            }
            return Err(e);
        }
        if let Some(old) = user.avatar {
            if let Err(e) = self.images.delete(&old).await {
                tracing::warn!(error = %e, path = %old, "failed to delete previous avatar");
            }
        }
        Ok(path)
    }
}

// ── DeleteAvatar ─────────────────────────────────────────────────────────────

pub struct DeleteAvatarUseCase<U: UserRepository, S: ImageStore> {
    pub users: U,
    pub images: S,
}

impl<U: UserRepository, S: ImageStore> DeleteAvatarUseCase<U, S> {
    pub async fn execute(&self, user_id: i32) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let Some(old) = user.avatar else {
            return Ok(());
        };
        self.users.set_avatar(user_id, None).await?;
        if let Err(e) = self.images.delete(&old).await {
            tracing::warn!(error = %e, path = %old, "failed to delete avatar");
        }
        Ok(())
    }
}
