use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{SubscriptionView, User};
use crate::error::ApiError;

/// Author profile plus a preview of at most `recipes_limit` newest recipes.
async fn subscription_view<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<SubscriptionView, ApiError> {
    let preview = recipes.list_by_author(author.id, recipes_limit).await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(SubscriptionView {
        author,
        recipes: preview,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    pub users: U,
    pub subscriptions: S,
    pub recipes: R,
}

impl<U, S, R> SubscribeUseCase<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    pub async fn execute(
        &self,
        subscriber_id: i32,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<SubscriptionView, ApiError> {
        if subscriber_id == author_id {
            return Err(ApiError::validation(
                "author",
                "you cannot subscribe to yourself",
            ));
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !self.subscriptions.add(subscriber_id, author_id).await? {
            return Err(ApiError::SubscriptionAlreadyExists);
        }
        tracing::info!(subscriber_id, author_id, "subscription created");
        subscription_view(&self.recipes, author, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> UnsubscribeUseCase<U, S> {
    pub async fn execute(&self, subscriber_id: i32, author_id: i32) -> Result<(), ApiError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if !self.subscriptions.remove(subscriber_id, author_id).await? {
            return Err(ApiError::SubscriptionNotFound);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<S: SubscriptionRepository, R: RecipeRepository> {
    pub subscriptions: S,
    pub recipes: R,
}

impl<S: SubscriptionRepository, R: RecipeRepository> ListSubscriptionsUseCase<S, R> {
    pub async fn execute(
        &self,
        subscriber_id: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<SubscriptionView>, ApiError> {
        let authors = self.subscriptions.list_authors(subscriber_id, page).await?;
        let mut views = Vec::with_capacity(authors.items.len());
        for author in authors.items {
            views.push(subscription_view(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page::new(views, authors.count))
    }
}
