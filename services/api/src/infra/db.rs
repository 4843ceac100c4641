use std::collections::{HashMap, HashSet};

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, Statement,
    TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};

use foodgram_api_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    subscriptions, tags, users,
};
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::shopping_list::IngredientAmount as ShoppingLine;

use crate::domain::repository::{
    IngredientRepository, RecipeMarkRepository, RecipeRepository, ShoppingListRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    Ingredient, IngredientAmount, MarkKind, NewUser, Recipe, RecipeDetails, RecipeDraft,
    RecipeFilter, RecipeLine, RecipeReplacement, Tag, User,
};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Escape `%`, `_` and `\` for a LIKE pattern.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let inserted = users::ActiveModel {
            id: NotSet,
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            avatar: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    let field = if detail.contains("email") {
                        "email"
                    } else {
                        "username"
                    };
                    Err(ApiError::validation(
                        field,
                        format!("a user with this {field} already exists"),
                    ))
                }
                _ => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        let page = page.clamped();
        let query = users::Entity::find();
        let count = query.clone().count(&self.db).await.context("count users")?;
        let models = query
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            count,
        ))
    }

    async fn set_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), ApiError> {
        users::Entity::update_many()
            .col_expr(users::Column::Avatar, Expr::value(avatar.map(str::to_owned)))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set user avatar")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

// ── Catalog repositories ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError> {
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name))).like(pattern),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError> {
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

/// Insert tag links and ingredient lines in the given order.
async fn insert_links<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
    lines: &[IngredientAmount],
) -> Result<(), DbErr> {
    recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag_id),
    }))
    .exec_without_returning(conn)
    .await?;
    recipe_ingredients::Entity::insert_many(lines.iter().map(|line| {
        recipe_ingredients::ActiveModel {
            id: NotSet,
            recipe_id: Set(recipe_id),
            ingredient_id: Set(line.ingredient_id),
            amount: Set(line.amount),
        }
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

enum LineDeletion {
    Deleted,
    NotFound,
    LastLine,
}

impl RecipeRepository for DbRecipeRepository {
    async fn create(&self, draft: &RecipeDraft) -> Result<i32, ApiError> {
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let draft = draft.clone();
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        id: NotSet,
                        author_id: Set(draft.author_id),
                        name: Set(draft.name),
                        text: Set(draft.text),
                        cooking_time: Set(draft.cooking_time),
                        image: Set(draft.image),
                        short_code: Set(None),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    insert_links(txn, recipe.id, &draft.tag_ids, &draft.ingredients).await?;
                    Ok(recipe.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(id)
    }

    async fn replace(&self, id: i32, replacement: &RecipeReplacement) -> Result<bool, ApiError> {
        let found = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let replacement = replacement.clone();
                Box::pin(async move {
                    let Some(current) = recipes::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(false);
                    };
                    let mut recipe = current.into_active_model();
                    if let Some(name) = replacement.name {
                        recipe.name = Set(name);
                    }
                    if let Some(text) = replacement.text {
                        recipe.text = Set(text);
                    }
                    if let Some(minutes) = replacement.cooking_time {
                        recipe.cooking_time = Set(minutes);
                    }
                    if let Some(image) = replacement.image {
                        recipe.image = Set(image);
                    }
                    if recipe.is_changed() {
                        recipe.update(txn).await?;
                    }

                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_links(txn, id, &replacement.tag_ids, &replacement.ingredients).await?;
                    Ok(true)
                })
            })
            .await
            .context("replace recipe")?;
        Ok(found)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn find(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        let page = page.clamped();
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tag_slugs.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(Page::new(
            models.into_iter().map(recipe_from_model).collect(),
            count,
        ))
    }

    async fn load_details(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetails>, ApiError> {
        let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();

        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(tags::Entity)
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("load recipe tags")?;
        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }

        let line_rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .order_by_asc(recipe_ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("load recipe ingredient lines")?;
        let mut lines_by_recipe: HashMap<i32, Vec<RecipeLine>> = HashMap::new();
        for (line, ingredient) in line_rows {
            if let Some(ingredient) = ingredient {
                lines_by_recipe
                    .entry(line.recipe_id)
                    .or_default()
                    .push(RecipeLine {
                        ingredient: ingredient_from_model(ingredient),
                        amount: line.amount,
                    });
            }
        }

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeDetails {
                tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
                ingredients: lines_by_recipe.remove(&recipe.id).unwrap_or_default(),
                recipe,
            })
            .collect())
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, ApiError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, ApiError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }

    async fn assign_short_code(&self, id: i32, code: &str) -> Result<String, ApiError> {
        recipes::Entity::update_many()
            .col_expr(recipes::Column::ShortCode, Expr::value(code))
            .filter(recipes::Column::Id.eq(id))
            .filter(recipes::Column::ShortCode.is_null())
            .exec(&self.db)
            .await
            .context("assign short code")?;
        let stored: Option<Option<String>> = recipes::Entity::find_by_id(id)
            .select_only()
            .column(recipes::Column::ShortCode)
            .into_tuple()
            .one(&self.db)
            .await
            .context("read short code")?;
        match stored {
            Some(Some(code)) => Ok(code),
            Some(None) => Err(anyhow!("short code of recipe {id} was not stored").into()),
            None => Err(ApiError::RecipeNotFound),
        }
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<Recipe>, ApiError> {
        let model = recipes::Entity::find()
            .filter(recipes::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .context("find recipe by short code")?;
        Ok(model.map(recipe_from_model))
    }

    async fn delete_ingredient_line(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> Result<(), ApiError> {
        let outcome = self
            .db
            .transaction::<_, LineDeletion, DbErr>(|txn| {
                Box::pin(async move {
                    let lines = recipe_ingredients::Entity::find()
                        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
                        .order_by_asc(recipe_ingredients::Column::Id)
                        .lock_exclusive()
                        .all(txn)
                        .await?;
                    let Some(line) = lines.iter().find(|l| l.ingredient_id == ingredient_id)
                    else {
                        return Ok(LineDeletion::NotFound);
                    };
                    if lines.len() <= 1 {
                        return Ok(LineDeletion::LastLine);
                    }
                    recipe_ingredients::Entity::delete_by_id(line.id)
                        .exec(txn)
                        .await?;
                    Ok(LineDeletion::Deleted)
                })
            })
            .await
            .context("delete recipe ingredient line")?;
        match outcome {
            LineDeletion::Deleted => Ok(()),
            LineDeletion::NotFound => Err(ApiError::RecipeIngredientNotFound),
            LineDeletion::LastLine => Err(ApiError::LastRecipeIngredient),
        }
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        text: model.text,
        cooking_time: model.cooking_time,
        image: model.image,
        short_code: model.short_code,
        created_at: model.created_at,
    }
}

// ── Recipe mark repository ───────────────────────────────────────────────────

/// Favorites and shopping carts. Both tables share one layout.
#[derive(Clone)]
pub struct DbRecipeMarkRepository {
    pub db: DatabaseConnection,
}

impl RecipeMarkRepository for DbRecipeMarkRepository {
    async fn add(&self, kind: MarkKind, user_id: i32, recipe_id: i32) -> Result<bool, ApiError> {
        let now = Utc::now();
        let inserted = match kind {
            MarkKind::Favorite => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            MarkKind::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        };
        match inserted {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("add recipe to {kind}"))
                .into()),
        }
    }

    async fn remove(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, ApiError> {
        let result = match kind {
            MarkKind::Favorite => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
            MarkKind::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .with_context(|| format!("remove recipe from {kind}"))?;
        Ok(result.rows_affected > 0)
    }

    async fn marked_among(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError> {
        let ids: Vec<i32> = match kind {
            MarkKind::Favorite => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
            MarkKind::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("list recipes in {kind}"))?;
        Ok(ids.into_iter().collect())
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn add(&self, subscriber_id: i32, author_id: i32) -> Result<bool, ApiError> {
        let inserted = subscriptions::Entity::insert(subscriptions::ActiveModel {
            subscriber_id: Set(subscriber_id),
            subscribed_to_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                subscriptions::Column::SubscriberId,
                subscriptions::Column::SubscribedToId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await;
        match inserted {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("add subscription").into()),
        }
    }

    async fn remove(&self, subscriber_id: i32, author_id: i32) -> Result<bool, ApiError> {
        let result = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .filter(subscriptions::Column::SubscribedToId.eq(author_id))
            .exec(&self.db)
            .await
            .context("remove subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn subscribed_among(
        &self,
        subscriber_id: i32,
        author_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError> {
        let ids: Vec<i32> = subscriptions::Entity::find()
            .select_only()
            .column(subscriptions::Column::SubscribedToId)
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .filter(subscriptions::Column::SubscribedToId.is_in(author_ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("list subscribed authors among ids")?;
        Ok(ids.into_iter().collect())
    }

    async fn list_authors(
        &self,
        subscriber_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let page = page.clamped();
        let query = users::Entity::find().filter(
            users::Column::Id.in_subquery(
                Query::select()
                    .column(subscriptions::Column::SubscribedToId)
                    .from(subscriptions::Entity)
                    .and_where(Expr::col(subscriptions::Column::SubscriberId).eq(subscriber_id))
                    .to_owned(),
            ),
        );
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count subscriptions")?;
        let models = query
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list subscribed authors")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            count,
        ))
    }
}

// ── Shopping list repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingListRepository {
    pub db: DatabaseConnection,
}

impl ShoppingListRepository for DbShoppingListRepository {
    async fn cart_lines(&self, user_id: i32) -> Result<Vec<ShoppingLine>, ApiError> {
        #[derive(Debug, FromQueryResult)]
        struct CartLineRow {
            name: String,
            measurement_unit: String,
            amount: i32,
        }

        let sql = r#"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_carts AS sc
            JOIN recipe_ingredients AS ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients AS i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            ORDER BY sc.created_at, sc.recipe_id, ri.id
        "#;
        let rows = CartLineRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("list shopping cart lines")?;

        Ok(rows
            .into_iter()
            .map(|row| ShoppingLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: i64::from(row.amount),
            })
            .collect())
    }
}
