use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use foodgram_api::domain::repository::{
    ImageStore, IngredientRepository, RecipeMarkRepository, RecipeRepository,
    ShoppingListRepository, SubscriptionRepository, TagRepository, UserRepository,
};
use foodgram_api::domain::types::{
    ImageFolder, Ingredient, IngredientAmount, MarkKind, NewUser, Recipe, RecipeDetails,
    RecipeDraft, RecipeFilter, RecipeLine, RecipeReplacement, Tag, User,
};
use foodgram_api::error::ApiError;
use foodgram_api::usecase::recipe::{CreateRecipeInput, CreateRecipeUseCase};
use foodgram_domain::image::ImagePayload;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::shopping_list::IngredientAmount as ShoppingLine;
use foodgram_testing::fixture::png_data_uri;

pub const ALICE: i32 = 1;
pub const BOB: i32 = 2;
pub const CAROL: i32 = 3;

pub const BREAKFAST: i32 = 1;
pub const LUNCH: i32 = 2;
pub const DINNER: i32 = 3;

pub const FLOUR: i32 = 1;
pub const SUGAR: i32 = 2;
pub const EGGS: i32 = 3;
pub const MILK: i32 = 4;

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StoreData {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    /// (recipe_id, tag_id)
    pub recipe_tags: Vec<(i32, i32)>,
    /// (recipe_id, line) in authored order.
    pub recipe_lines: Vec<(i32, IngredientAmount)>,
    /// (user_id, recipe_id) in insertion order.
    pub favorites: Vec<(i32, i32)>,
    pub carts: Vec<(i32, i32)>,
    /// (subscriber_id, author_id)
    pub subscriptions: Vec<(i32, i32)>,
    /// When set, the next recipe create or replace fails without writing.
    pub fail_next_write: bool,
}

/// In-memory stand-in for every repository port. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub data: Arc<Mutex<StoreData>>,
}

impl MemoryStore {
    /// Three users, three tags and four ingredients.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let user = |id: i32, name: &str| User {
            id,
            email: format!("{name}@example.com"),
            username: name.to_owned(),
            first_name: name.to_owned(),
            last_name: "Cook".to_owned(),
            avatar: None,
            created_at: now,
        };
        let tag = |id: i32, slug: &str| Tag {
            id,
            name: slug.to_owned(),
            slug: slug.to_owned(),
        };
        let ingredient = |id: i32, name: &str, unit: &str| Ingredient {
            id,
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        let data = StoreData {
            users: vec![user(ALICE, "alice"), user(BOB, "bob"), user(CAROL, "carol")],
            tags: vec![
                tag(BREAKFAST, "breakfast"),
                tag(LUNCH, "lunch"),
                tag(DINNER, "dinner"),
            ],
            ingredients: vec![
                ingredient(FLOUR, "Flour", "g"),
                ingredient(SUGAR, "Sugar", "g"),
                ingredient(EGGS, "Eggs", "pcs"),
                ingredient(MILK, "Milk", "ml"),
            ],
            ..StoreData::default()
        };
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub fn fail_next_write(&self) {
        self.data.lock().unwrap().fail_next_write = true;
    }

    pub fn recipe_count(&self) -> usize {
        self.data.lock().unwrap().recipes.len()
    }

    pub fn tag_ids_of(&self, recipe_id: i32) -> Vec<i32> {
        let data = self.data.lock().unwrap();
        data.recipe_tags
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn lines_of(&self, recipe_id: i32) -> Vec<IngredientAmount> {
        let data = self.data.lock().unwrap();
        data.recipe_lines
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .map(|(_, l)| *l)
            .collect()
    }

    pub fn favorite_rows(&self, user_id: i32, recipe_id: i32) -> usize {
        let data = self.data.lock().unwrap();
        data.favorites
            .iter()
            .filter(|pair| **pair == (user_id, recipe_id))
            .count()
    }

    pub fn subscription_rows(&self, subscriber_id: i32, author_id: i32) -> usize {
        let data = self.data.lock().unwrap();
        data.subscriptions
            .iter()
            .filter(|pair| **pair == (subscriber_id, author_id))
            .count()
    }

    pub fn image_of(&self, recipe_id: i32) -> String {
        let data = self.data.lock().unwrap();
        data.recipes
            .iter()
            .find(|r| r.id == recipe_id)
            .map(|r| r.image.clone())
            .unwrap()
    }
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let page = page.clamped();
    let count = items.len() as u64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Page::new(items, count)
}

fn newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let mut data = self.data.lock().unwrap();
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::validation("email", "duplicate email"));
        }
        if data.users.iter().any(|u| u.username == user.username) {
            return Err(ApiError::validation("username", "duplicate username"));
        }
        let created = User {
            id: data.users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: None,
            created_at: Utc::now(),
        };
        data.users.push(created.clone());
        Ok(created)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        let data = self.data.lock().unwrap();
        let mut users = data.users.clone();
        users.sort_by_key(|u| u.id);
        Ok(paginate(users, page))
    }

    async fn set_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), ApiError> {
        let mut data = self.data.lock().unwrap();
        if let Some(user) = data.users.iter_mut().find(|u| u.id == id) {
            user.avatar = avatar.map(str::to_owned);
        }
        Ok(())
    }
}

impl TagRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let data = self.data.lock().unwrap();
        let mut tags = data.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }
}

impl IngredientRepository for MemoryStore {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let data = self.data.lock().unwrap();
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = data
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }
}

impl RecipeRepository for MemoryStore {
    async fn create(&self, draft: &RecipeDraft) -> Result<i32, ApiError> {
        let mut data = self.data.lock().unwrap();
        if std::mem::take(&mut data.fail_next_write) {
            return Err(anyhow::anyhow!("insert recipe: connection reset").into());
        }
        let id = data.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        // Strictly increasing timestamps keep "newest first" deterministic.
        let created_at = Utc::now() + Duration::milliseconds(i64::from(id));
        data.recipes.push(Recipe {
            id,
            author_id: draft.author_id,
            name: draft.name.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            image: draft.image.clone(),
            short_code: None,
            created_at,
        });
        data.recipe_tags
            .extend(draft.tag_ids.iter().map(|&tag_id| (id, tag_id)));
        data.recipe_lines
            .extend(draft.ingredients.iter().map(|&line| (id, line)));
        Ok(id)
    }

    async fn replace(&self, id: i32, replacement: &RecipeReplacement) -> Result<bool, ApiError> {
        let mut data = self.data.lock().unwrap();
        if std::mem::take(&mut data.fail_next_write) {
            return Err(anyhow::anyhow!("replace recipe: connection reset").into());
        }
        let Some(recipe) = data.recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        if let Some(ref name) = replacement.name {
            recipe.name = name.clone();
        }
        if let Some(ref text) = replacement.text {
            recipe.text = text.clone();
        }
        if let Some(minutes) = replacement.cooking_time {
            recipe.cooking_time = minutes;
        }
        if let Some(ref image) = replacement.image {
            recipe.image = image.clone();
        }
        data.recipe_tags.retain(|(r, _)| *r != id);
        data.recipe_lines.retain(|(r, _)| *r != id);
        data.recipe_tags
            .extend(replacement.tag_ids.iter().map(|&tag_id| (id, tag_id)));
        data.recipe_lines
            .extend(replacement.ingredients.iter().map(|&line| (id, line)));
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut data = self.data.lock().unwrap();
        let before = data.recipes.len();
        data.recipes.retain(|r| r.id != id);
        if data.recipes.len() == before {
            return Ok(false);
        }
        data.recipe_tags.retain(|(r, _)| *r != id);
        data.recipe_lines.retain(|(r, _)| *r != id);
        data.favorites.retain(|(_, r)| *r != id);
        data.carts.retain(|(_, r)| *r != id);
        Ok(true)
    }

    async fn find(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        let data = self.data.lock().unwrap();
        let slug_tag_ids: HashSet<i32> = data
            .tags
            .iter()
            .filter(|t| filter.tag_slugs.contains(&t.slug))
            .map(|t| t.id)
            .collect();
        let mut found: Vec<Recipe> = data
            .recipes
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || data
                        .recipe_tags
                        .iter()
                        .any(|(rid, tid)| *rid == r.id && slug_tag_ids.contains(tid))
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| data.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .is_none_or(|u| data.carts.contains(&(u, r.id)))
            })
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(paginate(found, page))
    }

    async fn load_details(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetails>, ApiError> {
        let data = self.data.lock().unwrap();
        let tags: HashMap<i32, Tag> = data.tags.iter().map(|t| (t.id, t.clone())).collect();
        let ingredients: HashMap<i32, Ingredient> = data
            .ingredients
            .iter()
            .map(|i| (i.id, i.clone()))
            .collect();
        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let mut recipe_tags: Vec<Tag> = data
                    .recipe_tags
                    .iter()
                    .filter(|(r, _)| *r == recipe.id)
                    .filter_map(|(_, t)| tags.get(t).cloned())
                    .collect();
                recipe_tags.sort_by_key(|t| t.id);
                let lines = data
                    .recipe_lines
                    .iter()
                    .filter(|(r, _)| *r == recipe.id)
                    .filter_map(|(_, l)| {
                        ingredients.get(&l.ingredient_id).map(|i| RecipeLine {
                            ingredient: i.clone(),
                            amount: l.amount,
                        })
                    })
                    .collect();
                RecipeDetails {
                    recipe,
                    tags: recipe_tags,
                    ingredients: lines,
                }
            })
            .collect())
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, ApiError> {
        let data = self.data.lock().unwrap();
        let mut found: Vec<Recipe> = data
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut found);
        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .count() as u64)
    }

    async fn assign_short_code(&self, id: i32, code: &str) -> Result<String, ApiError> {
        let mut data = self.data.lock().unwrap();
        let recipe = data
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ApiError::RecipeNotFound)?;
        Ok(recipe
            .short_code
            .get_or_insert_with(|| code.to_owned())
            .clone())
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<Recipe>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recipes
            .iter()
            .find(|r| r.short_code.as_deref() == Some(code))
            .cloned())
    }

    async fn delete_ingredient_line(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> Result<(), ApiError> {
        let mut data = self.data.lock().unwrap();
        let count = data
            .recipe_lines
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .count();
        let Some(pos) = data
            .recipe_lines
            .iter()
            .position(|(r, l)| *r == recipe_id && l.ingredient_id == ingredient_id)
        else {
            return Err(ApiError::RecipeIngredientNotFound);
        };
        if count <= 1 {
            return Err(ApiError::LastRecipeIngredient);
        }
        data.recipe_lines.remove(pos);
        Ok(())
    }
}

impl RecipeMarkRepository for MemoryStore {
    async fn add(&self, kind: MarkKind, user_id: i32, recipe_id: i32) -> Result<bool, ApiError> {
        let mut data = self.data.lock().unwrap();
        let rows = match kind {
            MarkKind::Favorite => &mut data.favorites,
            MarkKind::ShoppingCart => &mut data.carts,
        };
        if rows.contains(&(user_id, recipe_id)) {
            return Ok(false);
        }
        rows.push((user_id, recipe_id));
        Ok(true)
    }

    async fn remove(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, ApiError> {
        let mut data = self.data.lock().unwrap();
        let rows = match kind {
            MarkKind::Favorite => &mut data.favorites,
            MarkKind::ShoppingCart => &mut data.carts,
        };
        let before = rows.len();
        rows.retain(|pair| *pair != (user_id, recipe_id));
        Ok(rows.len() < before)
    }

    async fn marked_among(
        &self,
        kind: MarkKind,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError> {
        let data = self.data.lock().unwrap();
        let rows = match kind {
            MarkKind::Favorite => &data.favorites,
            MarkKind::ShoppingCart => &data.carts,
        };
        Ok(rows
            .iter()
            .filter(|(u, r)| *u == user_id && recipe_ids.contains(r))
            .map(|(_, r)| *r)
            .collect())
    }
}

impl SubscriptionRepository for MemoryStore {
    async fn add(&self, subscriber_id: i32, author_id: i32) -> Result<bool, ApiError> {
        let mut data = self.data.lock().unwrap();
        if data.subscriptions.contains(&(subscriber_id, author_id)) {
            return Ok(false);
        }
        data.subscriptions.push((subscriber_id, author_id));
        Ok(true)
    }

    async fn remove(&self, subscriber_id: i32, author_id: i32) -> Result<bool, ApiError> {
        let mut data = self.data.lock().unwrap();
        let before = data.subscriptions.len();
        data.subscriptions
            .retain(|pair| *pair != (subscriber_id, author_id));
        Ok(data.subscriptions.len() < before)
    }

    async fn subscribed_among(
        &self,
        subscriber_id: i32,
        author_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .subscriptions
            .iter()
            .filter(|(s, a)| *s == subscriber_id && author_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }

    async fn list_authors(
        &self,
        subscriber_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let data = self.data.lock().unwrap();
        let mut authors: Vec<User> = data
            .users
            .iter()
            .filter(|u| data.subscriptions.contains(&(subscriber_id, u.id)))
            .cloned()
            .collect();
        authors.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(authors, page))
    }
}

impl ShoppingListRepository for MemoryStore {
    async fn cart_lines(&self, user_id: i32) -> Result<Vec<ShoppingLine>, ApiError> {
        let data = self.data.lock().unwrap();
        let mut lines = Vec::new();
        for (_, recipe_id) in data.carts.iter().filter(|(u, _)| *u == user_id) {
            for (_, line) in data.recipe_lines.iter().filter(|(r, _)| r == recipe_id) {
                if let Some(ingredient) = data
                    .ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                {
                    lines.push(ShoppingLine {
                        name: ingredient.name.clone(),
                        measurement_unit: ingredient.measurement_unit.clone(),
                        amount: i64::from(line.amount),
                    });
                }
            }
        }
        Ok(lines)
    }
}

// ── MemoryImageStore ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryImageStore {
    pub files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    saved: Arc<AtomicUsize>,
}

impl MemoryImageStore {
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

impl ImageStore for MemoryImageStore {
    async fn save(&self, folder: ImageFolder, image: &ImagePayload) -> Result<String, ApiError> {
        let n = self.saved.fetch_add(1, Ordering::SeqCst) + 1;
        let path = format!("{}/{n}.{}", folder.as_str(), image.format.extension());
        self.files
            .lock()
            .unwrap()
            .insert(path.clone(), image.bytes.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("http://testserver/media/{path}")
    }
}

// ── Builders ─────────────────────────────────────────────────────────────────

pub fn line(ingredient_id: i32, amount: i32) -> IngredientAmount {
    IngredientAmount {
        ingredient_id,
        amount,
    }
}

pub fn recipe_input(
    name: &str,
    tags: Vec<i32>,
    ingredients: Vec<IngredientAmount>,
) -> CreateRecipeInput {
    CreateRecipeInput {
        name: name.to_owned(),
        text: format!("How to cook {name}."),
        cooking_time: 15,
        image: png_data_uri(),
        tags,
        ingredients,
    }
}

pub fn create_recipe_uc(
    store: &MemoryStore,
    images: &MemoryImageStore,
) -> CreateRecipeUseCase<MemoryStore, MemoryStore, MemoryStore, MemoryImageStore> {
    CreateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        images: images.clone(),
    }
}

/// Create a recipe through the use case and return its id.
pub async fn seed_recipe(
    store: &MemoryStore,
    author_id: i32,
    name: &str,
    tags: Vec<i32>,
    ingredients: Vec<IngredientAmount>,
) -> i32 {
    create_recipe_uc(store, &MemoryImageStore::default())
        .execute(author_id, recipe_input(name, tags, ingredients))
        .await
        .unwrap()
}
