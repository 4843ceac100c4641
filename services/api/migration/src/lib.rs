pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_catalog;
mod m20250601_000003_create_recipes;
mod m20250601_000004_create_recipe_links;
mod m20250601_000005_create_marks;
mod m20250601_000006_create_subscriptions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_catalog::Migration),
            Box::new(m20250601_000003_create_recipes::Migration),
            Box::new(m20250601_000004_create_recipe_links::Migration),
            Box::new(m20250601_000005_create_marks::Migration),
            Box::new(m20250601_000006_create_subscriptions::Migration),
        ]
    }
}
