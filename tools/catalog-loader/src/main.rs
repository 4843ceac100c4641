//! Catalog loader: seeds the tag and ingredient tables from JSON files.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p catalog-loader -- ingredients data/ingredients.json
//! DATABASE_URL=postgres://... cargo run -p catalog-loader -- tags data/tags.json
//! ```
//!
//! Rows that already exist are left untouched, so reruns are safe.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foodgram_api_schema::{ingredients, tags};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, EntityTrait};
use tracing::info;

mod catalog;

use catalog::{IngredientRecord, TagRecord};

const CHUNK: usize = 500;

#[derive(Parser)]
#[command(about = "Load tags or ingredients into the Foodgram catalog")]
struct Args {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load `[{"name", "measurement_unit"}]` records
    Ingredients { file: PathBuf },
    /// Load `[{"name", "slug"}]` records
    Tags { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    foodgram_core::tracing::init_tracing("info");
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;

    match args.command {
        Command::Ingredients { file } => {
            let records = catalog::read_ingredients(&file)?;
            let read = records.len();
            let inserted = load_ingredients(&db, records).await?;
            info!(file = %file.display(), read, inserted, "ingredients loaded");
        }
        Command::Tags { file } => {
            let records = catalog::read_tags(&file)?;
            let read = records.len();
            let inserted = load_tags(&db, records).await?;
            info!(file = %file.display(), read, inserted, "tags loaded");
        }
    }
    Ok(())
}

async fn load_ingredients(db: &DatabaseConnection, records: Vec<IngredientRecord>) -> Result<u64> {
    let mut inserted = 0;
    for chunk in records.chunks(CHUNK) {
        let models = chunk.iter().map(|r| ingredients::ActiveModel {
            name: Set(r.name.clone()),
            measurement_unit: Set(r.measurement_unit.clone()),
            ..Default::default()
        });
        let on_conflict = OnConflict::columns([
            ingredients::Column::Name,
            ingredients::Column::MeasurementUnit,
        ])
        .do_nothing()
        .to_owned();
        inserted += ingredients::Entity::insert_many(models)
            .on_conflict(on_conflict)
            .exec_without_returning(db)
            .await
            .context("failed to insert ingredients")?;
    }
    Ok(inserted)
}

async fn load_tags(db: &DatabaseConnection, records: Vec<TagRecord>) -> Result<u64> {
    let mut inserted = 0;
    for chunk in records.chunks(CHUNK) {
        let models = chunk.iter().map(|r| tags::ActiveModel {
            name: Set(r.name.clone()),
            slug: Set(r.slug.clone()),
            ..Default::default()
        });
        // Conflicts on either unique column are skipped.
        inserted += tags::Entity::insert_many(models)
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .exec_without_returning(db)
            .await
            .context("failed to insert tags")?;
    }
    Ok(inserted)
}
