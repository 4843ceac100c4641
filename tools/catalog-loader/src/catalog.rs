//! Catalog file format and validation.
//!
//! Ingredient files are JSON arrays of `{"name", "measurement_unit"}`, tag
//! files are arrays of `{"name", "slug"}`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub slug: String,
}

pub fn read_ingredients(path: &Path) -> Result<Vec<IngredientRecord>> {
    parse_ingredients(&read(path)?).with_context(|| format!("invalid {}", path.display()))
}

pub fn read_tags(path: &Path) -> Result<Vec<TagRecord>> {
    parse_tags(&read(path)?).with_context(|| format!("invalid {}", path.display()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    serde_json::from_str(text).context("expected a JSON array of records")
}

/// Trims fields, rejects out-of-range values and drops repeated
/// `(name, unit)` pairs while keeping file order.
pub fn parse_ingredients(text: &str) -> Result<Vec<IngredientRecord>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (i, raw) in decode::<IngredientRecord>(text)?.into_iter().enumerate() {
        let record = IngredientRecord {
            name: raw.name.trim().to_owned(),
            measurement_unit: raw.measurement_unit.trim().to_owned(),
        };
        check_len(i, "name", &record.name, 128)?;
        check_len(i, "measurement_unit", &record.measurement_unit, 64)?;
        if seen.insert((record.name.clone(), record.measurement_unit.clone())) {
            out.push(record);
        }
    }
    Ok(out)
}

/// Same as [`parse_ingredients`] for tags, keyed on slug. A name reused
/// under another slug is an error since names are unique too.
pub fn parse_tags(text: &str) -> Result<Vec<TagRecord>> {
    let mut slugs = HashSet::new();
    let mut names = HashSet::new();
    let mut out = Vec::new();
    for (i, raw) in decode::<TagRecord>(text)?.into_iter().enumerate() {
        let record = TagRecord {
            name: raw.name.trim().to_owned(),
            slug: raw.slug.trim().to_owned(),
        };
        check_len(i, "name", &record.name, 32)?;
        check_len(i, "slug", &record.slug, 32)?;
        if !is_slug(&record.slug) {
            bail!("record {i}: slug {:?} has invalid characters", record.slug);
        }
        if !slugs.insert(record.slug.clone()) {
            continue;
        }
        if !names.insert(record.name.clone()) {
            bail!("record {i}: tag name {:?} used twice", record.name);
        }
        out.push(record);
    }
    Ok(out)
}

fn check_len(index: usize, field: &str, value: &str, max: usize) -> Result<()> {
    if value.is_empty() {
        bail!("record {index}: {field} is empty");
    }
    if value.chars().count() > max {
        bail!("record {index}: {field} longer than {max} characters");
    }
    Ok(())
}

fn is_slug(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
