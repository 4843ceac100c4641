//! Input rules checked before any write.

use std::collections::HashSet;

use crate::domain::types::IngredientAmount;
use crate::error::ApiError;

pub const MAX_RECIPE_NAME_LEN: usize = 256;
pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_PERSON_NAME_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;

/// Username reserved for the `/users/me` route.
pub const RESERVED_USERNAME: &str = "me";

pub fn validate_recipe_name(name: &str) -> Result<(), ApiError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(ApiError::validation("name", "recipe name must not be empty"));
    }
    if name.chars().count() > MAX_RECIPE_NAME_LEN {
        return Err(ApiError::validation(
            "name",
            format!("recipe name must be at most {MAX_RECIPE_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_recipe_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::validation("text", "recipe text must not be empty"));
    }
    Ok(())
}

pub fn validate_cooking_time(minutes: i32) -> Result<(), ApiError> {
    if minutes < 1 {
        return Err(ApiError::validation(
            "cooking_time",
            "cooking time must be at least 1 minute",
        ));
    }
    Ok(())
}

/// Non-empty, no repeated tag.
pub fn validate_tag_ids(tag_ids: &[i32]) -> Result<(), ApiError> {
    if tag_ids.is_empty() {
        return Err(ApiError::validation("tags", "at least one tag is required"));
    }
    let mut seen = HashSet::with_capacity(tag_ids.len());
    if let Some(dup) = tag_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(ApiError::validation(
            "tags",
            format!("tag {dup} is listed more than once"),
        ));
    }
    Ok(())
}

/// Non-empty, no repeated ingredient, every amount ≥ 1.
pub fn validate_ingredient_amounts(lines: &[IngredientAmount]) -> Result<(), ApiError> {
    if lines.is_empty() {
        return Err(ApiError::validation(
            "ingredients",
            "at least one ingredient is required",
        ));
    }
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if !seen.insert(line.ingredient_id) {
            return Err(ApiError::validation(
                "ingredients",
                format!("ingredient {} is listed more than once", line.ingredient_id),
            ));
        }
        if line.amount < 1 {
            return Err(ApiError::validation(
                "ingredients",
                format!("amount of ingredient {} must be at least 1", line.ingredient_id),
            ));
        }
    }
    Ok(())
}

/// Letters, digits and `_ . @ + -`, 1–150 characters, not `me`.
pub fn validate_username(username: &str) -> Result<(), ApiError> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(ApiError::validation(
            "username",
            format!("username must be 1 to {MAX_USERNAME_LEN} characters"),
        ));
    }
    if username == RESERVED_USERNAME {
        return Err(ApiError::validation(
            "username",
            format!("username '{RESERVED_USERNAME}' is reserved"),
        ));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');
    if let Some(bad) = username.chars().find(|c| !allowed(*c)) {
        return Err(ApiError::validation(
            "username",
            format!("username contains forbidden character '{bad}'"),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = email.len() <= MAX_EMAIL_LEN
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            })
        && !email.chars().any(char::is_whitespace);
    if !valid {
        return Err(ApiError::validation("email", "enter a valid email address"));
    }
    Ok(())
}

pub fn validate_person_name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(field, "this field must not be empty"));
    }
    if value.chars().count() > MAX_PERSON_NAME_LEN {
        return Err(ApiError::validation(
            field,
            format!("must be at most {MAX_PERSON_NAME_LEN} characters"),
        ));
    }
    Ok(())
}
