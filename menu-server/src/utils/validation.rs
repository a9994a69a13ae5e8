//! Input validation helpers
//!
//! Required-field checks run before any database work, so a rejected
//! request never mutates anything.

use shared::models::DishPayload;
use shared::util::normalize_served_on;
use validator::Validate;

use crate::db::repository::dish::DishWrite;
use crate::utils::{AppError, AppResult};

// ── Text length limits ──────────────────────────────────────────────

/// Dish titles
pub const MAX_NAME_LEN: u64 = 200;

/// Dish descriptions
pub const MAX_NOTE_LEN: u64 = 2000;

#[derive(Debug, Validate)]
struct DishText {
    #[validate(length(max = MAX_NAME_LEN))]
    title: String,
    #[validate(length(max = MAX_NOTE_LEN))]
    description: String,
}

/// Validate a create payload into a [`DishWrite`].
pub fn validate_dish(payload: DishPayload) -> AppResult<DishWrite> {
    into_write(payload, Vec::new())
}

/// Validate an update payload; a zero path id counts as a missing field.
pub fn validate_dish_update(id: i64, payload: DishPayload) -> AppResult<DishWrite> {
    let extra = if id == 0 { vec!["id"] } else { Vec::new() };
    into_write(payload, extra)
}

fn into_write(payload: DishPayload, extra_missing: Vec<&'static str>) -> AppResult<DishWrite> {
    let mut missing = payload.missing_fields();
    missing.extend(extra_missing);
    if !missing.is_empty() {
        return Err(AppError::missing_fields(missing));
    }

    let DishPayload {
        title,
        description,
        caterer,
        served_on,
        meal,
        restrictions,
    } = payload;
    // missing_fields() guarantees these are present
    let (Some(title), Some(caterer), Some(served_on), Some(meal)) = (title, caterer, served_on, meal)
    else {
        return Err(AppError::missing_fields(["title", "caterer", "served_on", "meal"]));
    };
    let text = DishText {
        title,
        description: description.unwrap_or_default(),
    };

    text.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::validation(format!(
            "Text too long (title max {MAX_NAME_LEN}, description max {MAX_NOTE_LEN} chars)"
        ))
        .with_detail("fields", fields)
    })?;

    Ok(DishWrite {
        served_on: normalize_served_on(&served_on)?,
        title: text.title,
        description: text.description,
        meal,
        caterer,
        restrictions,
    })
}
