//! Dish Model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::RestrictionIds;

/// A food item served on one date for one meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub served_on: NaiveDate,
    /// Meal id
    pub meal: i64,
    /// Caterer id
    pub caterer: i64,
    #[serde(default)]
    pub restrictions: RestrictionIds,
}

/// Create / update dish payload
///
/// Every field is optional at the parsing stage: required fields are
/// checked afterwards so a caller learns about all missing fields at once.
/// Empty strings and zero ids count as missing. Ids may arrive as numbers
/// or numeric strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub caterer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_on: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub meal: Option<i64>,
    #[serde(default)]
    pub restrictions: RestrictionIds,
}

impl DishPayload {
    /// Names of required fields that are absent or falsy, in a fixed order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.as_deref().is_none_or(str::is_empty) {
            missing.push("title");
        }
        if self.caterer.is_none_or(|id| id == 0) {
            missing.push("caterer");
        }
        if self.served_on.as_deref().is_none_or(str::is_empty) {
            missing.push("served_on");
        }
        if self.meal.is_none_or(|id| id == 0) {
            missing.push("meal");
        }
        missing
    }
}

impl From<&Dish> for DishPayload {
    fn from(dish: &Dish) -> Self {
        Self {
            title: Some(dish.title.clone()),
            description: Some(dish.description.clone()),
            caterer: Some(dish.caterer),
            served_on: Some(dish.served_on.format("%Y-%m-%d").to_string()),
            meal: Some(dish.meal),
            restrictions: dish.restrictions.clone(),
        }
    }
}

/// `{ "id": 12 }` response of create / update / single delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishId {
    pub id: i64,
}

/// Bulk delete body; ids follow the same number-or-string rule as payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDishes {
    #[serde(deserialize_with = "lenient_ids")]
    pub ids: Vec<i64>,
}

/// Pagination for the dish list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<i64>,
}

/// An id as sent by form-based clients: a number or its decimal text
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Num(i64),
    Text(String),
}

impl IdRepr {
    /// `None` for blank text
    fn parse<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            IdRepr::Num(id) => Ok(Some(id)),
            IdRepr::Text(text) if text.trim().is_empty() => Ok(None),
            IdRepr::Text(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid id: {text:?}"))),
        }
    }
}

/// `3`, `"3"`, `""` and `null` are all accepted; the last two mean absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(repr) => repr.parse(),
    }
}

/// `[1, "2"]` reads as `[1, 2]`; a blank entry is an error.
fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<IdRepr>::deserialize(deserializer)?
        .into_iter()
        .map(|repr| {
            repr.parse::<D::Error>()?
                .ok_or_else(|| serde::de::Error::custom("blank id in list"))
        })
        .collect()
}
