//! Weekly menu snapshot

use serde::{Deserialize, Serialize};

use super::{Caterer, Dish, Meal, Restriction};

/// Everything the menu page needs for one date range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub caterers: Vec<Caterer>,
    #[serde(default)]
    pub restrictions: Vec<Restriction>,
}

/// Service health report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}
