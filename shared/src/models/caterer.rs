//! Caterer Model

use serde::{Deserialize, Serialize};

/// Caterer entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Caterer {
    pub id: i64,
    pub title: String,
    pub website: String,
}
