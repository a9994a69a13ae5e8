//! Data models
//!
//! Shared between menu-server and menu-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod caterer;
pub mod dish;
pub mod meal;
pub mod menu;
pub mod restriction;

// Re-exports
pub use caterer::*;
pub use dish::*;
pub use meal::*;
pub use menu::*;
pub use restriction::*;
