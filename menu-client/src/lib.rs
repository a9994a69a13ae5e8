//! Menu Client - HTTP client and weekly menu view model
//!
//! - [`HttpClient`] - typed calls to the menu server API
//! - [`MenuWeek`] - week number to Monday..Friday range
//! - [`grid`] - pure grid construction from fetched entities
//! - [`MenuView`] - page state: data, dialog, load/error status

pub mod config;
pub mod error;
pub mod grid;
pub mod http;
pub mod view;
pub mod week;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use grid::{CellView, DayColumn, DishBuckets, DishLine, MenuGrid, MealRow};
pub use http::HttpClient;
pub use view::{FetchTicket, LoadState, MenuView};
pub use week::MenuWeek;

// Re-export shared types for convenience
pub use shared::models::{Caterer, Dish, DishPayload, HealthStatus, Meal, MenuSnapshot, Restriction};
