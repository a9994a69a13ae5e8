//! Shared types for the menu service
//!
//! Entity models, the restriction id list type, the unified error system
//! and date helpers used by both menu-server and menu-client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
