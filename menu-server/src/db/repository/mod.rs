//! Repository Module
//!
//! Free async functions over a `SqlitePool`, one module per aggregate.

pub mod dish;
pub mod menu;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write referenced a row that does not exist (foreign key violation)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_foreign_key_violation()
        {
            return RepoError::Validation(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Validation(msg) => {
                tracing::warn!(error = %msg, "Rejected write with dangling reference");
                AppError::new(ErrorCode::InvalidReference)
            }
            RepoError::Database(msg) => {
                // Driver detail stays in the log
                tracing::error!(error = %msg, "Repository database error");
                AppError::database()
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Encode an id list as a JSON array for `json_each(?)`
pub(crate) fn json_ids(ids: &[i64]) -> RepoResult<String> {
    serde_json::to_string(ids).map_err(|e| RepoError::Database(e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use crate::db::DbService;

    /// Migrated in-memory pool seeded with three meals, two caterers and
    /// three restrictions.
    ///
    /// Meals: 1 = Lunch (required, 11:30), 2 = Breakfast (required, 08:00),
    /// 3 = Happy Hour (optional, 16:00).
    pub async fn seeded_pool() -> SqlitePool {
        let pool = DbService::in_memory().await.unwrap().pool;
        for sql in [
            "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (1, 'Lunch', '11:30:00', '13:00:00', 1)",
            "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (2, 'Breakfast', '08:00:00', '09:30:00', 1)",
            "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (3, 'Happy Hour', '16:00:00', '17:00:00', 0)",
            "INSERT INTO caterer (id, title, website) VALUES (1, 'Tasty Co', 'https://tasty.example')",
            "INSERT INTO caterer (id, title, website) VALUES (2, 'Bento Bros', 'https://bento.example')",
            "INSERT INTO restriction (id, title) VALUES (1, 'Vegetarian')",
            "INSERT INTO restriction (id, title) VALUES (2, 'Gluten Free')",
            "INSERT INTO restriction (id, title) VALUES (3, 'Vegan')",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_to_app_error() {
        let err: AppError = RepoError::Database("disk I/O error at /var/db".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database error");

        let err: AppError = RepoError::Validation("FOREIGN KEY constraint failed".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidReference);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_json_ids() {
        assert_eq!(json_ids(&[1, 2, 3]).unwrap(), "[1,2,3]");
        assert_eq!(json_ids(&[]).unwrap(), "[]");
    }
}
