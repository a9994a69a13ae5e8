//! Menu Server - 食堂菜单管理 HTTP 服务
//!
//! # 模块结构
//!
//! ```text
//! menu-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 可注入的授权检查
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接池、迁移、仓储
//! └── utils/         # 日志、参数校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{Authorizer, BearerTokenAuthorizer};
pub use core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` (不存在时忽略)
pub fn setup_environment() {
    if let Err(e) = dotenv::dotenv() {
        // Missing file is the normal case outside development
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }
}
