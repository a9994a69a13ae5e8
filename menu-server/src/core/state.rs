//! Server State

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{Authorizer, BearerTokenAuthorizer};
use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 所有请求共享
///
/// Cheap to clone: the pool and everything else sit behind `Arc`s.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    /// 写接口的授权检查 (可注入)
    pub authorizer: Arc<dyn Authorizer>,
}

impl ServerState {
    /// 打开数据库并执行迁移，使用 `API_TOKEN` 构建默认授权器
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let authorizer = BearerTokenAuthorizer::new(config.api_token.clone());
        Ok(Self::new(config.clone(), db.pool, Arc::new(authorizer)))
    }

    pub fn new(config: Config, pool: SqlitePool, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            authorizer,
        }
    }

    /// 替换授权器 (测试或嵌入到已有认证体系时使用)
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }
}
