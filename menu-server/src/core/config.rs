use super::ServerError;

/// 服务器配置 - menu-server 的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | menu.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | API_TOKEN | (开发环境占位) | 写接口使用的 Bearer token |
/// | LOG_LEVEL | info | 未设置 RUST_LOG 时的日志级别 |
/// | LOG_DIR | - | 设置后按天滚动写入日志文件 |
/// | DEFAULT_PAGE_SIZE | 100 | 菜品列表默认条数 |
/// | MAX_PAGE_SIZE | 1000 | 菜品列表最大条数 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/menu.db HTTP_PORT=8080 cargo run -p menu-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// Bearer token accepted by the default authorizer
    pub api_token: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的变量使用默认值；非开发环境下 `API_TOKEN` 必须设置。
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let default_page_size = std::env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|p| p.parse().ok())
            .filter(|n: &i64| *n > 0)
            .unwrap_or(100);
        let max_page_size = std::env::var("MAX_PAGE_SIZE")
            .ok()
            .and_then(|p| p.parse().ok())
            .filter(|n: &i64| *n > 0)
            .unwrap_or(1000);

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "menu.db".into()),
            api_token: Self::require_secret("API_TOKEN", &environment)?,
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            default_page_size: default_page_size.min(max_page_size),
            max_page_size,
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        })
    }

    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, ServerError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ServerError::Config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    /// 测试用配置: 内存数据库 + 固定 token
    pub fn for_tests(api_token: impl Into<String>) -> Self {
        Self {
            http_port: 0,
            database_path: ":memory:".into(),
            environment: "development".into(),
            api_token: api_token.into(),
            log_level: "debug".into(),
            log_dir: None,
            default_page_size: 100,
            max_page_size: 1000,
            request_timeout_ms: 30000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 列表请求的 `items`: 缺省取默认值，超出上限时截断
    pub fn page_size(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_defaults_and_clamps() {
        let config = Config::for_tests("t");
        assert_eq!(config.page_size(None), 100);
        assert_eq!(config.page_size(Some(5)), 5);
        assert_eq!(config.page_size(Some(50_000)), 1000);
    }
}
