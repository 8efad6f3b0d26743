use chrono::{FixedOffset, Offset, Utc};

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | DATABASE_PATH | hr.db | SQLite 文件路径 (`:memory:` 可用) |
/// | API_PREFIX | /api/v1 | API 路由前缀 |
/// | UTC_OFFSET | +00:00 | 按日期过滤预约时使用的本地时区偏移 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | (none) | 日志文件目录 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/hr.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// API 路由前缀，不带结尾斜杠
    pub api_prefix: String,
    /// Offset used to compute local day boundaries
    pub utc_offset: FixedOffset,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "hr.db".into()),
            api_prefix: normalize_prefix(
                &std::env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".into()),
            ),
            utc_offset: std::env::var("UTC_OFFSET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(utc),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// In-memory database, default prefix; used by tests
    pub fn in_memory() -> Self {
        Self {
            http_port: 0,
            database_path: ":memory:".into(),
            api_prefix: "/api/v1".into(),
            utc_offset: utc(),
            environment: "test".into(),
            log_level: "info".into(),
            log_dir: None,
            request_timeout_ms: 30000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// `api/v1/` → `/api/v1`, `/` → ``
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
