//! Server State
//!
//! Shared by every handler through axum's `State` extractor. Cloning is
//! cheap: the config is small and the pool is reference counted.

use shared::AppError;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;

#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Open the database named by the config and apply migrations
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool))
    }
}
