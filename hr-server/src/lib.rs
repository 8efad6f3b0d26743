//! HR Server - 员工、部门与预约记录服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx) 连接池、迁移与仓储函数
//! - **HTTP API** (`api`): 员工 / 部门 / 预约的 REST 接口
//! - **路由** (`routes`): 路由汇总与 tower-http 中间件
//!
//! # 模块结构
//!
//! ```text
//! hr-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由汇总 + 中间件栈
//! ├── middleware/    # 请求日志
//! ├── utils/         # 校验、超链接、时间、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use routes::{App, build_app};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load `.env`, then install the tracing subscriber from the environment
pub fn setup_environment() -> Config {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
    __  ______
   / / / / __ \
  / /_/ / /_/ /
 / __  / _, _/
/_/ /_/_/ |_|   server
    "#
    );
}
