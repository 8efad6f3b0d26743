//! Employee API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /employees/ | GET | 列表 (`?name=` `?email=` 不区分大小写子串过滤) |
//! | /employees/ | POST | 创建 |
//! | /employees/{id}/ | GET / PUT / PATCH / DELETE | 详情 / 更新 / 部分更新 / 删除 |

mod handler;
pub mod view;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::utils::Resource;

/// Employee router
pub fn router(prefix: &str) -> Router<ServerState> {
    Router::new().nest(&format!("{prefix}/{}", Resource::Employee.collection()), routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::partial_update)
                .delete(handler::delete),
        )
}
