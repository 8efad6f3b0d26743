//! Department API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /departments/ | GET / POST | 列表 / 创建 |
//! | /departments/{id}/ | GET / PUT / PATCH / DELETE | 详情 / 更新 / 部分更新 / 删除 |
//! | /departments/{id}/employees/ | GET | 部门员工 |

mod handler;
pub mod view;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::utils::Resource;

/// Department router
pub fn router(prefix: &str) -> Router<ServerState> {
    Router::new().nest(&format!("{prefix}/{}", Resource::Department.collection()), routes())
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
        .route("/{id}/employees", get(handler::list_employees))
}
