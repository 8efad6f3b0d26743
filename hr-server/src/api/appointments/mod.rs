//! Appointment API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /appointments/ | GET | 列表 (`?date=YYYY-MM-DD` 过滤与当日有交集的预约) |
//! | /appointments/ | POST | 创建 |
//! | /appointments/closest/ | GET | 最近一个未结束的预约 |
//! | /appointments/{id}/ | GET / PUT / PATCH / DELETE | 详情 / 更新 / 部分更新 / 删除 |

mod handler;
pub mod view;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::utils::Resource;

/// Appointment router
pub fn router(prefix: &str) -> Router<ServerState> {
    Router::new().nest(&format!("{prefix}/{}", Resource::Appointment.collection()), routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/closest", get(handler::closest))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::partial_update)
                .delete(handler::delete),
        )
}
