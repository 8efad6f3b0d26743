//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口
//! - [`departments`] - 部门管理接口
//! - [`appointments`] - 预约管理接口
//!
//! Handlers render create/update results with the read representation,
//! the same one a subsequent GET would return.

pub mod appointments;
pub mod departments;
pub mod employees;
pub mod health;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Path ids that are not integers cannot match a row
pub(crate) fn parse_id(raw: &str, not_found: ErrorCode) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::new(not_found))
}
