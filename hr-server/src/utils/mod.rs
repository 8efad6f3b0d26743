//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`body`] - JSON 请求体提取
//! - [`links`] - 超链接关系的生成与解析
//! - [`validation`] - 写入字段校验
//! - [`time`] - 日期/时区转换
//! - 日志初始化

pub mod body;
pub mod links;
pub mod logger;
pub mod time;
pub mod validation;

pub use body::JsonBody;
pub use links::{Links, Resource};
pub use shared::error::{AppError, AppResult, ErrorCode};
pub use validation::{FieldReader, TextRule, WriteMode};
