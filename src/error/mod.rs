//! 错误处理模块
//!
//! 提供统一的 API 错误模型：构造、包装、分类与序列化，
//! 兼容 Google API 风格的错误详情约定

pub mod api_error;
pub mod details;
pub mod failure;
pub mod http;
pub mod validation;

// 重新导出公共类型和函数
pub use api_error::ApiError;
pub use details::{BadRequest, ErrorInfo, FieldViolation, LocalizedMessage, ReasonType, RequestInfo};
pub use failure::{status_code, Failure};
pub use http::{Raw, Sanitized};
pub use validation::{
    format_attribute, parse_field_errors, parse_field_violations, FieldFailure,
    ValidationMessages, ValidationReport,
};

use crate::context::RequestContext;
use ::http::StatusCode;

/// 处理器默认使用的结果类型
pub type HandlerResult<T> = std::result::Result<T, Sanitized>;

/// 基础设施层默认使用的结果类型
pub type InfraResult<T> = anyhow::Result<T>;

/// 将基础设施错误包装为带上下文的 `ApiError`
pub fn map_infra_error(
    ctx: &RequestContext,
    err: anyhow::Error,
    status: StatusCode,
    message: &str,
) -> ApiError {
    ApiError::wrapf(ctx, Failure::Foreign(err), status, message, &[])
}

/// `InfraResult` 的辅助扩展，用于快速转换为统一的 API 错误类型
pub trait InfraResultExt<T> {
    fn into_api(
        self,
        ctx: &RequestContext,
        status: StatusCode,
        message: &str,
    ) -> std::result::Result<T, ApiError>;
}

impl<T> InfraResultExt<T> for InfraResult<T> {
    fn into_api(
        self,
        ctx: &RequestContext,
        status: StatusCode,
        message: &str,
    ) -> std::result::Result<T, ApiError> {
        self.map_err(|err| map_infra_error(ctx, err, status, message))
    }
}

/// `newf` 的便捷别名，接受纯文本消息
pub fn new_error(ctx: &RequestContext, status: StatusCode, message: &str) -> ApiError {
    ApiError::newf(ctx, status, message, &[])
}
