//! HTTP 边界转换
//!
//! 将 `ApiError` 渲染为 HTTP 响应，并提供按端点选择的脱敏策略包装。
//! 失败只在最外层首次被观察到时转换为通用形式，且仅转换一次

use super::api_error::ApiError;
use super::failure::Failure;
use super::validation::ValidationReport;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status;
        (status, Json(self)).into_response()
    }
}

/// 脱敏响应包装
///
/// 未分类的失败对客户端呈现为通用 500，其原因仅记入服务端日志；
/// 已分类的错误按自身状态与详情序列化
pub struct Sanitized(pub Failure);

/// 原样响应包装
///
/// 供可信或调试端点使用：绕过脱敏，直接透出底层失败
pub struct Raw(pub Failure);

impl IntoResponse for Sanitized {
    fn into_response(self) -> Response {
        match self.0 {
            Failure::Api(e) => {
                debug!(error = %e, "api handler error");
                e.into_response()
            }
            failure => {
                // 私有错误信息只进日志，客户端只收到通用错误
                error!(error = %failure, "unhandled api handler error");
                ApiError::generic(failure).into_response()
            }
        }
    }
}

impl IntoResponse for Raw {
    fn into_response(self) -> Response {
        match self.0 {
            Failure::Api(e) => {
                debug!(error = %e, "api handler error");
                e.into_response()
            }
            failure => {
                error!(error = %failure, "unhandled api handler error");
                let status = failure.status_code();
                let body = serde_json::json!({
                    "error": failure.to_string(),
                    "status": status.as_u16(),
                });
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<Failure> for Sanitized {
    fn from(failure: Failure) -> Self {
        Sanitized(failure)
    }
}

impl From<ApiError> for Sanitized {
    fn from(e: ApiError) -> Self {
        Sanitized(Failure::Api(e))
    }
}

impl From<ValidationReport> for Sanitized {
    fn from(report: ValidationReport) -> Self {
        Sanitized(Failure::Validation(report))
    }
}

impl From<Failure> for Raw {
    fn from(failure: Failure) -> Self {
        Raw(failure)
    }
}

impl From<ApiError> for Raw {
    fn from(e: ApiError) -> Self {
        Raw(Failure::Api(e))
    }
}

impl From<ValidationReport> for Raw {
    fn from(report: ValidationReport) -> Self {
        Raw(Failure::Validation(report))
    }
}
