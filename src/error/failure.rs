//! 失败分类
//!
//! 在首次观察到失败时一次性完成分类的判别联合。
//! 后续包装直接在联合分支上操作，避免逐层的运行时类型探测

use super::api_error::ApiError;
use super::validation::ValidationReport;
use http::StatusCode;
use std::fmt;

/// 首次观察失败时产生的分类结果
#[derive(Debug)]
pub enum Failure {
    /// 已由本系统分类的错误
    Api(ApiError),
    /// 校验库报告的失败
    Validation(ValidationReport),
    /// 其他不透明的外部错误
    Foreign(anyhow::Error),
}

impl Failure {
    /// 包装任意外部错误
    pub fn foreign<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Failure::Foreign(err.into())
    }

    /// 分类后的 HTTP 状态码
    ///
    /// 未由本系统工厂产生的失败一律视为 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Failure::Api(e) => e.http_status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Api(e) => write!(f, "{e}"),
            Failure::Validation(report) => write!(f, "{report}"),
            // 交替格式打印完整原因链
            Failure::Foreign(err) => write!(f, "{err:#}"),
        }
    }
}

impl From<ApiError> for Failure {
    fn from(e: ApiError) -> Self {
        Failure::Api(e)
    }
}

impl From<ValidationReport> for Failure {
    fn from(report: ValidationReport) -> Self {
        Failure::Validation(report)
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::foreign(err)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Failure::foreign(err)
    }
}

/// 沿 source 链查找本系统错误并取其状态码
///
/// 对任意外部错误安全：找不到 `ApiError` 时返回 500，不会 panic
pub fn status_code(err: &(dyn std::error::Error + 'static)) -> StatusCode {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            return api.http_status;
        }
        current = e.source();
    }
    StatusCode::INTERNAL_SERVER_ERROR
}
