//! 请求上下文模块
//!
//! 承载请求作用域的关联 ID：由上游中间件写入请求扩展，
//! 错误模型在构造时读取，用于客户端报告与服务端日志的关联

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderValue;
use uuid::Uuid;

/// 传递关联 ID 的请求头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求作用域上下文
///
/// 克隆成本低，作为 axum 请求扩展存储
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request_id: Option<String>,
}

impl RequestContext {
    /// 创建空的请求上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置关联 ID
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// 获取关联 ID
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// 请求 ID 中间件
///
/// 沿用入站 `x-request-id`，缺失时生成新的 UUID；
/// 写入请求扩展并回显到响应头
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut()
        .insert(RequestContext::new().with_request_id(id.clone()));

    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
