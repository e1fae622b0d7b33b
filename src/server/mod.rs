//! HTTP 服务边界
//!
//! 路由与请求体解码的薄封装：错误模型在此被消费并写入响应，
//! 按端点选择脱敏或原样透出

use crate::config::HttpConfig;
use crate::context::request_id_middleware;
use crate::error::{ApiError, Sanitized};
use axum::extract::{DefaultBodyLimit, FromRequest, Request};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

/// 请求体大小上限（字节）
pub const REQUEST_BODY_LIMIT: usize = 10_000;

/// 通用响应消息体
pub fn message(status: bool, message: impl Into<String>) -> Value {
    serde_json::json!({ "status": status, "message": message.into() })
}

/// 健康检查
pub async fn health_check() -> Json<Value> {
    Json(message(true, "OK"))
}

/// 欢迎页
pub async fn welcome() -> Json<Value> {
    Json(message(true, "Welcome to Whimsy"))
}

/// 未匹配路由的兜底处理器
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(message(false, "This route was not found on our server")),
    )
        .into_response()
}

/// JSON 请求体提取器
///
/// 解码失败统一转换为 400 的请求体格式错误，不向客户端泄漏解码器细节
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Sanitized;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                debug!(error = %rejection, "failed to decode request body");
                Err(Sanitized::from(ApiError::invalid_request_body()))
            }
        }
    }
}

/// 构建基础路由器
///
/// 挂载健康检查、欢迎页与兜底路由，
/// 并启用请求 ID 中间件与请求体大小限制
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(welcome))
        .fallback(not_found_handler)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT))
}

/// 监听并服务，直到底层监听循环结束
pub async fn serve(config: &HttpConfig, router: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.address).await?;
    info!(addr = %config.address, "Server running");
    axum::serve(listener, router).await?;
    Ok(())
}
