//! Google API 风格的结构化错误详情
//!
//! 参照 google.rpc error_details 约定定义的详情块，
//! 随 `ApiError` 一并序列化到响应体

use crate::context::RequestContext;
use crate::i18n::{self, Locale, MessageArg};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 单个请求字段的违规描述
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldViolation {
    /// 指向请求体字段的点分路径
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,

    /// 该字段为何无效的描述，可直接呈现给用户
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl FieldViolation {
    /// 创建字段违规
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

/// 描述客户端请求中的违规集合，关注请求的语法层面
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BadRequest {
    /// 请求中的所有字段违规，保持报告顺序
    #[serde(
        default,
        rename = "fieldViolations",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub field_violations: Vec<FieldViolation>,
}

impl BadRequest {
    /// 由违规序列创建
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self {
            field_violations: violations,
        }
    }

    /// 追加一条字段违规
    #[must_use]
    pub fn with_field_violation(
        mut self,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.field_violations
            .push(FieldViolation::new(field, description));
        self
    }
}

/// 客户端反馈问题时可附带的请求元数据
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestInfo {
    /// 不透明的请求标识，仅由生成它的服务解释，用于在日志中定位请求
    #[serde(default, rename = "requestID", skip_serializing_if = "String::is_empty")]
    pub request_id: String,

    /// 服务该请求时使用的数据，例如可回传给服务方调试的加密调用栈
    #[serde(
        default,
        rename = "servingData",
        skip_serializing_if = "String::is_empty"
    )]
    pub serving_data: String,
}

impl RequestInfo {
    /// 从请求上下文读取关联 ID；缺失时为空字符串
    ///
    /// 无副作用，永不失败
    pub fn from_context(ctx: &RequestContext) -> Self {
        Self {
            request_id: ctx.request_id().unwrap_or_default().to_string(),
            serving_data: String::new(),
        }
    }
}

/// 可安全返回给用户的本地化错误消息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedMessage {
    /// BCP-47 区域标签，如 `en-US`、`fr-CH`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locale: String,

    /// 上述区域下的本地化消息
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl LocalizedMessage {
    /// 用区域感知渲染生成本地化消息
    pub fn format(locale: &Locale, template: &str, args: &[MessageArg]) -> Self {
        Self {
            locale: locale.tag().to_string(),
            message: i18n::render_localized(locale, template, args),
        }
    }
}

/// 错误原因代码
///
/// 稳定、可机器匹配的近因标识，区别于自由文本消息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonType {
    Unknown,
    OutdatedVersion,
}

impl ReasonType {
    /// 获取原因代码的字符串标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonType::Unknown => "UNKNOWN",
            ReasonType::OutdatedVersion => "OUTDATED_VERSION",
        }
    }
}

impl fmt::Display for ReasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 带结构化细节的错误原因
///
/// 示例：客户端版本过旧
///
/// ```json
/// { "Reason": "OUTDATED_VERSION",
///   "Metadata": {
///     "version": "v0.0.1",
///     "minimum_version": "v0.0.2"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// 错误近因的常量标识
    #[serde(rename = "Reason")]
    pub reason: ReasonType,

    /// 补充原因的键值元数据
    #[serde(rename = "Metadata", default)]
    pub metadata: HashMap<String, String>,
}

impl ErrorInfo {
    /// 创建错误原因详情
    pub fn new(reason: ReasonType, metadata: HashMap<String, String>) -> Self {
        Self { reason, metadata }
    }
}
