//! 统一 API 错误类型
//!
//! 请求处理过程中的核心错误实体：包装底层原因、承载用户可见消息、
//! HTTP 状态码与 Google API 风格的结构化详情块。
//! 一个错误在单个请求的处理中被构造、按需充实、最终被序列化边界消费一次

use super::details::{BadRequest, ErrorInfo, LocalizedMessage, ReasonType, RequestInfo};
use super::failure::Failure;
use super::validation::{self, ValidationReport};
use crate::context::RequestContext;
use crate::i18n::{self, MessageArg, EN_US};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 底层原因：校验报告或不透明的外部错误
///
/// 仅用于服务端日志，绝不序列化
#[derive(Debug)]
pub(crate) enum Cause {
    Validation(ValidationReport),
    Foreign(anyhow::Error),
}

/// 统一 API 错误
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// 底层原因，独占所有权；反序列化后为空
    #[serde(skip)]
    cause: Option<Cause>,

    /// 面向用户的摘要消息
    pub msg: String,

    /// 规范化字段名 → 标记 的旧版映射
    ///
    /// 由 `bad_request` 的违规列表派生，键集合与列表中的字段一致
    #[serde(rename = "fieldErrors", default)]
    pub field_errors: HashMap<String, String>,

    /// HTTP 状态码；构造时未指定则为 500，永不为零
    #[serde(rename = "code", with = "status_code_serde")]
    pub http_status: StatusCode,

    /// 结构化的字段违规详情
    #[serde(rename = "badRequest", default, skip_serializing_if = "Option::is_none")]
    pub bad_request: Option<BadRequest>,

    /// 构造时从请求上下文捕获的元数据；一经设置不再被包装覆盖
    #[serde(
        rename = "requestInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_info: Option<RequestInfo>,

    /// 同一消息的本地化渲染
    #[serde(
        rename = "localizedMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub localized_message: Option<LocalizedMessage>,

    /// 结构化原因代码
    #[serde(rename = "errorInfo", default, skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ErrorInfo>,
}

impl ApiError {
    /// 基础构造：仅消息与状态码
    fn base(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            cause: None,
            msg: msg.into(),
            field_errors: HashMap::new(),
            http_status: status,
            bad_request: None,
            request_info: None,
            localized_message: None,
            error_info: None,
        }
    }

    /// 构造带格式化消息的新错误
    ///
    /// 捕获请求元数据，并用参考区域设置渲染同一模板的本地化消息；无底层原因
    pub fn newf(
        ctx: &RequestContext,
        status: StatusCode,
        template: &str,
        args: &[MessageArg],
    ) -> Self {
        let mut e = Self::base(status, i18n::render_plain(template, args));
        e.request_info = Some(RequestInfo::from_context(ctx));
        e.localized_message = Some(LocalizedMessage::format(&EN_US, template, args));
        e
    }

    /// 包装一个已分类的失败
    ///
    /// 幂等：`Api` 分支原样返回，跨层重复包装不会改变状态码、消息或已附加的详情。
    /// 校验失败在首次包装时立即并入字段违规
    pub fn wrapf(
        ctx: &RequestContext,
        failure: impl Into<Failure>,
        status: StatusCode,
        template: &str,
        args: &[MessageArg],
    ) -> Self {
        match failure.into() {
            Failure::Api(e) => e,
            Failure::Validation(report) => {
                let mut e = Self::newf(ctx, status, template, args);
                e.merge_validation(&report);
                e.cause = Some(Cause::Validation(report));
                e
            }
            Failure::Foreign(err) => {
                let mut e = Self::newf(ctx, status, template, args);
                e.cause = Some(Cause::Foreign(err));
                e
            }
        }
    }

    /// 将未分类的失败转换为通用 500 错误
    ///
    /// 原因仅为服务端日志保留；`Api` 分支原样返回
    pub fn generic(failure: impl Into<Failure>) -> Self {
        match failure.into() {
            Failure::Api(e) => e,
            Failure::Validation(report) => {
                let mut e = Self::base(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.");
                e.cause = Some(Cause::Validation(report));
                e
            }
            Failure::Foreign(err) => {
                let mut e = Self::base(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.");
                e.cause = Some(Cause::Foreign(err));
                e
            }
        }
    }

    /// 将失败归类为 400 错误
    ///
    /// `Api` 分支原样返回；校验失败立即并入字段违规
    pub fn bad_request(failure: impl Into<Failure>) -> Self {
        match failure.into() {
            Failure::Api(e) => e,
            Failure::Validation(report) => {
                let mut e = Self::base(StatusCode::BAD_REQUEST, "Bad request.");
                e.merge_validation(&report);
                e.cause = Some(Cause::Validation(report));
                e
            }
            Failure::Foreign(err) => {
                let mut e = Self::base(StatusCode::BAD_REQUEST, "Bad request.");
                e.cause = Some(Cause::Foreign(err));
                e
            }
        }
    }

    /// 带自定义消息的 400 错误
    pub fn bad_request_with_message(msg: impl Into<String>) -> Self {
        Self::base(StatusCode::BAD_REQUEST, msg)
    }

    /// 404 错误
    pub fn not_found() -> Self {
        Self::base(StatusCode::NOT_FOUND, "not found")
    }

    /// 请求体无法解码时的 400 错误
    pub fn invalid_request_body() -> Self {
        Self::base(StatusCode::BAD_REQUEST, "Failed to parse request body.")
    }

    /// 追加一条自定义字段违规
    ///
    /// 描述应当可直接呈现给用户；同时在旧版映射中标记该字段
    #[must_use]
    pub fn with_field_violation(
        mut self,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let field = field.into();
        self.bad_request = Some(
            self.bad_request
                .take()
                .unwrap_or_default()
                .with_field_violation(field.clone(), description),
        );
        self.field_errors
            .insert(field, validation::INVALID_MARKER.to_string());
        self
    }

    /// 批量并入校验失败
    ///
    /// 空报告不做任何改动，未设置的详情块保持缺省
    #[must_use]
    pub fn with_validation_failures(mut self, report: &ValidationReport) -> Self {
        self.merge_validation(report);
        self
    }

    /// 并入另一失败的字段级详情；不改动消息与状态码
    ///
    /// 本系统错误贡献其字段映射与违规列表的并集；
    /// 校验失败经适配器并入；其余失败在原因缺省时成为原因
    #[must_use]
    pub fn with_error(mut self, failure: impl Into<Failure>) -> Self {
        match failure.into() {
            Failure::Api(other) => {
                self.field_errors.extend(other.field_errors);
                if let Some(br) = other.bad_request {
                    match &mut self.bad_request {
                        Some(mine) => mine.field_violations.extend(br.field_violations),
                        None => self.bad_request = Some(br),
                    }
                }
            }
            Failure::Validation(report) => {
                self.merge_validation(&report);
                if self.cause.is_none() {
                    self.cause = Some(Cause::Validation(report));
                }
            }
            Failure::Foreign(err) => {
                if self.cause.is_none() {
                    self.cause = Some(Cause::Foreign(err));
                }
            }
        }
        self
    }

    /// 附加或覆盖结构化原因代码
    #[must_use]
    pub fn with_reason(mut self, reason: ReasonType, metadata: HashMap<String, String>) -> Self {
        self.error_info = Some(ErrorInfo::new(reason, metadata));
        self
    }

    /// 经适配器并入校验报告，违规列表为准、旧版映射随之派生
    fn merge_validation(&mut self, report: &ValidationReport) {
        if report.is_empty() {
            return;
        }

        let violations = validation::parse_field_violations(validation::builtin_messages(), report);
        match &mut self.bad_request {
            Some(br) => br.field_violations.extend(violations),
            None => self.bad_request = Some(BadRequest::new(violations)),
        }

        self.field_errors.extend(validation::parse_field_errors(report));
    }
}

impl fmt::Display for ApiError {
    /// 单行诊断形式，供日志使用，不面向客户端
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.http_status.canonical_reason().unwrap_or_default())?;
        f.write_str(": ")?;
        f.write_str(&self.msg)?;

        if let Some(br) = &self.bad_request {
            f.write_str(": FieldViolations(")?;
            for (i, fv) in br.field_violations.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}:{}", fv.field, fv.description)?;
            }
            f.write_str(")")?;
        }
        if let Some(ri) = &self.request_info {
            if !ri.request_id.is_empty() {
                write!(f, ": RequestInfo(requestID:{})", ri.request_id)?;
            }
        }
        if let Some(ei) = &self.error_info {
            write!(f, ": ErrorInfo({}", ei.reason.as_str())?;
            for (i, (key, val)) in ei.metadata.iter().enumerate() {
                f.write_str(if i == 0 { ",Metadata:{" } else { "," })?;
                write!(f, "{key}:{val}")?;
            }
            if !ei.metadata.is_empty() {
                f.write_str("}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {
    /// 暴露原因链供日志遍历
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Some(Cause::Validation(report)) => Some(report),
            Some(Cause::Foreign(err)) => {
                let e: &(dyn std::error::Error + 'static) = err.as_ref();
                Some(e)
            }
            None => None,
        }
    }
}

/// 状态码在线上格式中以整数表示
mod status_code_serde {
    use http::StatusCode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(serde::de::Error::custom)
    }
}
