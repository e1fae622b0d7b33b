//! API 错误模型集成测试
//!
//! 覆盖错误实体的构造、包装幂等性、详情合并与序列化契约

use http::StatusCode;
use std::collections::HashMap;
use whimsy_server_core::error::{status_code, ApiError, Failure, InfraResult, InfraResultExt};
use whimsy_server_core::{ReasonType, RequestContext, ValidationReport};

/// 构造携带关联 ID 的请求上下文
fn ctx_with_id(id: &str) -> RequestContext {
    RequestContext::new().with_request_id(id)
}

#[test]
fn formats_plain_and_localized_messages() {
    let ctx = RequestContext::new();
    let err = ApiError::newf(
        &ctx,
        StatusCode::BAD_REQUEST,
        "{} ducks in a row",
        &[4331.into()],
    );

    assert_eq!(err.to_string(), "Bad Request: 4331 ducks in a row");

    let localized = err.localized_message.as_ref().expect("localized message");
    assert_eq!(localized.locale, "en-US");
    assert_eq!(localized.message, "4,331 ducks in a row");
}

#[test]
fn captures_request_id_from_context() {
    let err = ApiError::newf(
        &ctx_with_id("X"),
        StatusCode::NOT_FOUND,
        "User not found.",
        &[],
    );

    let info = err.request_info.as_ref().expect("request info");
    assert_eq!(info.request_id, "X");
}

#[test]
fn serializes_wire_shape_without_cause() {
    let raw = std::io::Error::other("connection reset");
    let err = ApiError::wrapf(
        &ctx_with_id("req-1"),
        raw,
        StatusCode::BAD_REQUEST,
        "Bad duck.",
        &[],
    );

    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(value["msg"], "Bad duck.");
    assert_eq!(value["code"], 400);
    assert_eq!(value["fieldErrors"], serde_json::json!({}));
    assert_eq!(value["requestInfo"]["requestID"], "req-1");
    assert!(value.get("cause").is_none());

    let parsed: ApiError = serde_json::from_value(value).expect("deserialize");
    assert_eq!(parsed.msg, err.msg);
    assert_eq!(parsed.http_status, err.http_status);
    assert_eq!(parsed.field_errors, err.field_errors);
    assert_eq!(parsed.request_info, err.request_info);
    assert_eq!(parsed.localized_message, err.localized_message);
}

#[test]
fn wrap_is_idempotent_across_layers() {
    let raw = std::io::Error::other("disk exploded");
    let inner = ApiError::wrapf(
        &ctx_with_id("inner"),
        raw,
        StatusCode::BAD_REQUEST,
        "a",
        &[],
    );
    let outer = ApiError::wrapf(
        &ctx_with_id("outer"),
        inner,
        StatusCode::INTERNAL_SERVER_ERROR,
        "b",
        &[],
    );

    assert_eq!(outer.http_status, StatusCode::BAD_REQUEST);
    assert_eq!(outer.msg, "a");
    assert_eq!(
        outer.request_info.as_ref().expect("request info").request_id,
        "inner"
    );
}

#[test]
fn generic_fixes_message_and_keeps_cause_for_logs() {
    let err = ApiError::generic(Failure::foreign(std::io::Error::other("boom")));
    assert_eq!(err.http_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.msg, "Internal server error.");

    let source = std::error::Error::source(&err).expect("cause retained");
    assert_eq!(source.to_string(), "boom");

    // 已分类的错误原样返回
    let classified = ApiError::generic(ApiError::not_found());
    assert_eq!(classified.http_status, StatusCode::NOT_FOUND);
    assert_eq!(classified.msg, "not found");
}

#[test]
fn status_code_treats_foreign_errors_as_500() {
    let foreign = std::io::Error::other("nope");
    assert_eq!(status_code(&foreign), StatusCode::INTERNAL_SERVER_ERROR);

    let api = ApiError::not_found();
    assert_eq!(status_code(&api), StatusCode::NOT_FOUND);
}

#[test]
fn status_code_walks_source_chains() {
    #[derive(Debug, thiserror::Error)]
    #[error("request handling failed")]
    struct WrappedInTransport(#[source] ApiError);

    let wrapped = WrappedInTransport(ApiError::not_found());
    assert_eq!(status_code(&wrapped), StatusCode::NOT_FOUND);
}

#[test]
fn empty_validation_report_is_a_noop() {
    let err = ApiError::newf(&RequestContext::new(), StatusCode::BAD_REQUEST, "nope", &[])
        .with_validation_failures(&ValidationReport::new());

    assert!(err.bad_request.is_none());
    assert!(err.field_errors.is_empty());
}

#[test]
fn field_violation_appends_without_disturbing_existing() {
    let err = ApiError::not_found()
        .with_field_violation("name", "Required.")
        .with_field_violation("type", "Goose is not a duck.");

    let br = err.bad_request.as_ref().expect("bad request block");
    assert_eq!(br.field_violations.len(), 2);
    assert_eq!(br.field_violations[0].field, "name");
    assert_eq!(br.field_violations[0].description, "Required.");
    assert_eq!(br.field_violations[1].field, "type");
    assert_eq!(br.field_violations[1].description, "Goose is not a duck.");
    assert_eq!(err.field_errors["type"], "invalid");

    assert_eq!(
        err.to_string(),
        "Not Found: not found: FieldViolations(name:Required.,type:Goose is not a duck.)"
    );
}

#[test]
fn reason_shows_up_in_diagnostics() {
    let mut metadata = HashMap::new();
    metadata.insert("version".to_string(), "v0.0.1".to_string());

    let err = ApiError::bad_request_with_message("Update required.")
        .with_reason(ReasonType::OutdatedVersion, metadata);

    assert_eq!(
        err.to_string(),
        "Bad Request: Update required.: ErrorInfo(OUTDATED_VERSION,Metadata:{version:v0.0.1})"
    );

    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(value["errorInfo"]["Reason"], "OUTDATED_VERSION");
    assert_eq!(value["errorInfo"]["Metadata"]["version"], "v0.0.1");
}

#[test]
fn merging_another_error_unions_field_details() {
    let donor = ApiError::not_found().with_field_violation("type", "Goose is not a duck.");
    let err = ApiError::bad_request_with_message("Cannot update duck.").with_error(donor);

    assert_eq!(err.http_status, StatusCode::BAD_REQUEST);
    assert_eq!(err.msg, "Cannot update duck.");
    assert_eq!(err.field_errors["type"], "invalid");
    let br = err.bad_request.as_ref().expect("bad request block");
    assert_eq!(br.field_violations.len(), 1);
    assert_eq!(br.field_violations[0].field, "type");
}

#[test]
fn infra_results_convert_into_api_errors() {
    let res: InfraResult<()> = Err(anyhow::anyhow!("db down"));
    let err = res
        .into_api(
            &ctx_with_id("req-9"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Lookup failed.",
        )
        .expect_err("error expected");

    assert_eq!(err.msg, "Lookup failed.");
    assert_eq!(err.http_status, StatusCode::INTERNAL_SERVER_ERROR);
    let source = std::error::Error::source(&err).expect("cause retained");
    assert_eq!(source.to_string(), "db down");
}
