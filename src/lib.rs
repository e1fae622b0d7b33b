//! Whimsy Server Core Library
//!
//! Provides the structured API error model and HTTP scaffolding for the
//! Whimsy backend, including request correlation, validation adaptation,
//! and localized error rendering.

pub mod config;
pub mod context;
pub mod error;
pub mod i18n;
pub mod server;

// Re-exports
pub use config::{Config, HttpConfig, ServiceConfig};
pub use context::{request_id_middleware, RequestContext, REQUEST_ID_HEADER};
pub use error::{
    new_error, status_code, ApiError, BadRequest, ErrorInfo, Failure, FieldFailure,
    FieldViolation, HandlerResult, InfraResult, InfraResultExt, LocalizedMessage, Raw,
    ReasonType, RequestInfo, Sanitized, ValidationMessages, ValidationReport,
};
pub use i18n::{Locale, MessageArg, EN_US};
pub use server::{router, serve, ApiJson};
