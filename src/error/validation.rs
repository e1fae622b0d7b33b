//! 校验失败适配器
//!
//! 将校验库报告的逐字段失败列表转换为字段违规模型；
//! 校验库本身是外部协作者，仅通过其失败报告被消费

use super::details::FieldViolation;
use crate::i18n::{self, MessageArg};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// 规范化字段路径时剥离的根段
const ROOT_SEGMENT: &str = "User.";

/// 旧版字段标记映射中的通用标记值
pub const INVALID_MARKER: &str = "invalid";

/// P.O. Box 失败在旧版映射中的固定消息
const PO_BOX_MARKER: &str = "We don’t accept P.O. boxes";

/// 校验库报告的单个字段失败
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    /// 完整的点分路径，如 `User.Title.CasedID`
    pub namespace: String,
    /// 失败种类标签，如 `required`、`gte`
    pub kind: String,
    /// 违规值的字符串形式
    pub value: String,
    /// 校验库自带的默认消息
    pub message: String,
}

impl FieldFailure {
    /// 创建字段失败
    pub fn new(
        namespace: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            kind: kind.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// 校验库的失败报告
///
/// 保持报告顺序；重复字段作为独立条目保留
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("{} field(s) failed validation", .failures.len())]
pub struct ValidationReport {
    failures: Vec<FieldFailure>,
}

impl ValidationReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条失败
    pub fn push(&mut self, failure: FieldFailure) {
        self.failures.push(failure);
    }

    /// 报告中的失败条数
    #[inline]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// 报告是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// 按报告顺序访问失败列表
    #[inline]
    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }
}

impl FromIterator<FieldFailure> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = FieldFailure>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}

/// 失败种类 → 描述模板 的只读查找表
///
/// 模板中的 `{}` 会被替换为违规值；
/// 服务启动前构建完成，之后仅被并发只读访问
#[derive(Debug, Clone)]
pub struct ValidationMessages {
    templates: HashMap<&'static str, &'static str>,
}

impl ValidationMessages {
    /// 构建内置消息表
    pub fn builtin() -> Self {
        let mut templates = HashMap::new();
        templates.insert("gte", "Must be greater than or equal to {}.");
        templates.insert("gt", "Must be greater than to {}.");
        templates.insert("lte", "Must be less than or equal to {}.");
        templates.insert("lt", "Must be less than {}.");
        templates.insert("required", "Required.");
        templates.insert("required_unless", "Required.");
        templates.insert("required_with", "Required.");
        templates.insert("not_po_box", "P.O. Box not supported.");
        Self { templates }
    }

    /// 渲染某一失败的描述
    ///
    /// 未识别的失败种类回退到校验库自带的默认消息
    pub fn describe(&self, failure: &FieldFailure) -> String {
        match self.templates.get(failure.kind.as_str()) {
            Some(template) => {
                i18n::render_plain(template, &[MessageArg::from(failure.value.clone())])
            }
            None => failure.message.clone(),
        }
    }
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 进程级只读默认消息表
static BUILTIN_MESSAGES: LazyLock<ValidationMessages> = LazyLock::new(ValidationMessages::builtin);

/// 获取进程级默认消息表
pub fn builtin_messages() -> &'static ValidationMessages {
    &BUILTIN_MESSAGES
}

/// 将失败报告转换为有序的字段违规序列
///
/// 顺序与报告一致，重复字段不去重
pub fn parse_field_violations(
    messages: &ValidationMessages,
    report: &ValidationReport,
) -> Vec<FieldViolation> {
    report
        .failures()
        .iter()
        .map(|failure| {
            FieldViolation::new(format_attribute(&failure.namespace), messages.describe(failure))
        })
        .collect()
}

/// 生成旧版 字段 → 标记 映射
///
/// 重复字段后写覆盖；仅 P.O. Box 失败使用固定消息替代通用标记
pub fn parse_field_errors(report: &ValidationReport) -> HashMap<String, String> {
    let mut out = HashMap::with_capacity(report.len());
    for failure in report.failures() {
        let marker = if failure.kind == "not_po_box" {
            PO_BOX_MARKER
        } else {
            INVALID_MARKER
        };
        out.insert(format_attribute(&failure.namespace), marker.to_string());
    }
    out
}

/// 字段路径规范化：`User.Title.CasedID` → `title.casedID`
///
/// 剥离根段后，每个段首字符小写；
/// 这是展示约定，用于将内部结构路径与客户端字段名解耦
pub fn format_attribute(input: &str) -> String {
    let input = input.strip_prefix(ROOT_SEGMENT).unwrap_or(input);
    let mut out = String::with_capacity(input.len());
    let mut lower_next = true;
    for ch in input.chars() {
        if lower_next {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        lower_next = ch == '.';
    }
    out
}
