//! 本地化消息模块
//!
//! 提供错误消息的本地化渲染：同一模板与参数可分别渲染为
//! 非区域感知的普通消息和带数字分组的本地化消息

use std::fmt;

/// 参考区域设置：美式英语
pub const EN_US: Locale = Locale {
    tag: "en-US",
    group_sep: ',',
    decimal_sep: '.',
};

/// 区域设置
///
/// 描述 BCP-47 语言标签及其数字格式约定，构建后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    tag: &'static str,
    group_sep: char,
    decimal_sep: char,
}

impl Locale {
    /// 获取 BCP-47 标签
    #[inline]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// 按本区域设置格式化单个消息参数
    ///
    /// 整数与浮点数的整数部分按千位分组，文本参数原样返回
    pub fn format_arg(&self, arg: &MessageArg) -> String {
        match arg {
            MessageArg::Int(v) => {
                let digits = v.unsigned_abs().to_string();
                let grouped = group_digits(&digits, self.group_sep);
                if *v < 0 {
                    format!("-{grouped}")
                } else {
                    grouped
                }
            }
            MessageArg::Uint(v) => group_digits(&v.to_string(), self.group_sep),
            MessageArg::Float(v) => {
                let plain = v.to_string();
                let (sign, rest) = match plain.strip_prefix('-') {
                    Some(rest) => ("-", rest),
                    None => ("", plain.as_str()),
                };
                match rest.split_once('.') {
                    Some((int, frac)) => format!(
                        "{sign}{}{}{frac}",
                        group_digits(int, self.group_sep),
                        self.decimal_sep
                    ),
                    None => format!("{sign}{}", group_digits(rest, self.group_sep)),
                }
            }
            MessageArg::Text(s) => s.clone(),
        }
    }
}

/// 消息格式参数
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Int(v) => write!(f, "{v}"),
            MessageArg::Uint(v) => write!(f, "{v}"),
            MessageArg::Float(v) => write!(f, "{v}"),
            MessageArg::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageArg {
    fn from(v: i64) -> Self {
        MessageArg::Int(v)
    }
}

impl From<i32> for MessageArg {
    fn from(v: i32) -> Self {
        MessageArg::Int(v.into())
    }
}

impl From<u64> for MessageArg {
    fn from(v: u64) -> Self {
        MessageArg::Uint(v)
    }
}

impl From<u32> for MessageArg {
    fn from(v: u32) -> Self {
        MessageArg::Uint(v.into())
    }
}

impl From<usize> for MessageArg {
    fn from(v: usize) -> Self {
        MessageArg::Uint(v as u64)
    }
}

impl From<f64> for MessageArg {
    fn from(v: f64) -> Self {
        MessageArg::Float(v)
    }
}

impl From<&str> for MessageArg {
    fn from(v: &str) -> Self {
        MessageArg::Text(v.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(v: String) -> Self {
        MessageArg::Text(v)
    }
}

/// 以非区域感知方式渲染模板
///
/// 按顺序将 `{}` 占位符替换为参数的普通字符串形式
pub fn render_plain(template: &str, args: &[MessageArg]) -> String {
    render_with(template, args, |arg| arg.to_string())
}

/// 以区域感知方式渲染模板
pub fn render_localized(locale: &Locale, template: &str, args: &[MessageArg]) -> String {
    render_with(template, args, |arg| locale.format_arg(arg))
}

/// 占位符替换：渲染永不失败
///
/// 多余的占位符渲染为空串，多余的参数被忽略
fn render_with<F>(template: &str, args: &[MessageArg], render: F) -> String
where
    F: Fn(&MessageArg) -> String,
{
    let mut out = String::with_capacity(template.len());
    let mut next = 0usize;
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '{' && chars.peek() == Some(&'}') {
            chars.next();
            if let Some(arg) = args.get(next) {
                out.push_str(&render(arg));
            }
            next += 1;
        } else {
            out.push(ch);
        }
    }
    out
}

/// 从右向左每三位插入一个分组分隔符
fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
