//! 本地化渲染测试
//!
//! 同一模板与参数的普通渲染与区域感知渲染应当在数字参数上产生差异

use whimsy_server_core::i18n::{render_localized, render_plain, EN_US};

#[test]
fn groups_integer_digits_under_en_us() {
    assert_eq!(render_localized(&EN_US, "{}", &[331.into()]), "331");
    assert_eq!(render_localized(&EN_US, "{}", &[4331.into()]), "4,331");
    assert_eq!(
        render_localized(&EN_US, "{}", &[1_234_567.into()]),
        "1,234,567"
    );
    assert_eq!(render_localized(&EN_US, "{}", &[(-4331i64).into()]), "-4,331");

    // 普通渲染保持非区域感知
    assert_eq!(render_plain("{}", &[4331.into()]), "4331");
}

#[test]
fn groups_only_the_integer_part_of_floats() {
    assert_eq!(render_localized(&EN_US, "{}", &[1234.5f64.into()]), "1,234.5");
    assert_eq!(render_localized(&EN_US, "{}", &[12.5f64.into()]), "12.5");
}

#[test]
fn leaves_text_arguments_untouched() {
    assert_eq!(
        render_localized(&EN_US, "{} is not a duck", &["Goose".into()]),
        "Goose is not a duck"
    );
}

#[test]
fn rendering_never_fails() {
    // 多余的占位符渲染为空串
    assert_eq!(render_plain("{} and {}", &[1.into()]), "1 and ");
    // 多余的参数被忽略
    assert_eq!(render_plain("just text", &[1.into()]), "just text");
    assert_eq!(render_plain("", &[]), "");
}

#[test]
fn exposes_the_bcp47_tag() {
    assert_eq!(EN_US.tag(), "en-US");
}
