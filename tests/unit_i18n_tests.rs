//! # I18n Unit Tests / I18n 单元测试
//!
//! Tests for picking the message locale.
//!
//! 测试消息语言的选择。

use scripted_test_runner::resolve_locale;

#[cfg(test)]
mod resolve_locale_tests {
    use super::*;

    #[test]
    fn test_supported_locale_is_kept() {
        assert_eq!(resolve_locale(Some("en")), "en");
        assert_eq!(resolve_locale(Some("zh-CN")), "zh-CN");
    }

    #[test]
    fn test_language_code_is_matched() {
        assert_eq!(resolve_locale(Some("en-US")), "en");
        assert_eq!(resolve_locale(Some("en-GB")), "en");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        assert_eq!(resolve_locale(Some("invalid-lang")), "en");
        assert_eq!(resolve_locale(Some("")), "en");
        assert_eq!(resolve_locale(Some("fr-FR")), "en");
    }

    #[test]
    fn test_system_locale_is_supported() {
        let locale = resolve_locale(None);
        assert!(locale == "en" || locale == "zh-CN");
    }
}
