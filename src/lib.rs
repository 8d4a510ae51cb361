//! # Scripted Test Runner Library / 脚本测试运行器库
//!
//! This library provides the core functionality for the Scripted Test Runner,
//! a tool that runs the embedded scripted tests of a grand-strategy game across
//! the base game and any number of mods, and reports the results.
//!
//! 此库为脚本测试运行器提供核心功能，
//! 该工具在基础游戏和任意数量的模组上运行大战略游戏内置的脚本测试，并报告结果。
//!
//! ## Modules / 模块
//!
//! - `core` - Test catalog, activation, game execution and result correlation
//! - `infra` - Infrastructure services like the run lock and logging
//! - `reporting` - Console and Markdown reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 测试目录、激活、游戏执行和结果关联
//! - `infra` - 基础设施服务，如运行锁和日志
//! - `reporting` - 控制台和 Markdown 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;

/// Picks the locale to use for the runner's messages.
///
/// A requested locale (e.g. from `--lang` or the config file) wins, otherwise
/// the system locale is detected. It attempts to match the full locale (e.g.
/// "zh-CN"), then just the language code (e.g. "en"), and finally falls back
/// to the default language ("en").
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
