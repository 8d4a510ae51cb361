//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of test reports.
//! It prints colorful, internationalized summaries to the console and writes
//! a Markdown report into each run's output directory.
//!
//! 此模块处理测试报告的生成和显示。
//! 它在控制台打印彩色、国际化的摘要，并在每次运行的输出目录中写入 Markdown 报告。

pub mod console;
pub mod markdown;

// Re-export common reporting functions
pub use console::{print_catalog, print_summary};
pub use markdown::write_report;
