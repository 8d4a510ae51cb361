//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the discovered test catalog and the run summary to the
//! console, with colors and internationalization support.
//!
//! 此模块在控制台打印发现的测试目录和运行摘要，支持颜色和国际化。

use colored::*;

use crate::core::models::{Catalog, ExecutionResults, FileState};
use crate::infra::t;

/// Prints the files in the given state and their tests.
/// Active files are listed in blue, disabled ones in red.
///
/// 打印处于给定状态的文件及其测试。激活文件以蓝色列出，禁用文件以红色列出。
///
/// # Output Format / 输出格式
/// ```text
/// Found 3 tests in 2 files:
/// File: Economy (economy_tests.txt)
///  - Test: Trade routes (trade_route_test) :: Routes are established after a year
///  - Test: market_test
/// File: diplomacy_tests.txt
///  - Test: alliance_test
/// ```
pub fn print_catalog(catalog: &Catalog, state: FileState, locale: &str) {
    let (file_count, test_count) = catalog.count(state);
    let header = match state {
        FileState::Active => t!(
            "catalog.found",
            locale = locale,
            tests = test_count,
            files = file_count
        ),
        FileState::Disabled => t!(
            "catalog.ignored",
            locale = locale,
            tests = test_count,
            files = file_count
        ),
    };
    println!("{}", header.bold());

    let paint = |text: String| match state {
        FileState::Active => text.blue(),
        FileState::Disabled => text.bright_red(),
    };

    for file in catalog.files().iter().filter(|f| f.state() == state) {
        println!(
            "{} {}",
            t!("catalog.file", locale = locale).bold(),
            paint(file.label())
        );
        for test in &file.tests {
            let mut line = format!(
                " - {} {}",
                t!("catalog.test", locale = locale).bold(),
                paint(test.label())
            );
            if let Some(description) = test.description.as_deref() {
                line.push_str(&format!(" :: {}", description.green()));
            }
            println!("{}", line);
        }
    }
}

/// Prints one line per correlated result, followed by the totals.
/// 为每个关联结果打印一行，然后打印总数。
pub fn print_summary(results: &ExecutionResults, locale: &str) {
    println!("\n{}", t!("summary.banner", locale = locale).bold());

    for result in &results.results {
        let status = if result.success {
            t!("summary.status_passed", locale = locale).green()
        } else {
            t!("summary.status_failed", locale = locale).red()
        };
        println!(
            "  - {:<8} | {:<40} | {:<12} | {}",
            status,
            result.test.label(),
            result.date,
            result.file_label()
        );
    }

    println!(
        "\n{}",
        t!(
            "summary.totals",
            locale = locale,
            passed = results.passed(),
            failed = results.failed(),
            duration = format_duration(results.duration())
        )
    );
    println!(
        "{}",
        t!(
            "summary.output_directory",
            locale = locale,
            path = results.output_directory.display()
        )
        .cyan()
    );
}

/// Formats a duration as `1h 02m 03s`.
pub fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
