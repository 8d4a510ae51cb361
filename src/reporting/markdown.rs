//! # Markdown Reporting Module / Markdown 报告模块
//!
//! Writes `report.md` into the run output directory: run metadata, the full
//! test catalog with its activation state, and the correlated results.
//!
//! 在运行输出目录中写入 `report.md`：运行元数据、带激活状态的完整测试目录以及关联结果。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::game::GameVariant;
use crate::core::models::{Catalog, ExecutionResults};
use crate::reporting::console::format_duration;

/// File name of the report inside the run output directory.
pub const REPORT_FILE_NAME: &str = "report.md";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PASSED: &str = "✅";
const FAILED: &str = "❌";

/// Renders the report as Markdown.
pub fn render_report(results: &ExecutionResults, catalog: &Catalog, variant: GameVariant) -> String {
    let started = results.started_at.format(TIME_FORMAT).to_string();
    let finished = results.finished_at.format(TIME_FORMAT).to_string();
    let mut out = String::new();

    out.push_str(&format!("# Test Run - {}\n\n", started));
    out.push_str("## General\n\n");
    out.push_str(&format!("**Game:** {}\n\n", variant.display_name()));
    out.push_str(&format!("**Start Time:** {}\n\n", started));
    out.push_str(&format!("**End Time:** {}\n\n", finished));
    out.push_str(&format!(
        "**Duration:** {}\n\n",
        format_duration(results.duration())
    ));
    out.push_str(&format!(
        "**Results:** {} passed, {} failed\n\n",
        results.passed(),
        results.failed()
    ));

    out.push_str("## Found Test Files & Tests\n\n");
    out.push_str("| Active | Test | Description | File |\n");
    out.push_str("|---|---|---|---|\n");
    for file in catalog.files() {
        let active = if file.is_active() { PASSED } else { FAILED };
        for test in &file.tests {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                active,
                cell(&test.label()),
                cell(test.description.as_deref().unwrap_or("-")),
                cell(&file.label())
            ));
        }
    }

    out.push_str("\n## Test Results\n\n");
    out.push_str("| Success | Test | Date | Description | File |\n");
    out.push_str("|---|---|---|---|---|\n");
    for result in &results.results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            if result.success { PASSED } else { FAILED },
            cell(&result.test.label()),
            cell(&result.date),
            cell(result.test.description.as_deref().unwrap_or("-")),
            cell(&result.file_label())
        ));
    }

    out
}

/// Writes `report.md` into the run output directory and returns its path.
pub fn write_report(
    results: &ExecutionResults,
    catalog: &Catalog,
    variant: GameVariant,
) -> Result<PathBuf> {
    let path = results.output_directory.join(REPORT_FILE_NAME);
    write_to(&path, &render_report(results, catalog, variant))?;
    Ok(path)
}

fn write_to(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("error writing report {}", path.display()))
}

/// Escapes pipes so free text cannot break the table layout.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
