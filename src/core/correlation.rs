//! # Result Correlation Module / 结果关联模块
//!
//! Turns the game's completion file into [`ExecutionResults`]: the file and any
//! failure save games are archived into a fresh output directory, and every
//! result line is matched back to a test in the catalog.
//!
//! 将游戏的完成文件转换为 [`ExecutionResults`]：完成文件和失败存档被归档到新的输出目录，
//! 每一行结果都会与目录中的测试匹配。
//!
//! The game reports one line per test:
//!
//! ```text
//! [ OK ] trade_route_test ( 1837.1.1 )
//! [ FAIL ] market_test ( 1836.6.1 )
//! ```

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::config::RunnerConfig;
use crate::core::error::{Result, RunnerError};
use crate::core::game::LauncherSettings;
use crate::core::models::{Catalog, ExecutionResult, ExecutionResults};

/// Prefix the game gives save files written when a test fails.
/// 游戏为测试失败时写入的存档文件添加的前缀。
pub const FAIL_SAVE_PREFIX: &str = "TEST_FAIL_";

/// Save game directory inside the game's data path.
pub const SAVE_GAMES_DIR: &str = "save games";

/// Format of the per-run output directory name.
pub const RUN_DIRECTORY_FORMAT: &str = "%Y-%m-%d_%H_%M_%S";

const OUTCOME_OK: &str = "OK";

static RESULT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\s*(?P<outcome>OK|FAIL)\s*\]\s+(?P<name>\S+)\s+\(\s*(?P<date>.*?)\s*\)")
        .expect("result line pattern is valid")
});

/// One parsed result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLine<'a> {
    pub success: bool,
    pub name: &'a str,
    pub date: &'a str,
}

/// Parses a single `[ OK ] name ( date )` line. Anything else yields `None`.
pub fn parse_result_line(line: &str) -> Option<ResultLine<'_>> {
    let caps = RESULT_LINE.captures(line)?;
    Some(ResultLine {
        success: caps.name("outcome")?.as_str() == OUTCOME_OK,
        name: caps.name("name")?.as_str(),
        date: caps.name("date")?.as_str(),
    })
}

/// Whether the text holds at least one result line, which means the game has
/// finished its test run.
///
/// 文本是否至少包含一行结果，即游戏是否已完成测试运行。
pub fn contains_result_line(content: &str) -> bool {
    content.lines().any(|line| RESULT_LINE.is_match(line))
}

/// Matches every result line against the catalog.
///
/// Lines that are not result lines are ignored. A result for a test the
/// catalog does not know is reported and dropped.
///
/// 将每一行结果与目录进行匹配。
/// 非结果行会被忽略。目录中不存在的测试结果会被报告并丢弃。
pub fn correlate(content: &str, catalog: &Catalog) -> Vec<ExecutionResult> {
    content
        .lines()
        .filter_map(|line| {
            let parsed = parse_result_line(line)?;
            let Some((file, test)) = catalog.find_test(parsed.name) else {
                tracing::warn!(
                    test = parsed.name,
                    line,
                    "could not match test result to parsed tests"
                );
                return None;
            };
            Some(ExecutionResult {
                success: parsed.success,
                date: parsed.date.to_string(),
                test: test.clone(),
                file_name: file.name.clone(),
                file_display_name: file.display_name.clone(),
            })
        })
        .collect()
}

/// Returns `<output_root>/<started_at as YYYY-MM-DD_HH_MM_SS>`.
pub fn run_output_directory(output_root: &Path, started_at: &DateTime<Local>) -> PathBuf {
    output_root.join(started_at.format(RUN_DIRECTORY_FORMAT).to_string())
}

/// Archives the run's artifacts and correlates its results.
///
/// # Arguments
/// * `result_file` - The completion file written by the game
/// * `catalog` - The catalog the run was started with
/// * `settings` - Launcher settings, for the save directory and save suffix
/// * `config` - Output root and save game handling
/// * `started_at` - Run start time, names the output directory
///
/// # Returns
/// The correlated results. Any missing precondition (output directory not
/// creatable, save directory or completion file absent) is an error.
pub fn collect_results(
    result_file: &Path,
    catalog: &Catalog,
    settings: &LauncherSettings,
    config: &RunnerConfig,
    started_at: DateTime<Local>,
) -> Result<ExecutionResults> {
    let save_directory = settings.data_path.join(SAVE_GAMES_DIR);
    let output_directory = run_output_directory(&config.output_directory, &started_at);

    fs::create_dir_all(&output_directory).map_err(|source| RunnerError::OutputDirectory {
        path: output_directory.clone(),
        source,
    })?;
    if !save_directory.is_dir() {
        return Err(RunnerError::MissingSaveDirectory(save_directory));
    }
    if !result_file.is_file() {
        return Err(RunnerError::MissingResultFile(result_file.to_path_buf()));
    }

    archive_file(result_file, &output_directory)?;
    let archived = archive_failure_saves(
        &save_directory,
        settings.variant.save_suffix(),
        &output_directory,
        config.move_save_games,
    )?;
    tracing::info!(count = archived, "archived failure save games");

    let content = fs::read(result_file).map_err(|source| RunnerError::ReadResults {
        path: result_file.to_path_buf(),
        source,
    })?;
    let results = correlate(&String::from_utf8_lossy(&content), catalog);

    Ok(ExecutionResults {
        output_directory,
        results,
        started_at,
        finished_at: Local::now(),
    })
}

/// Copies `TEST_FAIL_*<suffix>` saves into the output directory, removing the
/// originals when `move_saves` is set. Returns how many were archived.
pub fn archive_failure_saves(
    save_directory: &Path,
    save_suffix: &str,
    output_directory: &Path,
    move_saves: bool,
) -> Result<usize> {
    let mut archived = 0;

    for entry in WalkDir::new(save_directory).sort_by_file_name() {
        let entry = entry.map_err(|e| RunnerError::Archive {
            path: save_directory.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.starts_with(FAIL_SAVE_PREFIX) || !name.ends_with(save_suffix) {
            continue;
        }

        archive_file(entry.path(), output_directory)?;
        if move_saves {
            fs::remove_file(entry.path()).map_err(|source| RunnerError::Archive {
                path: entry.path().to_path_buf(),
                source,
            })?;
        }
        archived += 1;
    }

    Ok(archived)
}

fn archive_file(file: &Path, output_directory: &Path) -> Result<PathBuf> {
    let target = output_directory.join(file.file_name().unwrap_or(file.as_os_str()));
    fs::copy(file, &target).map_err(|source| RunnerError::Archive {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(target)
}
