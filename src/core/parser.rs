//! # Test Script Parser Module / 测试脚本解析模块
//!
//! Extracts scripted test definitions from the game's script files. A block is
//! treated as a test when its body opens with one of the result-policy keywords
//! (`acceptable_fail_rate`, `success`, `fail`); everything else is generic
//! script data and is skipped.
//!
//! 从游戏脚本文件中提取脚本化测试定义。当一个块的主体以结果策略关键字
//! （`acceptable_fail_rate`、`success`、`fail`）开头时，它被视为测试；
//! 其他内容均为普通脚本数据，将被跳过。
//!
//! ```text
//! # @file: Economy
//! last_date = 1836.1.1
//!
//! # @name: Trade routes
//! # @description: Routes are established after a year
//! trade_route_test = {
//!     success = { ... }
//! }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::core::error::{Result, RunnerError};
use crate::core::models::{FileLayout, TestDefinition, TestFile};

static TEST_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*",
        r"(?:#[ \t]*@name[ \t]*:?[ \t]*(?P<display>[^\r\n]*?)[ \t]*\r?\n\s*)?",
        r"(?:#[ \t]*@description[ \t]*:?[ \t]*(?P<description>[^\r\n]*?)[ \t]*\r?\n\s*)?",
        r"(?P<test>[A-Za-z0-9_\-]+)\s*=\s*\{\s+(?:acceptable_fail_rate|success|fail)\b",
    ))
    .expect("test block pattern is valid")
});

static LAST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*last_date\s*=\s*(?P<date>[^\r\n#]*?)[ \t]*\r?$")
        .expect("last date pattern is valid")
});

static FILE_DISPLAY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#[ \t]*@file[ \t]*:?[ \t]*(?P<display>[^\r\n]*?)[ \t]*\r?$")
        .expect("file display name pattern is valid")
});

/// What a single script file contains.
/// 单个脚本文件包含的内容。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub tests: Vec<TestDefinition>,
    pub last_run_date: Option<String>,
    pub display_name: Option<String>,
}

/// Extracts all test definitions and the file-level metadata from script text.
///
/// Marker lines only attach to the identifier directly below them; blank lines
/// and indentation in between are allowed, anything else breaks the link.
/// Without a `@description` marker, a plain `#` comment line directly above the
/// identifier is used as the description.
///
/// 从脚本文本中提取所有测试定义和文件级元数据。
/// 标记行只附加到紧随其后的标识符上；中间允许空行和缩进，其他内容会断开关联。
/// 没有 `@description` 标记时，标识符正上方的普通 `#` 注释行会用作描述。
pub fn extract(content: &str) -> Extraction {
    let tests = TEST_BLOCK
        .captures_iter(content)
        .map(|caps| {
            let test = caps.name("test").map_or(0, |m| m.start());
            let description = non_empty(caps.name("description").map(|m| m.as_str()))
                .or_else(|| comment_above(&content[..test]));
            TestDefinition {
                name: caps["test"].to_string(),
                display_name: non_empty(caps.name("display").map(|m| m.as_str())),
                description,
            }
        })
        .collect();

    let last_run_date = LAST_DATE
        .captures(content)
        .and_then(|caps| non_empty(caps.name("date").map(|m| m.as_str())));

    let display_name = FILE_DISPLAY_NAME
        .captures(content)
        .and_then(|caps| non_empty(caps.name("display").map(|m| m.as_str())));

    Extraction {
        tests,
        last_run_date,
        display_name,
    }
}

/// Reads and parses one test file.
///
/// A file without tests is still returned; the catalog prunes it after merging
/// so that an empty mod file still overrides a base file of the same name.
pub fn parse_test_file(path: &Path, layout: &FileLayout) -> Result<TestFile> {
    let content = fs::read_to_string(path).map_err(|source| RunnerError::ReadTestFile {
        path: path.to_path_buf(),
        source,
    })?;

    // Game script files are commonly saved with a UTF-8 byte order mark.
    let extraction = extract(content.trim_start_matches('\u{feff}'));
    if extraction.tests.is_empty() {
        tracing::debug!(file = %path.display(), "no tests found in file");
    }

    let mut file = TestFile::from_disk(path, layout, extraction.tests);
    file.display_name = extraction.display_name;
    file.last_run_date = extraction.last_run_date;
    Ok(file)
}

/// The last non-blank line of `preceding`, if it is a plain `#` comment.
/// Marker comments (`# @...`) are not descriptions.
fn comment_above(preceding: &str) -> Option<String> {
    let line = preceding.lines().rev().find(|line| !line.trim().is_empty())?;
    let comment = line.trim().strip_prefix('#')?.trim();
    if comment.starts_with('@') {
        return None;
    }
    non_empty(Some(comment))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
