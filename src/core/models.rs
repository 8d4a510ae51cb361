//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! test definitions, test files with their on-disk activation state, the merged
//! catalog, and the correlated execution results.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 测试定义、带有磁盘激活状态的测试文件、合并后的目录以及关联后的执行结果。

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name suffixes that mark a test file as active or disabled on disk.
/// 在磁盘上标记测试文件为激活或禁用的文件名后缀。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    /// Suffix of a test file the game will execute (e.g. `.txt`).
    /// 游戏会执行的测试文件后缀（例如 `.txt`）。
    pub active_suffix: String,
    /// Suffix appended to a test file to hide it from the game (e.g. `.ignore`).
    /// 附加到测试文件以对游戏隐藏的后缀（例如 `.ignore`）。
    pub disabled_suffix: String,
}

impl Default for FileLayout {
    fn default() -> Self {
        Self {
            active_suffix: ".txt".to_string(),
            disabled_suffix: ".ignore".to_string(),
        }
    }
}

/// A single named test block inside a script file.
/// 脚本文件中的单个命名测试块。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDefinition {
    /// The identifier token the game reports results under.
    /// 游戏报告结果时使用的标识符。
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl TestDefinition {
    /// Returns `"Label (name)"` when a display name is set, the bare name otherwise.
    pub fn label(&self) -> String {
        labelled(self.display_name.as_deref(), &self.name)
    }
}

/// Whether the game will pick up a test file.
/// 游戏是否会读取某个测试文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileState {
    Active,
    Disabled,
}

/// A script file containing test definitions. This is the unit of activation.
///
/// The on-disk state is held as a [`FileState`]; the current path is derived
/// from it, so the disabled suffix only exists at rename time.
///
/// 包含测试定义的脚本文件，是激活/禁用的基本单位。
/// 磁盘状态保存为 [`FileState`]，当前路径由其推导得出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    /// Base file name without the disabled suffix, used as the override key.
    /// 不含禁用后缀的基础文件名，用作覆盖键。
    pub name: String,
    pub display_name: Option<String>,
    pub last_run_date: Option<String>,
    pub tests: Vec<TestDefinition>,
    active_path: PathBuf,
    disabled_path: PathBuf,
    state: FileState,
}

impl TestFile {
    /// Builds a test file from its path as found on disk.
    /// A path ending in the disabled suffix yields a [`FileState::Disabled`] file.
    ///
    /// 根据磁盘上找到的路径构建测试文件。
    /// 以禁用后缀结尾的路径会得到 [`FileState::Disabled`] 状态的文件。
    pub fn from_disk(path: &Path, layout: &FileLayout, tests: Vec<TestDefinition>) -> Self {
        let raw = path.to_string_lossy();
        let (active_path, state) = match raw.strip_suffix(layout.disabled_suffix.as_str()) {
            Some(stripped) => (PathBuf::from(stripped), FileState::Disabled),
            None => (path.to_path_buf(), FileState::Active),
        };
        let mut disabled = active_path.clone().into_os_string();
        disabled.push(&layout.disabled_suffix);
        let name = active_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            display_name: None,
            last_run_date: None,
            tests,
            active_path,
            disabled_path: PathBuf::from(disabled),
            state,
        }
    }

    /// The file's current location on disk.
    pub fn path(&self) -> &Path {
        self.path_in(self.state)
    }

    /// The location the file has (or would have) in the given state.
    pub fn path_in(&self, state: FileState) -> &Path {
        match state {
            FileState::Active => &self.active_path,
            FileState::Disabled => &self.disabled_path,
        }
    }

    pub fn state(&self) -> FileState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == FileState::Active
    }

    /// Records a completed rename. Only the activation module calls this.
    pub(crate) fn set_state(&mut self, state: FileState) {
        self.state = state;
    }

    pub fn label(&self) -> String {
        labelled(self.display_name.as_deref(), &self.name)
    }
}

/// The merged set of test files for a run.
///
/// Files of one source are kept as found, so two files with the same name in
/// different subdirectories both stay in the catalog. Only an overlay passed
/// to [`Catalog::merge`] replaces files by name.
///
/// 一次运行中合并后的测试文件集合。
/// 同一来源的文件按原样保留，因此不同子目录中的同名文件都会留在目录中。
/// 只有传给 [`Catalog::merge`] 的覆盖层才会按名称替换文件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    files: Vec<TestFile>,
}

impl Catalog {
    /// Wraps the files of a single source without deduplicating them.
    pub fn new(files: Vec<TestFile>) -> Self {
        Self { files }
    }

    /// Merges an overlay into the catalog with whole-file override semantics.
    ///
    /// A file whose name is already present replaces the first existing entry
    /// with that name at its position, tests included. Any other file is
    /// appended.
    ///
    /// 以整文件覆盖语义将覆盖层合并到目录中。
    /// 名称已存在的文件会在原位置替换第一个同名条目（包括其全部测试），其他文件追加到末尾。
    pub fn merge(&mut self, overlay: Vec<TestFile>) {
        for file in overlay {
            match self.files.iter().position(|existing| existing.name == file.name) {
                Some(index) => self.files[index] = file,
                None => self.files.push(file),
            }
        }
    }

    /// Drops files that carry no tests.
    pub fn prune_empty(&mut self) {
        self.files.retain(|file| !file.tests.is_empty());
    }

    pub fn files(&self) -> &[TestFile] {
        &self.files
    }

    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut TestFile> {
        self.files.iter_mut()
    }

    pub fn get(&self, name: &str) -> Option<&TestFile> {
        self.files.iter().find(|file| file.name == name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Finds the first file/test pair with the given test name, in catalog order.
    /// 按目录顺序查找第一个具有给定测试名称的文件/测试对。
    pub fn find_test(&self, name: &str) -> Option<(&TestFile, &TestDefinition)> {
        self.files.iter().find_map(|file| {
            file.tests
                .iter()
                .find(|test| test.name == name)
                .map(|test| (file, test))
        })
    }

    /// Test names defined in more than one file, with the files defining them.
    pub fn duplicate_test_names(&self) -> Vec<(String, Vec<String>)> {
        let mut seen: HashMap<&str, Vec<String>> = HashMap::new();
        let mut order = Vec::new();
        for file in &self.files {
            for test in &file.tests {
                let owners = seen.entry(test.name.as_str()).or_insert_with(|| {
                    order.push(test.name.as_str());
                    Vec::new()
                });
                if !owners.contains(&file.name) {
                    owners.push(file.name.clone());
                }
            }
        }
        order
            .into_iter()
            .filter_map(|name| {
                let owners = &seen[name];
                (owners.len() > 1).then(|| (name.to_string(), owners.clone()))
            })
            .collect()
    }

    /// Number of files and tests in the given state.
    pub fn count(&self, state: FileState) -> (usize, usize) {
        self.files
            .iter()
            .filter(|file| file.state() == state)
            .fold((0, 0), |(files, tests), file| (files + 1, tests + file.tests.len()))
    }
}

/// Outcome of one test as reported by the game, matched to the catalog.
/// 游戏报告的单个测试结果，已与目录匹配。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    /// In-game date printed next to the result, kept verbatim.
    /// 结果旁打印的游戏内日期，原样保留。
    pub date: String,
    pub test: TestDefinition,
    pub file_name: String,
    pub file_display_name: Option<String>,
}

impl ExecutionResult {
    pub fn file_label(&self) -> String {
        labelled(self.file_display_name.as_deref(), &self.file_name)
    }
}

/// Everything a single run produced.
/// 单次运行产生的全部内容。
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResults {
    /// Timestamped directory holding the archived artifacts of this run.
    /// 保存本次运行归档产物的带时间戳目录。
    pub output_directory: PathBuf,
    pub results: Vec<ExecutionResult>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl ExecutionResults {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }
}

fn labelled(display_name: Option<&str>, name: &str) -> String {
    match display_name.map(str::trim).filter(|d| !d.is_empty()) {
        Some(display) => format!("{} ({})", display, name),
        None => name.to_string(),
    }
}
