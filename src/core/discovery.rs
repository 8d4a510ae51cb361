//! # Test Discovery Module / 测试发现模块
//!
//! Walks the scripted test directories of the base game and every configured
//! mod, and merges them into a single [`Catalog`].
//!
//! 遍历基础游戏和每个已配置模组的脚本测试目录，并将它们合并为一个 [`Catalog`]。

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{Result, RunnerError};
use crate::core::models::{Catalog, FileLayout, FileState, TestFile};
use crate::core::parser::parse_test_file;

/// Location of the scripted tests below a game or mod root.
/// 游戏或模组根目录下脚本测试的位置。
pub const SCRIPTED_TESTS_DIR: [&str; 2] = ["tools", "scripted_tests"];

/// Returns `<root>/tools/scripted_tests`.
pub fn scripted_tests_dir(root: &Path) -> PathBuf {
    SCRIPTED_TESTS_DIR
        .iter()
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Recursively parses every test file below `root`.
///
/// Only files ending in the active or disabled suffix are considered. Files
/// whose active path ends with one of the `skip` entries are left out. The
/// walk is sorted by file name so the resulting order is stable.
///
/// A missing or unreadable directory, or an unreadable file, fails the whole
/// scan; no partial result is returned.
///
/// 递归解析 `root` 下的每个测试文件。
/// 只考虑以激活或禁用后缀结尾的文件；激活路径以 `skip` 中任一条目结尾的文件会被排除。
/// 遍历按文件名排序，以保证结果顺序稳定。
/// 目录缺失或不可读、文件不可读都会使整个扫描失败，不返回部分结果。
pub fn scan_directory(root: &Path, layout: &FileLayout, skip: &[String]) -> Result<Vec<TestFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| RunnerError::ScanDirectory {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let base_name = file_name
            .strip_suffix(layout.disabled_suffix.as_str())
            .unwrap_or(&file_name);
        if !base_name.ends_with(&layout.active_suffix) {
            continue;
        }

        let candidate = TestFile::from_disk(entry.path(), layout, Vec::new());
        let active_path = candidate.path_in(FileState::Active);
        if skip.iter().any(|s| active_path.ends_with(s)) {
            tracing::debug!(file = %entry.path().display(), "skipping excluded test file");
            continue;
        }

        files.push(parse_test_file(entry.path(), layout)?);
    }

    Ok(files)
}

/// Builds the catalog for a run.
///
/// The base game is scanned first, then each mod in order; a later source
/// replaces any same-named file from an earlier one. Files that end up without
/// tests are dropped after merging.
///
/// 构建一次运行的目录。
/// 先扫描基础游戏，再按顺序扫描每个模组；后出现的来源会替换之前的同名文件。
/// 合并后没有测试的文件会被丢弃。
pub fn discover(
    content_root: &Path,
    mod_roots: &[PathBuf],
    layout: &FileLayout,
    skip: &[String],
) -> Result<Catalog> {
    let mut catalog = Catalog::new(scan_directory(
        &scripted_tests_dir(content_root),
        layout,
        skip,
    )?);

    for mod_root in mod_roots {
        let overlay = scan_directory(&scripted_tests_dir(mod_root), layout, skip)?;
        tracing::debug!(
            mod_root = %mod_root.display(),
            files = overlay.len(),
            "merging mod test files"
        );
        catalog.merge(overlay);
    }

    catalog.prune_empty();

    for (test, files) in catalog.duplicate_test_names() {
        tracing::warn!(
            test = %test,
            files = %files.join(", "),
            "test name defined in several files, results will match the first one"
        );
    }

    Ok(catalog)
}
