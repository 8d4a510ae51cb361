//! # Activation Module / 激活模块
//!
//! Enables and disables test files by renaming them. A disabled file carries
//! the layout's disabled suffix (`.ignore`), which hides it from the game.
//!
//! 通过重命名来启用和禁用测试文件。被禁用的文件带有布局中的禁用后缀（`.ignore`），
//! 从而对游戏隐藏。

use std::fs;

use crate::core::error::{Result, RunnerError};
use crate::core::models::{Catalog, FileState, TestFile};

/// Brings every file in line with the ignore list.
///
/// Files named in `ignored` end up disabled, all others end up active,
/// whatever their state on disk was before. Running it twice is a no-op.
/// The first failed rename stops the pass; files already renamed keep their
/// new state in the catalog. A rename never replaces an existing file.
///
/// 使每个文件与忽略列表保持一致。
/// `ignored` 中列出的文件最终被禁用，其余文件最终被激活，无论之前的磁盘状态如何。
/// 重复执行不会产生变化。第一次重命名失败会终止处理；已重命名的文件在目录中保留新状态。
pub fn deactivate(catalog: &mut Catalog, ignored: &[String]) -> Result<()> {
    for file in catalog.files_mut() {
        let target = if ignored.iter().any(|name| *name == file.name) {
            FileState::Disabled
        } else {
            FileState::Active
        };
        transition(file, target)?;
    }
    Ok(())
}

/// Restores every file to its active name.
///
/// This is the cleanup step of a run and must be called on error paths too.
///
/// 将每个文件恢复为激活名称。这是运行的清理步骤，在错误路径上也必须调用。
pub fn activate_all(catalog: &mut Catalog) -> Result<()> {
    for file in catalog.files_mut() {
        transition(file, FileState::Active)?;
    }
    Ok(())
}

fn transition(file: &mut TestFile, target: FileState) -> Result<()> {
    if file.state() == target {
        return Ok(());
    }

    let from = file.path().to_path_buf();
    let to = file.path_in(target);
    // rename(2) replaces an existing target; a leftover file must not be lost.
    if to.exists() {
        return Err(RunnerError::RenameConflict {
            path: from,
            existing: to.to_path_buf(),
        });
    }
    fs::rename(&from, to).map_err(|source| RunnerError::Rename {
        path: from.clone(),
        target,
        source,
    })?;

    tracing::debug!(from = %from.display(), to = %to.display(), "renamed test file");
    file.set_state(target);
    Ok(())
}
