//! # List Command Module / 列表命令模块
//!
//! Prints the discovered catalog with each file's current state on disk,
//! without renaming anything.
//!
//! 打印发现的测试目录及每个文件当前的磁盘状态，不重命名任何文件。

use anyhow::Result;
use std::path::PathBuf;

use super::Workspace;
use crate::core::models::FileState;
use crate::reporting::print_catalog;

pub fn execute(config: PathBuf, lang: Option<String>) -> Result<()> {
    let workspace = Workspace::load(&config, lang.as_deref())?;

    print_catalog(&workspace.catalog, FileState::Active, &workspace.locale);
    if workspace.catalog.count(FileState::Disabled).0 > 0 {
        print_catalog(&workspace.catalog, FileState::Disabled, &workspace.locale);
    }
    Ok(())
}
