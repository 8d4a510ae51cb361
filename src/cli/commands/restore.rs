//! # Restore Command Module / 恢复命令模块
//!
//! Re-enables every discovered test file. Used to put an installation back
//! into its default state after an interrupted run.
//!
//! 重新启用所有发现的测试文件。用于在运行中断后将安装恢复到默认状态。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use super::Workspace;
use crate::core::{activation, models::FileState};
use crate::infra::t;

pub fn execute(config: PathBuf, lang: Option<String>) -> Result<()> {
    let Workspace {
        mut catalog,
        locale,
        ..
    } = Workspace::load(&config, lang.as_deref())?;

    let (disabled, _) = catalog.count(FileState::Disabled);
    activation::activate_all(&mut catalog)
        .with_context(|| t!("error.restore", locale = &locale).to_string())?;

    println!(
        "{}",
        t!("restore.done", locale = &locale, count = disabled).green()
    );
    Ok(())
}
