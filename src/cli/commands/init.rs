//! # Config Initialization Module / 配置初始化模块
//!
//! This module provides functionality for creating a new runner configuration
//! through an interactive command-line wizard, or from defaults when running
//! non-interactively.
//!
//! 此模块通过交互式命令行向导创建新的运行器配置，
//! 或在非交互模式下使用默认值创建。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for the game directory, mods and ignored files
//! - **Overwrite Protection**: Confirmation prompt (or `--force`) before overwriting
//!
//! - **交互式向导**: 提示输入游戏目录、模组和忽略的文件
//! - **覆盖保护**: 覆盖现有配置前需确认（或使用 `--force`）

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::RunnerConfig;
use crate::infra::t;

/// Game directory written into a non-interactive config. Meant to be edited.
const PLACEHOLDER_GAME_DIRECTORY: &str = "path/to/game";

/// Runs the wizard and writes the resulting config to `output`.
///
/// 运行向导并将生成的配置写入 `output`。
pub fn run_init_wizard(
    output: &Path,
    language: &str,
    non_interactive: bool,
    force: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
        println!("{}", t!("init.description", locale = language));
    }

    if output.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                t!("init.file_exists", locale = language, path = output.display()).red()
            );
            println!("{}", t!("init.use_force", locale = language).yellow());
            return Ok(());
        }
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(
                t!("init.overwrite_prompt", locale = language, path = output.display()).to_string(),
            )
            .default(false)
            .interact()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let config = if non_interactive {
        RunnerConfig::new(PLACEHOLDER_GAME_DIRECTORY)
    } else {
        prompt_config(&theme, language)?
    };

    write_config(output, &config, language)?;

    println!(
        "{}",
        t!("init.success", locale = language, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = language));
    Ok(())
}

fn prompt_config(theme: &ColorfulTheme, language: &str) -> Result<RunnerConfig> {
    let game_directory: String = Input::with_theme(theme)
        .with_prompt(t!("init.game_directory_prompt", locale = language).to_string())
        .interact_text()
        .context(t!("init.input_failed", locale = language).to_string())?;

    let mod_directories: String = Input::with_theme(theme)
        .with_prompt(t!("init.mod_directories_prompt", locale = language).to_string())
        .allow_empty(true)
        .interact_text()
        .context(t!("init.input_failed", locale = language).to_string())?;

    let ignored_files: String = Input::with_theme(theme)
        .with_prompt(t!("init.ignored_files_prompt", locale = language).to_string())
        .allow_empty(true)
        .interact_text()
        .context(t!("init.input_failed", locale = language).to_string())?;

    let output_directory: String = Input::with_theme(theme)
        .with_prompt(t!("init.output_directory_prompt", locale = language).to_string())
        .default("output".to_string())
        .interact_text()
        .context(t!("init.input_failed", locale = language).to_string())?;

    let mut config = RunnerConfig::new(game_directory.trim());
    config.mod_directories = split_list(&mod_directories)
        .into_iter()
        .map(PathBuf::from)
        .collect();
    config.ignored_files = split_list(&ignored_files);
    config.output_directory = PathBuf::from(output_directory.trim());
    config.language = Some(language.to_string());
    Ok(config)
}

/// Splits a comma separated answer into its non-empty entries.
pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_config(output: &Path, config: &RunnerConfig, language: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init.create_parent_dir_failed", locale = language, path = parent.display())
                .to_string()
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;
    fs::write(output, content + "\n").with_context(|| {
        t!("init.write_failed", locale = language, path = output.display()).to_string()
    })?;
    Ok(())
}
