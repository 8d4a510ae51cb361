//! # Commands Module / 命令模块
//!
//! The subcommands of the CLI and the setup they share: loading the runner
//! config and launcher settings and discovering the test catalog.
//!
//! CLI 的子命令及其共享的准备工作：加载运行器配置和启动器设置，并发现测试目录。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::core::{
    config::RunnerConfig,
    discovery,
    game::LauncherSettings,
    models::{Catalog, FileLayout},
};
use crate::infra::{fs::resolve_against, t};

pub mod init;
pub mod list;
pub mod restore;
pub mod run;

/// Everything a command needs before it touches the test files.
/// 命令在操作测试文件之前所需的一切。
#[derive(Debug)]
pub struct Workspace {
    pub config: RunnerConfig,
    pub settings: LauncherSettings,
    pub catalog: Catalog,
    pub locale: String,
}

impl Workspace {
    /// Loads config and launcher settings, then discovers the catalog.
    ///
    /// Relative paths in the config are taken relative to the config file.
    /// Nothing on disk is modified.
    pub fn load(config_path: &Path, requested_locale: Option<&str>) -> Result<Self> {
        // For config parsing, we don't have the locale yet. Use the pre-parsed one.
        let locale = crate::resolve_locale(requested_locale);
        println!(
            "{}",
            t!("run.loading_config", locale = &locale, path = config_path.display())
        );
        let mut config = RunnerConfig::load(config_path).with_context(|| {
            t!("error.config_load", locale = &locale, path = config_path.display()).to_string()
        })?;

        let locale = match (requested_locale, config.language.as_deref()) {
            (None, Some(configured)) => crate::resolve_locale(Some(configured)),
            _ => locale,
        };
        rust_i18n::set_locale(&locale);

        let base = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.game_directory = resolve_against(&base, &config.game_directory);
        config.output_directory = resolve_against(&base, &config.output_directory);
        config.mod_directories = config
            .mod_directories
            .iter()
            .map(|dir| resolve_against(&base, dir))
            .collect();

        println!("{}", t!("run.loading_settings", locale = &locale));
        let settings = LauncherSettings::load(&config.game_directory).with_context(|| {
            t!(
                "error.settings_load",
                locale = &locale,
                path = config.game_directory.display()
            )
            .to_string()
        })?;
        println!(
            "{}",
            t!("run.game_detected", locale = &locale, game = settings.variant).cyan()
        );

        println!("{}", t!("run.reading_tests", locale = &locale));
        let catalog = discovery::discover(
            &settings.content_path,
            &config.mod_directories,
            &FileLayout::default(),
            &settings.variant.skipped_files(),
        )
        .with_context(|| t!("error.discovery", locale = &locale).to_string())?;

        Ok(Self {
            config,
            settings,
            catalog,
            locale,
        })
    }
}
