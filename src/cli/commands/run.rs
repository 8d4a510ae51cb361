//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: it disables the ignored test
//! files, runs the game, collects and reports the results, and restores every
//! test file afterwards, whether the run succeeded or not.
//!
//! 此模块实现了 `run` 命令：禁用被忽略的测试文件，运行游戏，收集并报告结果，
//! 之后无论运行成功与否都会恢复所有测试文件。

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use super::Workspace;
use crate::{
    core::{
        activation,
        config::RunnerConfig,
        correlation,
        execution::{self, ExecutionOptions},
        game::LauncherSettings,
        models::{Catalog, ExecutionResults, FileState},
    },
    infra::{fs::RunLock, t},
    reporting::{print_catalog, print_summary, write_report},
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `config` - Path to the runner configuration file
/// * `report_ignored` - Whether to also list the disabled test files
/// * `lang` - Language requested on the command line, if any
///
/// # Returns
/// A Result indicating success or failure of the command execution. Failed
/// tests do not make the command fail; only errors of the runner itself do.
pub async fn execute(config: PathBuf, report_ignored: bool, lang: Option<String>) -> Result<()> {
    let Workspace {
        config,
        settings,
        mut catalog,
        locale,
    } = Workspace::load(&config, lang.as_deref())?;

    if catalog.is_empty() {
        println!("{}", t!("run.no_tests", locale = &locale).yellow());
        return Ok(());
    }

    let _lock = RunLock::acquire(&settings.data_path)
        .with_context(|| t!("error.lock", locale = &locale).to_string())?;
    let stop_token = setup_signal_handler(&locale);

    let outcome = run_pipeline(
        &mut catalog,
        &config,
        &settings,
        report_ignored,
        stop_token,
        &locale,
    )
    .await;

    // Restoring the test files is cleanup and runs on every path.
    println!("{}", t!("run.reactivating", locale = &locale));
    let restored = activation::activate_all(&mut catalog)
        .with_context(|| t!("error.restore", locale = &locale).to_string());

    match (outcome, restored) {
        (Ok(results), Ok(())) => {
            print_summary(&results, &locale);
            println!("\n{}", t!("run.finished", locale = &locale).green().bold());
            Ok(())
        }
        (Ok(_), Err(restore_err)) => Err(restore_err),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(restore_err)) => {
            eprintln!("{} {:#}", t!("run.restore_failed", locale = &locale).red(), restore_err);
            Err(run_err)
        }
    }
}

async fn run_pipeline(
    catalog: &mut Catalog,
    config: &RunnerConfig,
    settings: &LauncherSettings,
    report_ignored: bool,
    stop_token: CancellationToken,
    locale: &str,
) -> Result<ExecutionResults> {
    println!("{}", t!("run.deactivating", locale = locale));
    activation::deactivate(catalog, &config.ignored_files)
        .with_context(|| t!("error.deactivate", locale = locale).to_string())?;

    if report_ignored {
        print_catalog(catalog, FileState::Disabled, locale);
    }
    print_catalog(catalog, FileState::Active, locale);

    let options: ExecutionOptions = config.execution_options();
    let result_file = execution::result_file(&settings.data_path);
    let started_at = Local::now();

    println!(
        "{}",
        t!(
            "run.launching",
            locale = locale,
            path = settings.executable_path.display()
        )
        .blue()
    );
    println!(
        "{}",
        t!(
            "run.waiting",
            locale = locale,
            interval = options.poll_interval.as_secs()
        )
    );
    execution::run_game(&settings.executable_path, &result_file, &options, stop_token)
        .await
        .with_context(|| t!("error.execution", locale = locale).to_string())?;

    println!("{}", t!("run.collecting", locale = locale));
    let results = correlation::collect_results(&result_file, catalog, settings, config, started_at)
        .with_context(|| t!("error.correlation", locale = locale).to_string())?;

    let report = write_report(&results, catalog, settings.variant)
        .with_context(|| t!("error.report", locale = locale).to_string())?;
    println!(
        "{}",
        t!("run.report_written", locale = locale, path = report.display()).cyan()
    );

    Ok(results)
}

fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("run.shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
