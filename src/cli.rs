// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::DEFAULT_CONFIG_FILE;
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("cli.arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value(DEFAULT_CONFIG_FILE)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("scripted-test-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cli.cmd_run", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(
                    Arg::new("report-ignored")
                        .long("report-ignored")
                        .help(t!("cli.arg_report_ignored", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("list")
                .about(t!("cli.cmd_list", locale = locale).to_string())
                .arg(config_arg(locale)),
        )
        .subcommand(
            Command::new("restore")
                .about(t!("cli.cmd_restore", locale = locale).to_string())
                .arg(config_arg(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.cmd_init", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.arg_init_output", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("cli.arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn config_path(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested = pre_parse_language();
    let language = crate::resolve_locale(requested.as_deref());
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(
                config_path(run_matches),
                run_matches.get_flag("report-ignored"),
                requested,
            )
            .await?;
        }
        Some(("list", list_matches)) => {
            commands::list::execute(config_path(list_matches), requested)?;
        }
        Some(("restore", restore_matches)) => {
            commands::restore::execute(config_path(restore_matches), requested)?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            commands::init::run_init_wizard(
                &output,
                &language,
                init_matches.get_flag("non-interactive"),
                init_matches.get_flag("force"),
            )?;
        }
        _ => {
            // subcommand_required: clap has already printed help and exited.
        }
    }
    Ok(())
}
