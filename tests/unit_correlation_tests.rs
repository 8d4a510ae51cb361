//! # Correlation Unit Tests / 结果关联单元测试
//!
//! Tests for parsing the game's result lines, matching them to the catalog
//! and archiving the artifacts of a run.
//!
//! 测试解析游戏结果行、将其与目录匹配以及归档运行产物。

mod common;

use chrono::{Local, TimeZone};
use common::{GameFixture, file_names, test_block, write_file};
use scripted_test_runner::core::config::RunnerConfig;
use scripted_test_runner::core::correlation::{
    ResultLine, archive_failure_saves, collect_results, contains_result_line, correlate,
    parse_result_line, run_output_directory,
};
use scripted_test_runner::core::discovery::discover;
use scripted_test_runner::core::error::ErrorKind;
use scripted_test_runner::core::execution::result_file;
use scripted_test_runner::core::game::LauncherSettings;
use scripted_test_runner::core::models::{Catalog, FileLayout};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RESULTS: &str = "[ OK ] testA ( 1836.1.1 )\n[ FAIL ] testB ( 1836.2.1 )\n";

fn two_test_game() -> (GameFixture, Catalog) {
    let game = GameFixture::victoria3();
    game.add_test_file(
        "economy.txt",
        &format!(
            "# @file: Economy\n# @name: Test A\n{}{}",
            test_block("testA"),
            test_block("testB")
        ),
    );
    let catalog = discover(&game.content_dir, &[], &FileLayout::default(), &[]).unwrap();
    (game, catalog)
}

fn config_for(game: &GameFixture) -> RunnerConfig {
    let mut config = RunnerConfig::new(&game.game_dir);
    config.output_directory = game.root.path().join("output");
    config
}

#[cfg(test)]
mod result_line_tests {
    use super::*;

    #[test]
    fn test_parse_ok_and_fail_lines() {
        assert_eq!(
            parse_result_line("[ OK ] testA ( 1836.1.1 )"),
            Some(ResultLine {
                success: true,
                name: "testA",
                date: "1836.1.1"
            })
        );
        assert_eq!(
            parse_result_line("[FAIL] testB (1836.2.1)"),
            Some(ResultLine {
                success: false,
                name: "testB",
                date: "1836.2.1"
            })
        );
    }

    #[test]
    fn test_other_lines_are_not_results() {
        assert_eq!(parse_result_line("Running scripted tests"), None);
        assert_eq!(parse_result_line("[ SKIP ] testC ( 1836.1.1 )"), None);
        assert_eq!(parse_result_line(""), None);
    }

    #[test]
    fn test_contains_result_line() {
        assert!(contains_result_line(&format!("header\n{}", RESULTS)));
        assert!(!contains_result_line("header only\n"));
        assert!(!contains_result_line(""));
    }
}

#[cfg(test)]
mod correlate_tests {
    use super::*;

    #[test]
    fn test_correlate_matches_results_to_tests() {
        let (_game, catalog) = two_test_game();

        let results = correlate(RESULTS, &catalog);

        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert_eq!(results[0].date, "1836.1.1");
        assert_eq!(results[0].test.name, "testA");
        assert_eq!(results[0].test.display_name.as_deref(), Some("Test A"));
        assert_eq!(results[0].file_name, "economy.txt");
        assert_eq!(results[0].file_label(), "Economy (economy.txt)");
        assert!(!results[1].success);
        assert_eq!(results[1].date, "1836.2.1");
        assert_eq!(results[1].test.name, "testB");
    }

    #[test]
    fn test_correlate_drops_unknown_tests() {
        let (_game, catalog) = two_test_game();
        let content = format!("{}[ OK ] unknown_test ( 1837.1.1 )\n", RESULTS);

        let results = correlate(&content, &catalog);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.test.name != "unknown_test"));
    }

    #[test]
    fn test_correlate_skips_noise_lines() {
        let (_game, catalog) = two_test_game();
        let content = format!("Scripted tests started\n\n{}done\n", RESULTS);

        assert_eq!(correlate(&content, &catalog).len(), 2);
    }
}

#[cfg(test)]
mod archive_tests {
    use super::*;

    fn write_saves(dir: &Path) {
        write_file(&dir.join("TEST_FAIL_testB.v3"), "save");
        write_file(&dir.join("TEST_FAIL_testC.ck3"), "save");
        write_file(&dir.join("autosave.v3"), "save");
    }

    #[test]
    fn test_archive_copies_matching_saves() {
        let temp_dir = TempDir::new().unwrap();
        let saves = temp_dir.path().join("saves");
        let output = temp_dir.path().join("output");
        write_saves(&saves);
        fs::create_dir_all(&output).unwrap();

        let archived = archive_failure_saves(&saves, ".v3", &output, false).unwrap();

        assert_eq!(archived, 1);
        assert_eq!(file_names(&output), vec!["TEST_FAIL_testB.v3"]);
        assert!(saves.join("TEST_FAIL_testB.v3").exists());
    }

    #[test]
    fn test_archive_moves_saves_when_requested() {
        let temp_dir = TempDir::new().unwrap();
        let saves = temp_dir.path().join("saves");
        let output = temp_dir.path().join("output");
        write_saves(&saves);
        fs::create_dir_all(&output).unwrap();

        archive_failure_saves(&saves, ".v3", &output, true).unwrap();

        assert!(output.join("TEST_FAIL_testB.v3").exists());
        assert!(!saves.join("TEST_FAIL_testB.v3").exists());
        assert!(saves.join("autosave.v3").exists());
    }

    #[test]
    fn test_run_output_directory_format() {
        let started_at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

        let dir = run_output_directory(Path::new("output"), &started_at);

        assert_eq!(dir, Path::new("output").join("2024-03-05_14_07_09"));
    }
}

#[cfg(test)]
mod collect_results_tests {
    use super::*;

    #[test]
    fn test_collect_results_archives_and_correlates() {
        let (game, catalog) = two_test_game();
        let settings = LauncherSettings::load(&game.game_dir).unwrap();
        let results_path = result_file(&game.data_dir);
        write_file(&results_path, RESULTS);
        write_file(&game.save_dir().join("TEST_FAIL_testB.v3"), "save");
        let started_at = Local::now();

        let results =
            collect_results(&results_path, &catalog, &settings, &config_for(&game), started_at)
                .unwrap();

        assert_eq!(
            results.output_directory,
            run_output_directory(&game.root.path().join("output"), &started_at)
        );
        assert_eq!(
            file_names(&results.output_directory),
            vec!["TEST_FAIL_testB.v3", "tests.txt"]
        );
        assert_eq!(results.passed(), 1);
        assert_eq!(results.failed(), 1);
        assert!(results.finished_at >= results.started_at);
    }

    #[test]
    fn test_collect_results_without_save_directory_fails() {
        let (game, catalog) = two_test_game();
        let settings = LauncherSettings::load(&game.game_dir).unwrap();
        let results_path = result_file(&game.data_dir);
        write_file(&results_path, RESULTS);
        fs::remove_dir_all(game.save_dir()).unwrap();

        let err = collect_results(
            &results_path,
            &catalog,
            &settings,
            &config_for(&game),
            Local::now(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Correlation);
        assert!(err.to_string().contains("save games"));
    }

    #[test]
    fn test_collect_results_without_result_file_fails() {
        let (game, catalog) = two_test_game();
        let settings = LauncherSettings::load(&game.game_dir).unwrap();

        let err = collect_results(
            &result_file(&game.data_dir),
            &catalog,
            &settings,
            &config_for(&game),
            Local::now(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Correlation);
        assert!(err.to_string().contains("tests.txt"));
    }
}
