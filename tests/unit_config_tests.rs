//! # Configuration Unit Tests / 配置单元测试
//!
//! Tests for the runner config file and the game's launcher settings.
//!
//! 测试运行器配置文件和游戏的启动器设置。

mod common;

use common::{GameFixture, write_file};
use scripted_test_runner::core::config::RunnerConfig;
use scripted_test_runner::core::error::ErrorKind;
use scripted_test_runner::core::game::{GameVariant, LauncherSettings, resolve_data_path};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[cfg(test)]
mod runner_config_tests {
    use super::*;

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test-config.json");
        write_file(&path, r#"{ "game-directory": "/games/victoria3" }"#);

        let config = RunnerConfig::load(&path).unwrap();

        assert_eq!(config, RunnerConfig::new("/games/victoria3"));
        assert_eq!(config.output_directory, PathBuf::from("output"));
        assert_eq!(config.poll_interval_secs, 30);
        assert!(!config.move_save_games);
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test-config.json");
        write_file(
            &path,
            r#"{
                "game-directory": "/games/ck3",
                "mod-directories": ["/mods/a", "/mods/b"],
                "ignored-files": ["slow_tests.txt"],
                "output-directory": "results",
                "move-save-games": true,
                "poll-interval-secs": 5,
                "timeout-secs": 600,
                "language": "zh-CN"
            }"#,
        );

        let config = RunnerConfig::load(&path).unwrap();

        assert_eq!(
            config.mod_directories,
            vec![PathBuf::from("/mods/a"), PathBuf::from("/mods/b")]
        );
        assert_eq!(config.ignored_files, vec!["slow_tests.txt"]);
        assert_eq!(config.output_directory, PathBuf::from("results"));
        assert!(config.move_save_games);
        assert_eq!(config.language.as_deref(), Some("zh-CN"));

        let options = config.execution_options();
        assert_eq!(options.poll_interval, Duration::from_secs(5));
        assert_eq!(options.timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let mut config = RunnerConfig::new("/games/victoria3");
        config.poll_interval_secs = 0;

        assert_eq!(config.execution_options().poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_missing_config_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = RunnerConfig::load(&temp_dir.path().join("nope.json")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_malformed_config_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test-config.json");
        write_file(&path, r#"{ "mod-directories": [] }"#);

        let err = RunnerConfig::load(&path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("test-config.json"));
    }
}

#[cfg(test)]
mod launcher_settings_tests {
    use super::*;

    #[test]
    fn test_load_victoria3_settings() {
        let game = GameFixture::victoria3();

        let settings = LauncherSettings::load(&game.game_dir).unwrap();

        assert_eq!(settings.variant, GameVariant::Victoria3);
        assert_eq!(settings.data_path, game.data_dir);
        assert_eq!(
            settings.executable_path,
            game.game_dir.join("launcher").join("../binaries/game.sh")
        );
        assert_eq!(
            settings.content_path.join("tools").canonicalize().unwrap(),
            game.content_dir.join("tools").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_load_ck3_settings() {
        let game = GameFixture::new("ck3");

        let settings = LauncherSettings::load(&game.game_dir).unwrap();

        assert_eq!(settings.variant, GameVariant::CrusaderKings3);
        assert_eq!(settings.variant.save_suffix(), ".ck3");
        assert!(settings.variant.skipped_files().is_empty());
    }

    #[test]
    fn test_unknown_game_is_rejected() {
        let game = GameFixture::new("stellaris");

        let err = LauncherSettings::load(&game.game_dir).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("stellaris"));
    }

    #[test]
    fn test_missing_launcher_settings() {
        let temp_dir = TempDir::new().unwrap();

        let err = LauncherSettings::load(temp_dir.path()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("launcher-settings.json"));
    }

    #[test]
    fn test_game_variant_properties() {
        assert_eq!(GameVariant::from_id("victoria3").unwrap(), GameVariant::Victoria3);
        assert_eq!(GameVariant::Victoria3.save_suffix(), ".v3");
        assert_eq!(GameVariant::Victoria3.skipped_files(), vec!["test.txt"]);
        assert_eq!(GameVariant::CrusaderKings3.to_string(), "Crusader Kings 3");
        assert_eq!(GameVariant::CrusaderKings3.id(), "ck3");
    }
}

#[cfg(test)]
mod data_path_tests {
    use super::*;

    #[test]
    fn test_absolute_path_is_kept() {
        assert_eq!(
            resolve_data_path("/data/Paradox Interactive/Victoria 3").unwrap(),
            PathBuf::from("/data/Paradox Interactive/Victoria 3")
        );
    }

    #[test]
    fn test_placeholders_are_expanded_to_home() {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        let home = PathBuf::from(home);

        assert_eq!(
            resolve_data_path("$LINUX_DATA_HOME/Paradox Interactive/Victoria 3").unwrap(),
            home.join(".local/share/Paradox Interactive/Victoria 3")
        );
        assert_eq!(
            resolve_data_path("%USER_DOCUMENTS%/Paradox Interactive/Victoria 3").unwrap(),
            home.join("Documents/Paradox Interactive/Victoria 3")
        );
    }

    #[test]
    fn test_undefined_variable_is_configuration_error() {
        let err = resolve_data_path("$SCRIPTED_RUNNER_SURELY_UNSET_VAR/data").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
