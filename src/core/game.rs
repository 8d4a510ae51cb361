//! # Game Settings Module / 游戏设置模块
//!
//! Reads the launcher settings shipped with a game installation and resolves
//! the paths the runner needs: game data directory, executable and content
//! directory.
//!
//! 读取游戏安装附带的启动器设置，并解析运行器所需的路径：
//! 游戏数据目录、可执行文件和内容目录。

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, RunnerError};

const LAUNCHER_DIR: &str = "launcher";
const LAUNCHER_SETTINGS_FILE: &str = "launcher-settings.json";

/// Placeholders the launcher uses in `gameDataPath`, with their replacement.
const DATA_PATH_PLACEHOLDERS: [(&str, &str); 2] = [
    ("%USER_DOCUMENTS%", "~/Documents"),
    ("$LINUX_DATA_HOME", "~/.local/share"),
];

/// The games whose scripted test framework is supported.
/// 支持其脚本测试框架的游戏。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVariant {
    Victoria3,
    CrusaderKings3,
}

impl GameVariant {
    /// Parses the launcher's `gameId`.
    pub fn from_id(id: &str) -> Result<Self> {
        match id {
            "victoria3" => Ok(GameVariant::Victoria3),
            "ck3" => Ok(GameVariant::CrusaderKings3),
            other => Err(RunnerError::UnsupportedGame(other.to_string())),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            GameVariant::Victoria3 => "victoria3",
            GameVariant::CrusaderKings3 => "ck3",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GameVariant::Victoria3 => "Victoria 3",
            GameVariant::CrusaderKings3 => "Crusader Kings 3",
        }
    }

    /// Extension of this game's save files.
    pub fn save_suffix(self) -> &'static str {
        match self {
            GameVariant::Victoria3 => ".v3",
            GameVariant::CrusaderKings3 => ".ck3",
        }
    }

    /// Files below `tools/scripted_tests` that look like tests but are not.
    /// `tools/scripted_tests` 下看似测试但实际不是的文件。
    pub fn skipped_files(self) -> Vec<String> {
        match self {
            GameVariant::Victoria3 => vec!["test.txt".to_string()],
            GameVariant::CrusaderKings3 => Vec::new(),
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLauncherSettings {
    game_id: String,
    game_data_path: String,
    exe_path: PathBuf,
    dlc_path: PathBuf,
}

/// Resolved launcher settings of a game installation.
/// 游戏安装解析后的启动器设置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    pub variant: GameVariant,
    /// User data directory: save games and the completion file live here.
    /// 用户数据目录：存档和完成文件位于此处。
    pub data_path: PathBuf,
    pub executable_path: PathBuf,
    /// Game content root, containing `tools/scripted_tests`.
    /// 游戏内容根目录，包含 `tools/scripted_tests`。
    pub content_path: PathBuf,
}

impl LauncherSettings {
    /// Loads `<game_directory>/launcher/launcher-settings.json`.
    ///
    /// `exePath` and `dlcPath` are taken relative to the launcher directory;
    /// placeholders in `gameDataPath` are replaced and `~` is expanded.
    pub fn load(game_directory: &Path) -> Result<Self> {
        let launcher_dir = game_directory.join(LAUNCHER_DIR);
        let settings_path = launcher_dir.join(LAUNCHER_SETTINGS_FILE);

        let content = fs::read_to_string(&settings_path).map_err(|source| {
            RunnerError::ConfigRead {
                path: settings_path.clone(),
                source,
            }
        })?;
        let raw: RawLauncherSettings =
            serde_json::from_str(&content).map_err(|source| RunnerError::ConfigParse {
                path: settings_path.clone(),
                source,
            })?;

        let variant = GameVariant::from_id(&raw.game_id)?;

        Ok(Self {
            variant,
            data_path: resolve_data_path(&raw.game_data_path)?,
            executable_path: launcher_dir.join(&raw.exe_path),
            content_path: launcher_dir.join(&raw.dlc_path),
        })
    }
}

/// Replaces the launcher's user directory placeholders and expands `~`.
pub fn resolve_data_path(raw: &str) -> Result<PathBuf> {
    let replaced = DATA_PATH_PLACEHOLDERS
        .iter()
        .fold(raw.to_string(), |path, (placeholder, replacement)| {
            path.replace(placeholder, replacement)
        });
    let expanded = shellexpand::full(&replaced)
        .map_err(|e| RunnerError::DataPath(format!("{}: {}", raw, e)))?;
    Ok(PathBuf::from(expanded.as_ref()).components().collect())
}
