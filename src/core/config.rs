use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{Result, RunnerError};
use crate::core::execution::ExecutionOptions;

/// Default name of the runner configuration file.
/// 运行器配置文件的默认名称。
pub const DEFAULT_CONFIG_FILE: &str = "test-config.json";

/// Represents the runner configuration, loaded from a JSON file.
/// It names the game installation, the mods whose tests take part in the run,
/// and the test files to leave out.
///
/// 代表从 JSON 文件加载的运行器配置。
/// 它指定游戏安装目录、参与运行的模组以及需要排除的测试文件。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunnerConfig {
    /// Root of the game installation (the directory holding `launcher/`).
    /// 游戏安装根目录（包含 `launcher/` 的目录）。
    pub game_directory: PathBuf,

    /// Mod roots, applied in order. Later mods override earlier ones.
    /// 模组根目录，按顺序应用。后面的模组会覆盖前面的。
    #[serde(default)]
    pub mod_directories: Vec<PathBuf>,

    /// Test file names (e.g. `economy_tests.txt`) to disable for the run.
    /// 本次运行中要禁用的测试文件名（例如 `economy_tests.txt`）。
    #[serde(default)]
    pub ignored_files: Vec<String>,

    /// Root under which each run creates its timestamped output directory.
    /// 每次运行在其下创建带时间戳输出目录的根目录。
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// If `true`, failure save games are moved instead of copied.
    /// 如果为 `true`，失败的存档会被移动而不是复制。
    #[serde(default)]
    pub move_save_games: bool,

    /// Seconds between two checks of the completion file.
    /// 两次检查完成文件之间的秒数。
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Upper bound for the game run in seconds. Unbounded if not set.
    /// 游戏运行的时间上限（秒）。未设置时不限制。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl RunnerConfig {
    pub fn new(game_directory: impl Into<PathBuf>) -> Self {
        Self {
            game_directory: game_directory.into(),
            mod_directories: Vec::new(),
            ignored_files: Vec::new(),
            output_directory: default_output_directory(),
            move_save_games: false,
            poll_interval_secs: default_poll_interval_secs(),
            timeout_secs: None,
            language: None,
        }
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RunnerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions {
            poll_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_poll_interval_secs() -> u64 {
    30
}
