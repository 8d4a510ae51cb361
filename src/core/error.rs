//! # Error Module / 错误模块
//!
//! Typed errors for every fallible step of a run. Each variant belongs to one
//! [`ErrorKind`], which tells the caller which phase of the pipeline failed.
//!
//! 运行中每个可失败步骤的类型化错误。每个变体都属于一个 [`ErrorKind`]，
//! 用于告诉调用方管道的哪个阶段失败了。

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::models::FileState;

/// The pipeline phase an error originates from.
/// 错误所属的管道阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed runner config or launcher settings.
    /// 运行器配置或启动器设置缺失或格式错误。
    Configuration,
    /// A test directory or test file could not be read.
    /// 无法读取测试目录或测试文件。
    Discovery,
    /// A test file could not be renamed.
    /// 无法重命名测试文件。
    Activation,
    /// The game could not be started, stopped or waited for.
    /// 无法启动、停止或等待游戏。
    Execution,
    /// The game's output could not be collected.
    /// 无法收集游戏的输出。
    Correlation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Discovery => "discovery",
            ErrorKind::Activation => "activation",
            ErrorKind::Execution => "execution",
            ErrorKind::Correlation => "correlation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported game id: {0}")]
    UnsupportedGame(String),

    #[error("could not resolve game data path {0}")]
    DataPath(String),

    #[error("could not scan test directory {path}: {source}")]
    ScanDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("could not read test file {path}: {source}")]
    ReadTestFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not rename test file {path} to {target:?} state: {source}")]
    Rename {
        path: PathBuf,
        target: FileState,
        #[source]
        source: std::io::Error,
    },

    #[error("could not rename test file {path}: {existing} already exists")]
    RenameConflict { path: PathBuf, existing: PathBuf },

    #[error("another run is already using {0}")]
    RunInProgress(PathBuf),

    #[error("could not create run lock {path}: {source}")]
    RunLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("old test results could not be deleted ({path}): {source}")]
    StaleResults {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error starting game {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not check test results {path}: {source}")]
    Poll {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("game exited ({status}) before reporting any test result")]
    ExitedEarly { status: std::process::ExitStatus },

    #[error("game did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("test run was cancelled")]
    Cancelled,

    #[error("error stopping game: {0}")]
    Terminate(#[source] std::io::Error),

    #[error("error creating test result output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save game directory does not exist: {0}")]
    MissingSaveDirectory(PathBuf),

    #[error("test result file does not exist: {0}")]
    MissingResultFile(PathBuf),

    #[error("could not copy {path} to the output directory: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read test results {path}: {source}")]
    ReadResults {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    /// Classifies the error by pipeline phase.
    /// 按管道阶段对错误进行分类。
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunnerError::ConfigRead { .. }
            | RunnerError::ConfigParse { .. }
            | RunnerError::UnsupportedGame(_)
            | RunnerError::DataPath(_) => ErrorKind::Configuration,
            RunnerError::ScanDirectory { .. } | RunnerError::ReadTestFile { .. } => {
                ErrorKind::Discovery
            }
            RunnerError::Rename { .. } | RunnerError::RenameConflict { .. } => {
                ErrorKind::Activation
            }
            RunnerError::RunInProgress(_)
            | RunnerError::RunLock { .. }
            | RunnerError::StaleResults { .. }
            | RunnerError::Launch { .. }
            | RunnerError::Poll { .. }
            | RunnerError::ExitedEarly { .. }
            | RunnerError::TimedOut(_)
            | RunnerError::Cancelled
            | RunnerError::Terminate(_) => ErrorKind::Execution,
            RunnerError::OutputDirectory { .. }
            | RunnerError::MissingSaveDirectory(_)
            | RunnerError::MissingResultFile(_)
            | RunnerError::Archive { .. }
            | RunnerError::ReadResults { .. } => ErrorKind::Correlation,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;
