//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides file system helpers shared by the commands, such as
//! the run lock that keeps two runs from sharing one game data directory.
//!
//! 此模块提供命令共享的文件系统辅助功能，
//! 例如防止两次运行共用同一个游戏数据目录的运行锁。

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{Result, RunnerError};

/// Name of the lock file created in the game data directory.
pub const LOCK_FILE_NAME: &str = "scripted-test-runner.lock";

/// Exclusive claim on a game data directory for the duration of a run.
/// The lock file is deleted when this guard is dropped.
///
/// 在一次运行期间对游戏数据目录的独占占用。
/// 当此守卫被丢弃时，锁文件会被删除。
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Creates the lock file, failing if another run holds it.
    pub fn acquire(data_path: &Path) -> Result<Self> {
        let path = data_path.join(LOCK_FILE_NAME);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(RunnerError::RunInProgress(path));
            }
            Err(source) => return Err(RunnerError::RunLock { path, source }),
        };
        writeln!(file, "{}", std::process::id())
            .map_err(|source| RunnerError::RunLock { path: path.clone(), source })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(lock = %self.path.display(), error = %e, "could not remove run lock");
        }
    }
}

/// Resolves a possibly relative path against `base`.
///
/// # Arguments
/// * `base` - Directory relative paths are taken from
/// * `path` - Path to resolve
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
