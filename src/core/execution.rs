//! # Game Execution Module / 游戏执行模块
//!
//! Launches the game in headless scripted-test mode and waits until it has
//! written its results. The game never exits on its own after the tests, so
//! completion is detected by polling the completion file and the process is
//! killed afterwards.
//!
//! 以无头脚本测试模式启动游戏并等待其写出结果。游戏在测试结束后不会自行退出，
//! 因此通过轮询完成文件来检测完成，之后再终止进程。
//!
//! ```text
//! Idle -> Launched -> Polling -> Completed
//!                             -> TimedOut   (process killed)
//!                             -> Cancelled  (process killed)
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::core::correlation::contains_result_line;
use crate::core::error::{Result, RunnerError};

/// Name of the file the game writes its test results to, inside the data path.
/// 游戏在数据路径中写入测试结果的文件名。
pub const RESULT_FILE_NAME: &str = "tests.txt";

/// Arguments that start the game headless and run the scripted tests.
/// 以无头模式启动游戏并运行脚本测试的参数。
pub const GAME_ARGS: [&str; 3] = ["-nographics", "-handsoff", "-scripted_tests"];

/// Timing of the wait for the game.
/// 等待游戏的时间设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    pub poll_interval: Duration,
    /// `None` waits as long as the game keeps running.
    pub timeout: Option<Duration>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            timeout: None,
        }
    }
}

/// How the poll loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    Completed,
    TimedOut(Duration),
    Cancelled,
    Exited(std::process::ExitStatus),
}

/// Returns `<data_path>/tests.txt`.
pub fn result_file(data_path: &Path) -> PathBuf {
    data_path.join(RESULT_FILE_NAME)
}

/// Runs the game until it reports its test results.
///
/// On success the completion file exists and holds at least one result line.
/// The game process is always terminated before this returns, also when the
/// wait times out or is cancelled.
///
/// 运行游戏直到其报告测试结果。
/// 成功时完成文件存在且至少包含一行结果。无论等待超时还是被取消，
/// 游戏进程都会在返回前被终止。
pub async fn run_game(
    executable: &Path,
    result_file: &Path,
    options: &ExecutionOptions,
    cancel: CancellationToken,
) -> Result<()> {
    remove_stale_results(result_file).await?;

    let mut child = Command::new(executable)
        .args(GAME_ARGS)
        .current_dir(working_directory(executable))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| RunnerError::Launch {
            path: executable.to_path_buf(),
            source,
        })?;
    tracing::info!(executable = %executable.display(), pid = ?child.id(), "game launched");

    let wait = wait_for_results(&mut child, result_file, options.poll_interval, &cancel);
    let outcome = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, wait)
            .await
            .unwrap_or(Ok(WaitOutcome::TimedOut(limit)))?,
        None => wait.await?,
    };

    match outcome {
        WaitOutcome::Completed => {
            terminate(&mut child).await?;
            tracing::info!("game reported test results");
            Ok(())
        }
        WaitOutcome::TimedOut(limit) => {
            terminate(&mut child).await?;
            Err(RunnerError::TimedOut(limit))
        }
        WaitOutcome::Cancelled => {
            terminate(&mut child).await?;
            Err(RunnerError::Cancelled)
        }
        WaitOutcome::Exited(status) => Err(RunnerError::ExitedEarly { status }),
    }
}

fn working_directory(executable: &Path) -> &Path {
    executable
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

async fn remove_stale_results(result_file: &Path) -> Result<()> {
    match tokio::fs::remove_file(result_file).await {
        Ok(()) => {
            tracing::debug!(file = %result_file.display(), "deleted old test results");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RunnerError::StaleResults {
            path: result_file.to_path_buf(),
            source,
        }),
    }
}

async fn wait_for_results(
    child: &mut Child,
    result_file: &Path,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<WaitOutcome> {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(WaitOutcome::Cancelled),
            _ = tokio::time::sleep(poll_interval) => {}
        }

        if results_written(result_file).await? {
            return Ok(WaitOutcome::Completed);
        }

        let exited = child.try_wait().map_err(|source| RunnerError::Poll {
            path: result_file.to_path_buf(),
            source,
        })?;
        if let Some(status) = exited {
            // The file may have been completed between the check and the exit.
            if results_written(result_file).await? {
                return Ok(WaitOutcome::Completed);
            }
            return Ok(WaitOutcome::Exited(status));
        }
        tracing::debug!(file = %result_file.display(), "waiting for test results");
    }
}

async fn results_written(result_file: &Path) -> Result<bool> {
    match tokio::fs::read(result_file).await {
        Ok(bytes) => Ok(contains_result_line(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(RunnerError::Poll {
            path: result_file.to_path_buf(),
            source,
        }),
    }
}

/// Kills the game unless it already exited.
async fn terminate(child: &mut Child) -> Result<()> {
    if child.try_wait().map_err(RunnerError::Terminate)?.is_some() {
        return Ok(());
    }
    child.kill().await.map_err(RunnerError::Terminate)
}
