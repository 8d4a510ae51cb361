//! # Core Module / 核心模块
//!
//! This module contains the test catalog and execution correlation engine:
//! parsing, discovery, activation, game execution and result correlation.
//!
//! 此模块包含测试目录与执行关联引擎：
//! 解析、发现、激活、游戏执行和结果关联。

pub mod activation;
pub mod config;
pub mod correlation;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod game;
pub mod models;
pub mod parser;

// Re-exports
pub use config::RunnerConfig;
pub use error::{ErrorKind, RunnerError};
pub use models::{Catalog, ExecutionResults, TestFile};
