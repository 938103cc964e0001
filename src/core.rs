//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Sweep Runner,
//! including configuration, data models, sweep planning, trial execution
//! and the orchestration loop that ties them together.
//!
//! 此模块包含 Sweep Runner 的核心功能，
//! 包括配置、数据模型、扫描计划、试验执行以及将它们联系在一起的编排循环。

pub mod config;
pub mod execution;
pub mod models;
pub mod orchestrator;
pub mod planner;

// Re-exports
pub use config::SweepConfig;
pub use execution::{ProcessTrialRunner, TrialError, TrialRunner};
pub use models::{AxisValue, Measurement, ResultMatrix, SweepAxis, TrialParameters};
pub use orchestrator::{SweepError, SweepEvent, run_sweep};
pub use planner::SweepPlanner;
