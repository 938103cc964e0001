//! # Sweep Runner Library / Sweep Runner 库
//!
//! This library provides the core functionality for the Sweep Runner tool,
//! a configuration-driven parameter-sweep benchmark harness. It invokes an
//! external simulator once per (axis value, repetition) cell, parses the single
//! timing value the simulator prints and collects the values into a result matrix.
//!
//! 此库为 Sweep Runner 工具提供核心功能，
//! 这是一个配置驱动的参数扫描基准测试工具。它为每个（轴值，重复）单元调用一次
//! 外部模拟器，解析模拟器打印的单个计时值，并将其收集到结果矩阵中。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, data models, sweep planning and trial execution
//! - `infra` - Infrastructure services like process spawning and file writes
//! - `reporting` - Console output and optional JSON / HTML renderings of the matrix
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置、数据模型、扫描计划和试验执行
//! - `infra` - 基础设施服务，如进程派生和文件写入
//! - `reporting` - 控制台输出以及矩阵的可选 JSON / HTML 呈现
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;
pub use core::orchestrator;
pub use core::planner;

/// Maps a requested locale onto one of the bundled translations.
pub fn resolve_locale(requested: &str) -> &'static str {
    let available_locales = rust_i18n::available_locales!();

    if let Some(found) = available_locales.iter().copied().find(|l| *l == requested) {
        return found;
    }
    requested
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .copied()
                .find(|l| l.split('-').next() == Some(lang_code))
        })
        .unwrap_or("en")
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
