//! # Reporting Module / 报告模块
//!
//! This module handles everything the operator sees or keeps besides the raw
//! result file: coloured, localized console lines and optional JSON and HTML
//! renderings of the collected matrix.
//!
//! 此模块处理操作者除原始结果文件之外看到或保留的所有内容：
//! 彩色的本地化控制台输出，以及所收集矩阵的可选 JSON 和 HTML 呈现。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_axis_progress, print_sweep_failure};
pub use html::generate_html_report;
pub use json::{SweepReport, write_json_report};
