//! # JSON Reporting Module / JSON 报告模块
//!
//! A machine-readable companion to the text matrix: the same raw values plus
//! the axis labels and the settings that produced them.
//!
//! 文本矩阵的机器可读配套文件：相同的原始值，加上轴标签及产生它们的设置。

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

use crate::core::{
    config::FixedConfig,
    models::{AxisKind, AxisValue, ResultMatrix},
};
use crate::infra::fs::write_atomically;

/// The serialized form of a finished sweep.
/// 已完成扫描的序列化形式。
#[derive(Debug, Serialize)]
pub struct SweepReport<'a> {
    pub generated_at: DateTime<Local>,
    pub executable: &'a str,
    pub axis: AxisKind,
    pub axis_values: &'a [AxisValue],
    pub repetitions: usize,
    /// Seeds used for each column, `1..=repetitions`.
    pub seeds: Vec<usize>,
    pub fixed: &'a FixedConfig,
    /// Seconds, one row per axis value.
    pub results: Vec<Vec<f64>>,
}

impl<'a> SweepReport<'a> {
    pub fn new(matrix: &'a ResultMatrix, executable: &'a str, fixed: &'a FixedConfig) -> Result<Self> {
        let results = matrix.to_seconds()?;
        Ok(Self {
            generated_at: Local::now(),
            executable,
            axis: matrix.axis().kind(),
            axis_values: matrix.axis().values(),
            repetitions: matrix.repetitions(),
            seeds: (1..=matrix.repetitions()).collect(),
            fixed,
            results,
        })
    }
}

/// Writes `report` as pretty-printed JSON to `path`.
pub fn write_json_report(report: &SweepReport<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize JSON report")?;
    write_atomically(path, &json)
}
