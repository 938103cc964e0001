//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the sweep runner:
//! axis values, resolved trial parameters, measurements and the result matrix
//! together with its text serialization.
//!
//! 此模块定义了整个扫描运行器中使用的核心数据结构：
//! 轴值、解析后的试验参数、测量值以及结果矩阵及其文本序列化。

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One point along the swept dimension.
/// 扫描维度上的一个点。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    /// A grid dimension, forwarded verbatim as both width and height.
    /// 网格尺寸，作为宽度和高度原样转发。
    GridSize(String),
    /// A worker-thread count.
    /// 工作线程数。
    Threads(u32),
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::GridSize(size) => write!(f, "{size}"),
            AxisValue::Threads(count) => write!(f, "{count}"),
        }
    }
}

/// Which parameter an axis drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisKind {
    GridSize,
    Threads,
}

impl AxisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisKind::GridSize => "grid-size",
            AxisKind::Threads => "threads",
        }
    }
}

/// The ordered, non-empty set of distinct values a sweep visits.
/// Row `i` of the result matrix belongs to `values()[i]`.
/// 扫描访问的有序、非空且互不相同的值集合。
/// 结果矩阵的第 `i` 行对应 `values()[i]`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepAxis {
    kind: AxisKind,
    values: Vec<AxisValue>,
}

impl SweepAxis {
    /// Builds an axis, returning `None` if `values` is empty, contains duplicates,
    /// or mixes value kinds.
    pub fn new(values: Vec<AxisValue>) -> Option<Self> {
        let kind = match values.first()? {
            AxisValue::GridSize(_) => AxisKind::GridSize,
            AxisValue::Threads(_) => AxisKind::Threads,
        };
        let same_kind = values.iter().all(|v| match v {
            AxisValue::GridSize(_) => kind == AxisKind::GridSize,
            AxisValue::Threads(_) => kind == AxisKind::Threads,
        });
        let distinct = values
            .iter()
            .enumerate()
            .all(|(i, v)| !values[..i].contains(v));
        (same_kind && distinct).then_some(Self { kind, values })
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn values(&self) -> &[AxisValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; an axis is never constructed empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A fully resolved set of simulator arguments for a single trial.
/// 单次试验的完全解析的模拟器参数集合。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialParameters {
    pub width: String,
    pub height: String,
    pub probability: String,
    pub steps: String,
    /// Always `repetition + 1`.
    pub seed: u32,
    /// Present only when the instantiation passes a thread count.
    pub threads: Option<u32>,
    pub debug: String,
}

impl TrialParameters {
    /// Builds the positional argument list in the order the simulator expects:
    /// `width height probability steps seed [threads] debug`.
    ///
    /// 按模拟器期望的顺序构建位置参数列表：
    /// `width height probability steps seed [threads] debug`。
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            self.width.clone(),
            self.height.clone(),
            self.probability.clone(),
            self.steps.clone(),
            self.seed.to_string(),
        ];
        if let Some(threads) = self.threads {
            args.push(threads.to_string());
        }
        args.push(self.debug.clone());
        args
    }
}

/// One cell of the sweep, resolved and ready to run.
/// 扫描中的一个单元，已解析并准备运行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub axis_index: usize,
    pub axis_value: AxisValue,
    pub repetition: usize,
    pub parameters: TrialParameters,
}

/// The elapsed time, in seconds, reported by one trial.
/// Always finite and non-negative.
/// 一次试验报告的耗时（秒）。始终为有限的非负数。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Measurement(f64);

impl Measurement {
    /// Returns `None` for NaN, infinite or negative values.
    pub fn new(seconds: f64) -> Option<Self> {
        (seconds.is_finite() && seconds >= 0.0).then_some(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_measurement(self.0))
    }
}

/// Returned when a matrix with empty cells is asked to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("result matrix is incomplete: cell (row {row}, repetition {column}) has no measurement")]
pub struct IncompleteMatrix {
    pub row: usize,
    pub column: usize,
}

/// Measurements indexed by (axis position, repetition).
///
/// The matrix is allocated empty for a given axis and repetition count and is
/// filled cell by cell. It only serializes once every cell holds a measurement.
///
/// 按（轴位置，重复次数）索引的测量值。
///
/// 矩阵针对给定的轴和重复次数分配为空，并逐个单元填充。
/// 只有在每个单元都有测量值后才会序列化。
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMatrix {
    axis: SweepAxis,
    repetitions: usize,
    cells: Vec<Option<Measurement>>,
}

impl ResultMatrix {
    pub fn new(axis: SweepAxis, repetitions: usize) -> Self {
        let cells = vec![None; axis.len() * repetitions];
        Self {
            axis,
            repetitions,
            cells,
        }
    }

    pub fn axis(&self) -> &SweepAxis {
        &self.axis
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// `(rows, columns)`, i.e. `(|axis|, repetitions)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.axis.len(), self.repetitions)
    }

    /// Stores a measurement. Panics if the coordinate lies outside the matrix.
    pub fn record(&mut self, row: usize, column: usize, measurement: Measurement) {
        let index = self.index(row, column);
        self.cells[index] = Some(measurement);
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Measurement> {
        if row >= self.axis.len() || column >= self.repetitions {
            return None;
        }
        self.cells[self.index(row, column)]
    }

    /// The cells of one axis value, in repetition order.
    pub fn row(&self, row: usize) -> &[Option<Measurement>] {
        let start = row * self.repetitions;
        &self.cells[start..start + self.repetitions]
    }

    pub fn rows(&self) -> impl Iterator<Item = (&AxisValue, &[Option<Measurement>])> {
        self.axis
            .values()
            .iter()
            .zip(self.cells.chunks(self.repetitions.max(1)))
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the first empty cell in row-major order.
    pub fn first_missing(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(Option::is_none)
            .map(|i| (i / self.repetitions, i % self.repetitions))
    }

    /// Returns the fully populated rows as plain seconds.
    pub fn to_seconds(&self) -> Result<Vec<Vec<f64>>, IncompleteMatrix> {
        self.ensure_complete()?;
        Ok(self
            .rows()
            .map(|(_, row)| row.iter().flatten().map(Measurement::seconds).collect())
            .collect())
    }

    /// Renders the matrix as one line per axis value, measurements separated by a
    /// single space, each line terminated by `\n`. No header, no index column.
    ///
    /// 将矩阵渲染为每个轴值一行，测量值以单个空格分隔，每行以 `\n` 结尾。
    /// 没有表头，也没有索引列。
    pub fn serialize(&self) -> Result<String, IncompleteMatrix> {
        self.ensure_complete()?;

        let mut text = String::new();
        for (_, row) in self.rows() {
            let line = row
                .iter()
                .flatten()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            text.push_str(&line);
            text.push('\n');
        }
        Ok(text)
    }

    fn ensure_complete(&self) -> Result<(), IncompleteMatrix> {
        match self.first_missing() {
            Some((row, column)) => Err(IncompleteMatrix { row, column }),
            None => Ok(()),
        }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.axis.len() && column < self.repetitions,
            "cell ({row}, {column}) outside a {}x{} matrix",
            self.axis.len(),
            self.repetitions
        );
        row * self.repetitions + column
    }
}

/// Formats a float in its shortest round-trip form with Python `repr` layout.
///
/// Fixed notation always keeps a fractional part (`1.0`, `0.5`) while the decimal
/// exponent lies in `[-4, 16)`. Outside that range scientific notation is used
/// with a signed exponent of at least two digits (`1e-05`, `1.5e+16`).
/// When two shortest candidates are equally close, the even one wins, as in
/// `repr` (`133879699073547.125` prints as `133879699073547.12`).
/// Downstream tooling splits the result file on whitespace, so this layout
/// must stay stable.
///
/// 以最短往返形式和 Python `repr` 布局格式化浮点数。
pub fn format_measurement(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "2.8571428571428573e1",
    // but breaks an exact tie between two such candidates upwards. Re-rounding the
    // exact value to the same number of digits ties to even instead.
    let shortest = format!("{value:e}");
    let significant = shortest
        .split('e')
        .next()
        .map_or(0, |m| m.chars().filter(char::is_ascii_digit).count());
    let scientific = match format!("{:.*e}", significant.saturating_sub(1), value) {
        even if even.parse::<f64>() == Ok(value) => even,
        _ => shortest,
    };
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digits = digits.trim_end_matches('0');

    let body = if (-4..16).contains(&exponent) {
        if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if digits.len() > int_len {
                format!("{}.{}", &digits[..int_len], &digits[int_len..])
            } else {
                format!("{digits:0<int_len$}.0")
            }
        } else {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("0.{zeros}{digits}")
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{:02}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{:02}", exponent.abs())
        }
    };
    format!("{sign}{body}")
}
