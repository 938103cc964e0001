//! # Sweep Planner Module / 扫描计划模块
//!
//! This module turns a [`SweepConfig`] into a validated sweep plan: the ordered
//! axis, the repetition count and the pure mapping from a sweep coordinate to
//! concrete simulator parameters.
//!
//! 此模块将 [`SweepConfig`] 转换为经过验证的扫描计划：有序的轴、重复次数，
//! 以及从扫描坐标到具体模拟器参数的纯映射。

use crate::core::config::{AxisConfig, FixedConfig, SweepConfig};
use crate::core::models::{AxisValue, SweepAxis, Trial, TrialParameters};
use anyhow::{Result, bail};

/// A validated sweep: which values to visit, how often, and with which fixed parameters.
/// 经过验证的扫描：访问哪些值、访问多少次以及使用哪些固定参数。
#[derive(Debug, Clone)]
pub struct SweepPlanner {
    axis: SweepAxis,
    repetitions: usize,
    fixed: FixedConfig,
}

impl SweepPlanner {
    /// Creates a planner from an already-built axis.
    pub fn new(axis: SweepAxis, repetitions: usize, fixed: FixedConfig) -> Result<Self> {
        if repetitions == 0 {
            bail!("The number of repetitions must be at least 1.");
        }
        Ok(Self {
            axis,
            repetitions,
            fixed,
        })
    }

    /// Validates the configuration and builds the sweep axis from it.
    ///
    /// # Errors
    /// - `repetitions` is zero
    /// - the axis has no values or repeats a value
    /// - a thread sweep gives both explicit values and a range, neither, or an invalid range
    ///
    /// 验证配置并据此构建扫描轴。
    pub fn from_config(config: &SweepConfig) -> Result<Self> {
        let values = match &config.sweep {
            AxisConfig::GridSize { values } => {
                if values.iter().any(|v| v.trim().is_empty()) {
                    bail!("Grid-size values must not be empty strings.");
                }
                values.iter().cloned().map(AxisValue::GridSize).collect()
            }
            AxisConfig::Threads { values, min, max } => {
                thread_values(values, *min, *max)?
            }
        };

        if values.is_empty() {
            bail!("The sweep axis must contain at least one value.");
        }
        let Some(axis) = SweepAxis::new(values) else {
            bail!("The sweep axis must not contain duplicate values.");
        };

        Self::new(axis, config.repetitions, config.fixed.clone())
    }

    pub fn axis(&self) -> &SweepAxis {
        &self.axis
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Total number of trials in the sweep.
    pub fn trial_count(&self) -> usize {
        self.axis.len() * self.repetitions
    }

    /// Maps a sweep coordinate to concrete simulator parameters.
    ///
    /// The seed is always `repetition + 1`, so the same repetition index uses the
    /// same seed for every axis value and rows can be compared pairwise.
    ///
    /// 将扫描坐标映射为具体的模拟器参数。
    /// 种子始终为 `repetition + 1`，因此相同的重复索引在每个轴值上都使用相同的种子。
    pub fn resolve(&self, value: &AxisValue, repetition: usize) -> TrialParameters {
        let seed = u32::try_from(repetition + 1).unwrap_or(u32::MAX);
        let (width, height, threads) = match value {
            AxisValue::GridSize(size) => (size.clone(), size.clone(), self.fixed.threads),
            AxisValue::Threads(count) => (
                self.fixed.width.clone(),
                self.fixed.height.clone(),
                Some(*count),
            ),
        };

        TrialParameters {
            width,
            height,
            probability: self.fixed.probability.clone(),
            steps: self.fixed.steps.clone(),
            seed,
            threads,
            debug: self.fixed.debug.clone(),
        }
    }

    /// Every trial of the sweep in execution order: axis values outer,
    /// repetitions inner and ascending.
    pub fn trials(&self) -> impl Iterator<Item = Trial> + '_ {
        self.axis
            .values()
            .iter()
            .enumerate()
            .flat_map(move |(axis_index, value)| {
                (0..self.repetitions).map(move |repetition| Trial {
                    axis_index,
                    axis_value: value.clone(),
                    repetition,
                    parameters: self.resolve(value, repetition),
                })
            })
    }
}

fn thread_values(values: &[u32], min: Option<u32>, max: Option<u32>) -> Result<Vec<AxisValue>> {
    let counts: Vec<u32> = match (values.is_empty(), min, max) {
        (false, None, None) => values.to_vec(),
        (true, Some(min), Some(max)) => {
            if min > max {
                bail!("Thread range is empty: min ({min}) is greater than max ({max}).");
            }
            (min..=max).collect()
        }
        (true, None, None) => {
            bail!("A thread sweep needs either `values` or both `min` and `max`.")
        }
        (false, _, _) => {
            bail!("A thread sweep takes either `values` or a `min`/`max` range, not both.")
        }
        (true, _, _) => bail!("A thread range needs both `min` and `max`."),
    };

    if counts.contains(&0) {
        bail!("Thread counts must be at least 1.");
    }
    Ok(counts.into_iter().map(AxisValue::Threads).collect())
}
