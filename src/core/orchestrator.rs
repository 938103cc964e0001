//! # Sweep Orchestration Module / 扫描编排模块
//!
//! This module drives a sweep: it walks the axis values in order, runs every
//! repetition of each value one at a time, fills the [`ResultMatrix`] and
//! reports progress after every completed axis value. The first failing trial
//! aborts the whole sweep.
//!
//! 此模块驱动扫描：按顺序遍历轴值，逐个运行每个值的所有重复，
//! 填充 [`ResultMatrix`]，并在每个轴值完成后报告进度。
//! 第一个失败的试验会中止整个扫描。

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::core::{
    execution::{TrialError, TrialRunner},
    models::{AxisValue, Measurement, ResultMatrix, Trial},
    planner::SweepPlanner,
};

/// Why a sweep stopped before filling its matrix.
/// 扫描在填满矩阵之前停止的原因。
#[derive(Debug, Error)]
pub enum SweepError {
    /// A trial failed. Carries the coordinates of the failing cell.
    /// 某次试验失败。携带失败单元的坐标。
    #[error(
        "trial failed at axis index {axis_index} (value {axis_value}), repetition {repetition} (seed {seed})"
    )]
    Trial {
        axis_index: usize,
        axis_value: AxisValue,
        repetition: usize,
        seed: u32,
        #[source]
        source: TrialError,
    },
    /// The sweep was cancelled, e.g. by Ctrl-C.
    /// 扫描被取消，例如通过 Ctrl-C。
    #[error("sweep interrupted after {completed} of {total} trials")]
    Interrupted { completed: usize, total: usize },
}

/// Notifications emitted while a sweep runs.
/// 扫描运行期间发出的通知。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepEvent<'a> {
    /// A trial is about to be launched.
    TrialStarted { trial: &'a Trial },
    /// A trial produced a measurement.
    TrialFinished {
        trial: &'a Trial,
        measurement: Measurement,
    },
    /// Every repetition of one axis value has finished.
    AxisCompleted {
        completed: usize,
        total: usize,
        percent: f64,
    },
}

/// Percentage of axis values completed, computed as `100 * completed / total`
/// in floating point without any rounding (2 of 7 gives `28.571428571428573`).
///
/// 已完成轴值的百分比，以浮点数计算 `100 * completed / total`，不做任何舍入。
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    100.0 * completed as f64 / total as f64
}

/// Runs every trial of the plan sequentially and returns the filled matrix.
///
/// Axis values are visited in order; within a value, repetitions run in
/// ascending order. `on_event` observes each trial and the per-axis progress.
/// Cancelling `stop_token` kills the running trial and returns
/// [`SweepError::Interrupted`].
///
/// 按顺序运行计划中的每个试验，并返回填充好的矩阵。
///
/// # Errors
/// The first [`TrialError`] is returned as [`SweepError::Trial`] together with
/// the failing cell's coordinates; no further trials are started.
pub async fn run_sweep<R, F>(
    planner: &SweepPlanner,
    runner: &R,
    stop_token: &CancellationToken,
    mut on_event: F,
) -> Result<ResultMatrix, SweepError>
where
    R: TrialRunner,
    F: FnMut(SweepEvent<'_>),
{
    let total_axis = planner.axis().len();
    let total_trials = planner.trial_count();
    let mut matrix = ResultMatrix::new(planner.axis().clone(), planner.repetitions());
    let mut completed_trials = 0;

    for trial in planner.trials() {
        if stop_token.is_cancelled() {
            return Err(SweepError::Interrupted {
                completed: completed_trials,
                total: total_trials,
            });
        }

        on_event(SweepEvent::TrialStarted { trial: &trial });

        let result = tokio::select! {
            biased;
            _ = stop_token.cancelled() => {
                return Err(SweepError::Interrupted {
                    completed: completed_trials,
                    total: total_trials,
                });
            }
            result = runner.run(&trial.parameters) => result,
        };

        let measurement = result.map_err(|source| SweepError::Trial {
            axis_index: trial.axis_index,
            axis_value: trial.axis_value.clone(),
            repetition: trial.repetition,
            seed: trial.parameters.seed,
            source,
        })?;

        matrix.record(trial.axis_index, trial.repetition, measurement);
        completed_trials += 1;
        on_event(SweepEvent::TrialFinished {
            trial: &trial,
            measurement,
        });

        if trial.repetition + 1 == planner.repetitions() {
            let completed = trial.axis_index + 1;
            on_event(SweepEvent::AxisCompleted {
                completed,
                total: total_axis,
                percent: progress_percent(completed, total_axis),
            });
        }
    }

    Ok(matrix)
}
