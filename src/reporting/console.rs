//! # Console Reporting Module / 控制台报告模块
//!
//! Progress and status lines printed while a sweep runs.
//!
//! 扫描运行期间打印的进度和状态行。

use colored::*;

use crate::core::{
    execution::TrialError,
    models::{ResultMatrix, Trial, format_measurement},
    orchestrator::SweepError,
};
use crate::infra::t;

/// Prints the percentage of axis values completed, e.g. `28.571428571428573% complete!`.
/// 打印已完成轴值的百分比，例如 `28.571428571428573% complete!`。
pub fn print_axis_progress(percent: f64, completed: usize, total: usize, locale: &str) {
    println!(
        "{}",
        t!(
            "progress_complete",
            locale = locale,
            percent = format_measurement(percent),
            completed = completed,
            total = total
        )
        .cyan()
    );
}

/// Prints one trial's command line before it runs (verbose mode).
pub fn print_trial_started(trial: &Trial, command_line: &str, locale: &str) {
    println!(
        "{} {}",
        t!(
            "trial_running",
            locale = locale,
            axis = trial.axis_value,
            seed = trial.parameters.seed
        )
        .blue(),
        command_line.dimmed()
    );
}

/// Prints one trial's measurement (verbose mode).
pub fn print_trial_finished(trial: &Trial, seconds: f64, locale: &str) {
    println!(
        "  {}",
        t!(
            "trial_finished",
            locale = locale,
            axis = trial.axis_value,
            seed = trial.parameters.seed,
            time = format_measurement(seconds)
        )
        .green()
    );
}

/// Prints the planned trials without running them.
///
/// 打印计划中的试验而不运行它们。
pub fn print_dry_run(command_lines: &[String], locale: &str) {
    println!(
        "\n{}",
        t!("dry_run_banner", locale = locale, count = command_lines.len()).bold()
    );
    for line in command_lines {
        println!("  {line}");
    }
}

/// Prints a short summary after the matrix has been written.
pub fn print_summary(matrix: &ResultMatrix, output: &std::path::Path, locale: &str) {
    let (rows, columns) = matrix.dimensions();
    println!(
        "\n{}",
        t!(
            "sweep_finished",
            locale = locale,
            rows = rows,
            columns = columns,
            path = output.display()
        )
        .green()
        .bold()
    );
}

/// Prints a highlighted description of why the sweep stopped, including the
/// failing cell and, for execution failures, the tail of the simulator's stderr.
///
/// 打印扫描停止原因的突出描述，包括失败的单元，对于执行失败，还包括模拟器 stderr 的末尾部分。
pub fn print_sweep_failure(error: &SweepError, locale: &str) {
    println!("\n{}", t!("sweep_failed_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    match error {
        SweepError::Trial {
            axis_index,
            axis_value,
            repetition,
            seed,
            source,
        } => {
            println!(
                "{}",
                t!(
                    "failed_cell",
                    locale = locale,
                    axis_index = axis_index,
                    axis = axis_value,
                    repetition = repetition,
                    seed = seed
                )
                .yellow()
            );
            let reason = match source {
                TrialError::Launch { .. } => t!("failure_launch", locale = locale),
                TrialError::Execution { .. } => t!("failure_execution", locale = locale),
                TrialError::Parse { .. } => t!("failure_parse", locale = locale),
                TrialError::Timeout { .. } => t!("failure_timeout", locale = locale),
            };
            println!("{} {}", reason.red(), source);
        }
        SweepError::Interrupted { completed, total } => {
            println!(
                "{}",
                t!(
                    "sweep_interrupted",
                    locale = locale,
                    completed = completed,
                    total = total
                )
                .yellow()
            );
        }
    }

    println!("{}", t!("output_not_written", locale = locale).dimmed());
    println!("{}", "-".repeat(80));
}
