//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command for the Sweep Runner CLI,
//! which executes a sweep according to the configuration file and writes the
//! result matrix once every trial has succeeded.
//!
//! 此模块实现了 Sweep Runner CLI 的 `run` 命令，
//! 根据配置文件执行扫描，并在所有试验成功后写入结果矩阵。

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::Path, path::PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::SweepConfig,
        execution::ProcessTrialRunner,
        orchestrator::{SweepEvent, run_sweep},
        planner::SweepPlanner,
    },
    infra::{command::display_command_line, fs::write_atomically, t},
    reporting::{
        console::{
            print_axis_progress, print_dry_run, print_summary, print_sweep_failure,
            print_trial_finished, print_trial_started,
        },
        html::generate_html_report,
        json::{SweepReport, write_json_report},
    },
};

/// Options of the `run` subcommand. `None` keeps the configuration file's value.
/// `run` 子命令的选项。`None` 表示保留配置文件中的值。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: PathBuf,
    pub output: Option<PathBuf>,
    pub executable: Option<String>,
    pub repetitions: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub json: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
    /// Language given with `--lang`; takes precedence over the config file.
    pub language: Option<String>,
}

/// Executes the run command with the provided options.
///
/// # Returns
/// A Result indicating success or failure of the sweep. On failure nothing is written.
pub async fn execute(options: RunOptions) -> Result<()> {
    let (mut config, config_path) = setup_and_parse_config(&options.config)?;
    apply_overrides(&mut config, &options);

    let locale = crate::resolve_locale(options.language.as_deref().unwrap_or(&config.language));
    rust_i18n::set_locale(locale);

    println!(
        "{}",
        t!("loading_sweep_config", locale = locale, path = config_path.display())
    );

    let planner = SweepPlanner::from_config(&config).with_context(|| {
        t!("config_invalid", locale = locale, path = config_path.display()).to_string()
    })?;
    let runner = ProcessTrialRunner::from_config(&config)?;

    println!(
        "{}",
        t!(
            "sweep_plan",
            locale = locale,
            axis = planner.axis().kind().as_str(),
            values = planner.axis().len(),
            repetitions = planner.repetitions(),
            trials = planner.trial_count()
        )
        .cyan()
    );
    println!(
        "{}",
        t!("simulator_command", locale = locale, command = config.executable.yellow())
    );

    if options.dry_run {
        let lines: Vec<String> = planner
            .trials()
            .map(|trial| display_command_line(&runner.command_line(&trial.parameters)))
            .collect();
        print_dry_run(&lines, locale);
        return Ok(());
    }

    let stop_token = setup_signal_handler(locale);
    let verbose = options.verbose;

    let result = run_sweep(&planner, &runner, &stop_token, |event| match event {
        SweepEvent::TrialStarted { trial } if verbose => {
            let line = display_command_line(&runner.command_line(&trial.parameters));
            print_trial_started(trial, &line, locale);
        }
        SweepEvent::TrialFinished { trial, measurement } if verbose => {
            print_trial_finished(trial, measurement.seconds(), locale);
        }
        SweepEvent::AxisCompleted {
            completed,
            total,
            percent,
        } => print_axis_progress(percent, completed, total, locale),
        _ => {}
    })
    .await;

    let matrix = match result {
        Ok(matrix) => matrix,
        Err(e) => {
            print_sweep_failure(&e, locale);
            return Err(e.into());
        }
    };

    let text = matrix.serialize()?;
    write_atomically(&config.output, &text).with_context(|| {
        t!("output_write_failed", locale = locale, path = config.output.display()).to_string()
    })?;
    print_summary(&matrix, &config.output, locale);

    if let Some(json_path) = &options.json {
        let report = SweepReport::new(&matrix, &config.executable, &config.fixed)?;
        write_report("JSON", json_path, write_json_report(&report, json_path), locale);
    }
    if let Some(html_path) = &options.html {
        let written = generate_html_report(&matrix, &config.executable, html_path, locale);
        write_report("HTML", html_path, written, locale);
    }

    Ok(())
}

fn setup_and_parse_config(config_path_arg: &Path) -> Result<(SweepConfig, PathBuf)> {
    // For config parsing, we don't have the locale yet. Use English as a default.
    let locale = "en";
    let config_path = fs::canonicalize(config_path_arg).with_context(|| {
        t!("config_read_failed_path", locale = locale, path = config_path_arg.display()).to_string()
    })?;

    let config_content = fs::read_to_string(&config_path).with_context(|| {
        t!("config_read_failed_path", locale = locale, path = config_path.display()).to_string()
    })?;

    let config: SweepConfig = toml::from_str(&config_content)
        .with_context(|| t!("config_parse_failed", locale = locale).to_string())?;

    Ok((config, config_path))
}

fn apply_overrides(config: &mut SweepConfig, options: &RunOptions) {
    if let Some(output) = &options.output {
        config.output = output.clone();
    }
    if let Some(executable) = &options.executable {
        config.executable = executable.clone();
    }
    if let Some(repetitions) = options.repetitions {
        config.repetitions = repetitions;
    }
    if options.timeout_secs.is_some() {
        config.timeout_secs = options.timeout_secs;
    }
}

fn write_report(kind: &str, path: &Path, written: Result<()>, locale: &str) {
    match written {
        Ok(()) => println!(
            "{}",
            t!("report_written", locale = locale, kind = kind, path = path.display())
        ),
        Err(e) => eprintln!(
            "{} {:#}",
            t!("report_write_failed", locale = locale, kind = kind).red(),
            e
        ),
    }
}

fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
