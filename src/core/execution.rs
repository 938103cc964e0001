//! # Trial Execution Module / 试验执行模块
//!
//! This module runs a single trial: it launches the simulator with the trial's
//! positional arguments, waits for it, and turns its stdout into a [`Measurement`].
//!
//! 此模块运行单次试验：使用试验的位置参数启动模拟器，等待其结束，
//! 并将其 stdout 转换为 [`Measurement`]。

use anyhow::Result;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::{
    core::{
        config::SweepConfig,
        models::{Measurement, TrialParameters},
    },
    infra::command::{self, CommandError},
};

/// How many trailing stderr lines are kept in an execution error.
const STDERR_TAIL_LINES: usize = 20;

/// Why a trial produced no measurement.
/// 试验未产生测量值的原因。
#[derive(Debug, Error)]
pub enum TrialError {
    /// The simulator could not be started (missing binary, permission denied).
    /// 模拟器无法启动（二进制文件缺失、权限被拒绝）。
    #[error("failed to launch '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The simulator exited unsuccessfully or its output could not be collected.
    /// 模拟器未成功退出，或无法收集其输出。
    #[error("simulator {status}{}", stderr_suffix(.stderr))]
    Execution { status: String, stderr: String },
    /// Stdout was not exactly one floating-point number.
    /// stdout 不是恰好一个浮点数。
    #[error("could not parse simulator output {output:?}: {reason}")]
    Parse { output: String, reason: String },
    /// The simulator exceeded the configured per-trial timeout and was killed.
    /// 模拟器超过了配置的单次试验超时时间并被终止。
    #[error("simulator did not finish within {seconds}s")]
    Timeout { seconds: u64 },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!("; stderr:\n{stderr}")
    }
}

/// Runs one fully resolved trial and reports its measurement.
///
/// Implementations keep no state between calls; the orchestrator awaits each
/// call before starting the next one.
///
/// 运行一次完全解析的试验并报告其测量值。
pub trait TrialRunner {
    fn run(
        &self,
        params: &TrialParameters,
    ) -> impl Future<Output = Result<Measurement, TrialError>> + Send;
}

/// Parses the complete stdout of a trial.
///
/// After trimming surrounding whitespace the text must be exactly one token that
/// parses as a finite, non-negative `f64`. Empty output, extra lines, extra
/// tokens and anything non-numeric are rejected rather than guessed at.
///
/// 解析一次试验的完整 stdout。
/// 去除首尾空白后，文本必须恰好是一个可以解析为有限非负 `f64` 的标记。
pub fn parse_measurement(stdout: &str) -> Result<Measurement, TrialError> {
    let parse_error = |reason: &str| TrialError::Parse {
        output: stdout.to_string(),
        reason: reason.to_string(),
    };

    let text = stdout.trim();
    if text.is_empty() {
        return Err(parse_error("no output"));
    }
    if text.lines().count() > 1 {
        return Err(parse_error("expected a single line"));
    }
    if text.split_whitespace().count() > 1 {
        return Err(parse_error("expected a single value"));
    }

    let value: f64 = text
        .parse()
        .map_err(|e: std::num::ParseFloatError| parse_error(&e.to_string()))?;
    Measurement::new(value).ok_or_else(|| parse_error("not a finite, non-negative duration"))
}

/// Runs the simulator as a child process.
/// 将模拟器作为子进程运行。
#[derive(Debug, Clone)]
pub struct ProcessTrialRunner {
    program: String,
    base_args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    check_exit_status: bool,
}

impl ProcessTrialRunner {
    /// Creates a runner for `command`, a shell-style command line such as
    /// `./gol` or `taskset -c 0-3 ./gol`. Trial arguments are appended to it.
    pub fn new(command: &str) -> Result<Self> {
        let mut parts = command::split_command_line(command)?;
        let program = parts.remove(0);
        Ok(Self {
            program,
            base_args: parts,
            working_dir: None,
            timeout: None,
            check_exit_status: true,
        })
    }

    /// Builds a runner from the executable, timeout, exit-status policy and
    /// working directory of a configuration.
    pub fn from_config(config: &SweepConfig) -> Result<Self> {
        let mut runner = Self::new(&config.executable)?
            .with_timeout(config.timeout_secs.map(Duration::from_secs))
            .with_exit_status_check(config.check_exit_status);
        runner.working_dir = config.working_dir.clone();
        Ok(runner)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_exit_status_check(mut self, check: bool) -> Self {
        self.check_exit_status = check;
        self
    }

    pub fn with_working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full argument vector, program first, used for one trial.
    pub fn command_line(&self, params: &TrialParameters) -> Vec<String> {
        let mut line = Vec::with_capacity(1 + self.base_args.len() + 7);
        line.push(self.program.clone());
        line.extend(self.base_args.iter().cloned());
        line.extend(params.to_args());
        line
    }

    async fn run_once(&self, params: &TrialParameters) -> Result<Measurement, TrialError> {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(params.to_args())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = command::spawn_and_capture(cmd)
            .await
            .map_err(|e| match e {
                CommandError::Spawn(source) => TrialError::Launch {
                    program: self.program.clone(),
                    source,
                },
                CommandError::Capture(source) => TrialError::Execution {
                    status: format!("output could not be captured ({source})"),
                    stderr: String::new(),
                },
            })?;

        if self.check_exit_status && !output.status.success() {
            return Err(TrialError::Execution {
                status: describe_status(&output.status),
                stderr: command::tail_lines(&output.stderr, STDERR_TAIL_LINES),
            });
        }

        parse_measurement(&output.stdout)
    }
}

impl TrialRunner for ProcessTrialRunner {
    async fn run(&self, params: &TrialParameters) -> Result<Measurement, TrialError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_once(params))
                .await
                .unwrap_or(Err(TrialError::Timeout {
                    seconds: limit.as_secs(),
                })),
            None => self.run_once(params).await,
        }
    }
}

fn describe_status(status: &std::process::ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {code}"),
        None => format!("was terminated abnormally ({status})"),
    }
}
