//! # Command Execution Module / 命令执行模块
//!
//! Spawning of child processes with captured output, and parsing of the
//! command strings users put in their configuration.
//!
//! 派生子进程并捕获其输出，以及解析用户在配置中填写的命令字符串。

use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::AsyncReadExt;

/// Everything a finished child process left behind.
/// 已结束的子进程留下的全部信息。
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Failures that happen around a child process rather than inside it.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started at all.
    #[error("failed to start process")]
    Spawn(#[source] std::io::Error),
    /// The process started but its output or exit status could not be collected.
    #[error("failed to capture process output")]
    Capture(#[source] std::io::Error),
}

/// Spawns a command and captures its stdout and stderr separately.
/// Both streams are drained concurrently so a chatty stderr cannot block the child.
///
/// The command should be built with `kill_on_drop(true)` so that dropping the
/// returned future (timeout, cancellation) also terminates the process.
///
/// 派生一个命令，分别捕获其 stdout 和 stderr。
/// 两个流被并发读取，因此大量的 stderr 输出不会阻塞子进程。
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// The exit status and both output streams, or a [`CommandError`] telling
/// whether spawning or collecting failed.
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> Result<CapturedOutput, CommandError> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(CommandError::Spawn)?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| CommandError::Capture(std::io::Error::other("stdout was not piped")))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| CommandError::Capture(std::io::Error::other("stderr was not piped")))?;

    let read_stdout = async {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await.map(|_| buf)
    };
    let read_stderr = async {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    };

    let (stdout, stderr, status) = tokio::try_join!(read_stdout, read_stderr, child.wait())
        .map_err(CommandError::Capture)?;

    Ok(CapturedOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

/// Expands `~` and environment variables in a command string and splits it into
/// words with POSIX shell quoting rules.
///
/// 展开命令字符串中的 `~` 和环境变量，并按 POSIX shell 引号规则将其拆分为单词。
pub fn split_command_line(command: &str) -> anyhow::Result<Vec<String>> {
    let expanded = shellexpand::full(command)
        .map_err(|e| anyhow::anyhow!("Failed to expand command '{command}': {e}"))?;

    let parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse command: {}", expanded))?;

    if parts.is_empty() {
        anyhow::bail!("Empty command after parsing.");
    }
    Ok(parts)
}

/// Renders a program and its arguments as a copy-pasteable shell line.
pub fn display_command_line(parts: &[String]) -> String {
    shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
}

/// Keeps the last `max_lines` lines of captured output for error messages.
pub fn tail_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
