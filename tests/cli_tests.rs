use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

mod common;

/// `--help` lists both subcommands.
///
/// `--help` 列出两个子命令。
#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang").arg("en").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("init"));
}

/// Running without a subcommand prints usage and fails.
///
/// 不带子命令运行会打印用法并失败。
#[test]
fn test_missing_subcommand_fails() {
    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang").arg("en");

    cmd.assert().failure();
}

/// `init --non-interactive` writes the grid-size preset.
///
/// `init --non-interactive` 写入网格尺寸预设。
#[test]
fn test_init_non_interactive_writes_grid_preset() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Sweep.toml");

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("init")
        .arg("--non-interactive")
        .arg("--path")
        .arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("axis = \"grid-size\""));
    assert!(content.contains("\"7000\""));
    assert!(content.contains("repetitions = 10"));
}

/// `init --axis threads` writes the thread-count preset into a new directory.
///
/// `init --axis threads` 将线程数预设写入新目录。
#[test]
fn test_init_threads_preset_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("configs").join("threads.toml");

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("init")
        .arg("--non-interactive")
        .arg("--axis")
        .arg("threads")
        .arg("--path")
        .arg(&path);

    cmd.assert().success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("axis = \"threads\""));
    assert!(content.contains("max = 25"));
}

/// An existing file is kept unless `--force` is given.
///
/// 除非指定 `--force`，否则保留已存在的文件。
#[test]
fn test_init_does_not_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::write_config(&temp_dir, "# keep me\n");

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("init")
        .arg("--non-interactive")
        .arg("--path")
        .arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# keep me\n");

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("init")
        .arg("--non-interactive")
        .arg("--force")
        .arg("--path")
        .arg(&path);

    cmd.assert().success();
    assert!(fs::read_to_string(&path).unwrap().contains("[sweep]"));
}

/// `run --dry-run` prints every planned invocation without running any of them.
///
/// `run --dry-run` 打印每个计划的调用而不运行它们。
#[test]
fn test_dry_run_lists_command_lines() {
    let temp_dir = TempDir::new().unwrap();
    let executable = temp_dir.path().join("never_run_gol");
    let config = common::write_grid_config(&temp_dir, &executable, &["1000", "2000"], 2);

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("4 planned trials"))
        .stdout(predicate::str::contains("1000 1000 0.5 100 1 0"))
        .stdout(predicate::str::contains("2000 2000 0.5 100 2 0"));
    assert!(!common::output_path(&temp_dir).exists());
}

/// Command-line overrides replace the configuration file's values.
///
/// 命令行覆盖项替换配置文件中的值。
#[test]
fn test_dry_run_applies_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let executable = temp_dir.path().join("never_run_gol");
    let config = common::write_grid_config(&temp_dir, &executable, &["1000"], 2);

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--executable")
        .arg("echo")
        .arg("--repetitions")
        .arg("3")
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3 planned trials"))
        .stdout(predicate::str::contains("echo 1000 1000 0.5 100 3 0"));
}

/// Chinese output is selected with `--lang zh-CN`.
///
/// 使用 `--lang zh-CN` 选择中文输出。
#[test]
fn test_dry_run_in_chinese() {
    let temp_dir = TempDir::new().unwrap();
    let executable = temp_dir.path().join("never_run_gol");
    let config = common::write_grid_config(&temp_dir, &executable, &["1000"], 1);

    let mut cmd = Command::cargo_bin("sweep-runner").unwrap();
    cmd.arg("--lang")
        .arg("zh-CN")
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("试运行"))
        .stdout(predicate::str::contains("Sweeping").not());
}
