//! # Sweep Initialization Module / 扫描初始化模块
//!
//! This module implements the `init` command, which creates a `Sweep.toml`
//! from one of the two built-in presets, either directly or through a short
//! interactive wizard.
//!
//! 此模块实现 `init` 命令，它根据两个内置预设之一创建 `Sweep.toml`，
//! 可以直接创建，也可以通过简短的交互式向导创建。
//!
//! ## Presets / 预设
//!
//! - **grid-size**: square grids 1000..7000, fixed thread count
//! - **threads**: 1..25 worker threads on a 7000x7000 grid
//!
//! - **grid-size**: 方形网格 1000..7000，固定线程数
//! - **threads**: 在 7000x7000 网格上使用 1..25 个工作线程

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::SweepConfig;
use crate::infra::t;

const CONFIG_HEADER: &str = "# Sweep Runner configuration / 扫描运行器配置\n\
# Each trial runs: <executable> width height probability steps seed [threads] debug\n\n";

/// Which built-in configuration to start from.
/// 从哪个内置配置开始。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPreset {
    GridSize,
    Threads,
}

impl AxisPreset {
    /// Maps a CLI value onto a preset; anything other than `threads` is the grid-size preset.
    pub fn from_name(name: &str) -> Self {
        match name {
            "threads" => AxisPreset::Threads,
            _ => AxisPreset::GridSize,
        }
    }

    pub fn config(&self) -> SweepConfig {
        match self {
            AxisPreset::GridSize => SweepConfig::grid_size_preset(),
            AxisPreset::Threads => SweepConfig::threads_preset(),
        }
    }
}

/// Runs the wizard (or its non-interactive shortcut) and writes the configuration.
///
/// 运行向导（或其非交互式快捷方式）并写入配置。
pub fn run_init_wizard(
    config_path: &Path,
    preset: Option<AxisPreset>,
    language: &str,
    non_interactive: bool,
    force: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    if config_path.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                t!("init_file_exists", locale = language, path = config_path.display()).red()
            );
            println!("{}", t!("init_use_force", locale = language).yellow());
            return Ok(());
        }

        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    if non_interactive {
        let mut config = preset.unwrap_or(AxisPreset::GridSize).config();
        config.language = language.to_string();
        return write_config(config_path, &config, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    let preset = match preset {
        Some(preset) => preset,
        None => {
            let options = [
                t!("init_preset_grid_size", locale = language),
                t!("init_preset_threads", locale = language),
            ];
            let selection = Select::with_theme(&theme)
                .with_prompt(t!("init_preset_prompt", locale = language))
                .items(&options)
                .default(0)
                .interact()
                .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
            if selection == 1 {
                AxisPreset::Threads
            } else {
                AxisPreset::GridSize
            }
        }
    };

    let mut config = preset.config();
    config.language = language.to_string();

    config.executable = Input::with_theme(&theme)
        .with_prompt(t!("init_executable_prompt", locale = language))
        .default(config.executable.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    config.repetitions = Input::with_theme(&theme)
        .with_prompt(t!("init_repetitions_prompt", locale = language))
        .default(config.repetitions)
        .validate_with(|n: &usize| {
            if *n >= 1 {
                Ok(())
            } else {
                Err(t!("init_repetitions_invalid", locale = language).to_string())
            }
        })
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    write_config(config_path, &config, language)
}

fn write_config(path: &Path, config: &SweepConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init_create_parent_dir_failed", locale = language, path = parent.display())
                .to_string()
        })?;
    }

    fs::write(path, format!("{CONFIG_HEADER}{toml_string}")).with_context(|| {
        t!("init_write_failed", locale = language, path = path.display()).to_string()
    })?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
