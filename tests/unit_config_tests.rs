//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Tests for deserializing `Sweep.toml` and for the built-in presets.
//!
//! `Sweep.toml` 反序列化和内置预设的测试。

use std::path::PathBuf;
use sweep_runner::core::config::{AxisConfig, FixedConfig, SweepConfig};

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SweepConfig = toml::from_str(
            r#"
[sweep]
axis = "grid-size"
values = ["1000", "2000"]
"#,
        )
        .unwrap();

        assert_eq!(config.language, "en");
        assert_eq!(config.executable, "./gol");
        assert_eq!(config.output, PathBuf::from("test_result.txt"));
        assert_eq!(config.repetitions, 10);
        assert_eq!(config.timeout_secs, None);
        assert!(config.check_exit_status);
        assert_eq!(config.working_dir, None);
        assert_eq!(config.fixed, FixedConfig::default());
        assert_eq!(
            config.sweep,
            AxisConfig::GridSize {
                values: vec!["1000".to_string(), "2000".to_string()]
            }
        );
    }

    #[test]
    fn test_full_threads_config() {
        let config: SweepConfig = toml::from_str(
            r#"
language = "zh-CN"
executable = "taskset -c 0-7 ./gol"
output = "results/threads.txt"
repetitions = 3
timeout_secs = 600
check_exit_status = false
working_dir = "/tmp/sim"

[sweep]
axis = "threads"
min = 2
max = 8

[fixed]
width = "4096"
height = "2048"
steps = "50"
"#,
        )
        .unwrap();

        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.repetitions, 3);
        assert_eq!(config.timeout_secs, Some(600));
        assert!(!config.check_exit_status);
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp/sim")));
        assert_eq!(
            config.sweep,
            AxisConfig::Threads {
                values: vec![],
                min: Some(2),
                max: Some(8)
            }
        );
        assert_eq!(config.fixed.width, "4096");
        assert_eq!(config.fixed.height, "2048");
        assert_eq!(config.fixed.steps, "50");
        // Unset fixed fields keep their defaults
        assert_eq!(config.fixed.probability, "0.5");
        assert_eq!(config.fixed.debug, "0");
    }

    #[test]
    fn test_missing_sweep_table_is_an_error() {
        let result: Result<SweepConfig, _> = toml::from_str("repetitions = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_misspelt_top_level_key_is_an_error() {
        let err = toml::from_str::<SweepConfig>(
            r#"
repetiton = 3

[sweep]
axis = "grid-size"
values = ["1000"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("repetiton"));
    }

    #[test]
    fn test_misspelt_fixed_key_is_an_error() {
        let result: Result<SweepConfig, _> = toml::from_str(
            r#"
[sweep]
axis = "grid-size"
values = ["1000"]

[fixed]
probabilty = "0.3"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_misspelt_sweep_key_is_an_error() {
        let result: Result<SweepConfig, _> = toml::from_str(
            r#"
[sweep]
axis = "threads"
min = 1
maximum = 8
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_axis_is_an_error() {
        let result: Result<SweepConfig, _> = toml::from_str(
            r#"
[sweep]
axis = "probability"
values = ["0.1"]
"#,
        );
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod preset_tests {
    use super::*;

    #[test]
    fn test_presets_round_trip_through_toml() {
        for preset in [SweepConfig::grid_size_preset(), SweepConfig::threads_preset()] {
            let text = toml::to_string_pretty(&preset).unwrap();
            let parsed: SweepConfig = toml::from_str(&text).unwrap();

            assert_eq!(parsed.sweep, preset.sweep);
            assert_eq!(parsed.fixed, preset.fixed);
            assert_eq!(parsed.executable, preset.executable);
            assert_eq!(parsed.repetitions, preset.repetitions);
            assert_eq!(parsed.output, preset.output);
        }
    }

    #[test]
    fn test_threads_preset_serializes_range() {
        let text = toml::to_string_pretty(&SweepConfig::threads_preset()).unwrap();
        assert!(text.contains("axis = \"threads\""));
        assert!(text.contains("min = 1"));
        assert!(text.contains("max = 25"));
        assert!(!text.contains("timeout_secs"));
    }
}
