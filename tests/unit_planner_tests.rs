//! # Planner Module Unit Tests / Planner 模块单元测试
//!
//! Tests for configuration validation, coordinate resolution and trial ordering.
//!
//! 配置验证、坐标解析和试验顺序的测试。

use sweep_runner::core::config::{AxisConfig, FixedConfig, SweepConfig};
use sweep_runner::core::models::{AxisKind, AxisValue};
use sweep_runner::core::planner::SweepPlanner;

fn grid_config(values: &[&str], repetitions: usize) -> SweepConfig {
    let mut config = SweepConfig::grid_size_preset();
    config.sweep = AxisConfig::GridSize {
        values: values.iter().map(|v| v.to_string()).collect(),
    };
    config.repetitions = repetitions;
    config
}

fn threads_config(values: Vec<u32>, min: Option<u32>, max: Option<u32>) -> SweepConfig {
    let mut config = SweepConfig::threads_preset();
    config.sweep = AxisConfig::Threads { values, min, max };
    config
}

#[cfg(test)]
mod from_config_tests {
    use super::*;

    #[test]
    fn test_grid_size_preset() {
        let planner = SweepPlanner::from_config(&SweepConfig::grid_size_preset()).unwrap();
        assert_eq!(planner.axis().kind(), AxisKind::GridSize);
        assert_eq!(planner.axis().len(), 7);
        assert_eq!(planner.repetitions(), 10);
        assert_eq!(planner.trial_count(), 70);
        assert_eq!(
            planner.axis().values()[6],
            AxisValue::GridSize("7000".to_string())
        );
    }

    #[test]
    fn test_threads_preset_is_inclusive_range() {
        let planner = SweepPlanner::from_config(&SweepConfig::threads_preset()).unwrap();
        assert_eq!(planner.axis().kind(), AxisKind::Threads);
        assert_eq!(planner.axis().len(), 25);
        assert_eq!(planner.axis().values()[0], AxisValue::Threads(1));
        assert_eq!(planner.axis().values()[24], AxisValue::Threads(25));
    }

    #[test]
    fn test_explicit_thread_values_keep_order() {
        let planner = SweepPlanner::from_config(&threads_config(vec![8, 1, 4], None, None)).unwrap();
        assert_eq!(
            planner.axis().values(),
            &[
                AxisValue::Threads(8),
                AxisValue::Threads(1),
                AxisValue::Threads(4)
            ]
        );
    }

    #[test]
    fn test_invalid_configurations_are_rejected() {
        let invalid = [
            grid_config(&["1000"], 0),
            grid_config(&[], 3),
            grid_config(&["1000", "2000", "1000"], 3),
            grid_config(&["1000", " "], 3),
            threads_config(vec![], None, None),
            threads_config(vec![1, 2], Some(1), Some(2)),
            threads_config(vec![], Some(5), Some(2)),
            threads_config(vec![], Some(0), Some(2)),
            threads_config(vec![], Some(1), None),
            threads_config(vec![3, 3], None, None),
        ];

        for config in &invalid {
            assert!(
                SweepPlanner::from_config(config).is_err(),
                "expected {:?} to be rejected",
                config.sweep
            );
        }
    }

    #[test]
    fn test_duplicate_error_message() {
        let err = SweepPlanner::from_config(&grid_config(&["1000", "1000"], 1)).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}

#[cfg(test)]
mod resolve_tests {
    use super::*;

    #[test]
    fn test_grid_size_drives_width_and_height() {
        let planner = SweepPlanner::from_config(&grid_config(&["1000", "2000"], 2)).unwrap();
        let params = planner.resolve(&AxisValue::GridSize("2000".to_string()), 0);

        assert_eq!(params.width, "2000");
        assert_eq!(params.height, "2000");
        assert_eq!(params.probability, "0.5");
        assert_eq!(params.steps, "100");
        assert_eq!(params.debug, "0");
        assert_eq!(params.threads, None);
        assert_eq!(params.to_args(), vec!["2000", "2000", "0.5", "100", "1", "0"]);
    }

    #[test]
    fn test_grid_size_passes_fixed_thread_count_when_configured() {
        let mut config = grid_config(&["1000"], 1);
        config.fixed.threads = Some(4);
        let planner = SweepPlanner::from_config(&config).unwrap();

        let params = planner.resolve(&AxisValue::GridSize("1000".to_string()), 0);
        assert_eq!(params.threads, Some(4));
    }

    #[test]
    fn test_threads_drive_thread_count_with_fixed_grid() {
        let mut config = threads_config(vec![], Some(1), Some(3));
        config.fixed = FixedConfig {
            width: "640".to_string(),
            height: "480".to_string(),
            ..FixedConfig::default()
        };
        let planner = SweepPlanner::from_config(&config).unwrap();
        let params = planner.resolve(&AxisValue::Threads(3), 4);

        assert_eq!(params.width, "640");
        assert_eq!(params.height, "480");
        assert_eq!(params.threads, Some(3));
        assert_eq!(params.seed, 5);
        assert_eq!(
            params.to_args(),
            vec!["640", "480", "0.5", "100", "5", "3", "0"]
        );
    }

    #[test]
    fn test_seed_is_repetition_plus_one_for_every_axis_value() {
        let planner =
            SweepPlanner::from_config(&grid_config(&["1000", "2000", "3000"], 10)).unwrap();
        for k in 0..planner.repetitions() {
            let seeds: Vec<u32> = planner
                .axis()
                .values()
                .iter()
                .map(|v| planner.resolve(v, k).seed)
                .collect();
            assert!(seeds.iter().all(|s| *s as usize == k + 1));
        }
    }
}

#[cfg(test)]
mod trials_tests {
    use super::*;

    #[test]
    fn test_trials_are_row_major() {
        let planner = SweepPlanner::from_config(&grid_config(&["1000", "2000"], 3)).unwrap();
        let coords: Vec<(usize, usize, u32)> = planner
            .trials()
            .map(|t| (t.axis_index, t.repetition, t.parameters.seed))
            .collect();

        assert_eq!(
            coords,
            vec![
                (0, 0, 1),
                (0, 1, 2),
                (0, 2, 3),
                (1, 0, 1),
                (1, 1, 2),
                (1, 2, 3)
            ]
        );
        assert_eq!(planner.trials().count(), planner.trial_count());
    }
}
