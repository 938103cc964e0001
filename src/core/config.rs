use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Describes which simulator parameter the sweep varies and over which values.
/// Selected in TOML with the `axis` tag, e.g. `axis = "grid-size"`.
/// 描述扫描改变哪个模拟器参数以及取哪些值。
/// 在 TOML 中通过 `axis` 标签选择，例如 `axis = "grid-size"`。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "axis", rename_all = "kebab-case", deny_unknown_fields)]
pub enum AxisConfig {
    /// Square grids: every value drives both width and height.
    /// 方形网格：每个值同时决定宽度和高度。
    GridSize {
        /// Grid dimensions, passed to the simulator unchanged.
        /// 网格尺寸，原样传递给模拟器。
        values: Vec<String>,
    },
    /// Worker-thread counts, either listed explicitly or as an inclusive range.
    /// 工作线程数，可以显式列出，也可以作为闭区间给出。
    Threads {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        values: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
}

/// Simulator parameters held constant for the whole sweep.
/// Everything except `threads` is forwarded as the literal string given here.
/// 在整个扫描过程中保持不变的模拟器参数。
/// 除 `threads` 外，所有字段都按此处给出的字符串原样转发。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixedConfig {
    /// Grid width, ignored by grid-size sweeps / 网格宽度，网格尺寸扫描时忽略
    pub width: String,
    /// Grid height, ignored by grid-size sweeps / 网格高度，网格尺寸扫描时忽略
    pub height: String,
    /// Probability that a cell starts alive / 细胞初始存活的概率
    pub probability: String,
    /// Number of generations to simulate / 模拟的代数
    pub steps: String,
    /// Debug flag understood by the simulator / 模拟器理解的调试标志
    pub debug: String,
    /// Thread count for grid-size sweeps. Omitted from the argument list when unset.
    /// 网格尺寸扫描使用的线程数。未设置时不出现在参数列表中。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self {
            width: "7000".to_string(),
            height: "7000".to_string(),
            probability: "0.5".to_string(),
            steps: "100".to_string(),
            debug: "0".to_string(),
            threads: None,
        }
    }
}

/// Represents the entire sweep configuration, loaded from a TOML file.
/// Unknown keys are rejected so that a misspelt setting cannot silently fall
/// back to its default.
/// 代表从 TOML 文件加载的整个扫描配置。未知的键会被拒绝。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// The simulator command. Expanded like a shell word list, trial
    /// arguments are appended after it.
    /// 模拟器命令。像 shell 词列表一样展开，试验参数附加在其后。
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Where the result matrix is written once the sweep completes.
    /// 扫描完成后写入结果矩阵的位置。
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Number of repetitions per axis value. Repetition `k` runs with seed `k + 1`.
    /// 每个轴值的重复次数。第 `k` 次重复使用种子 `k + 1`。
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,

    /// Optional per-trial timeout in seconds. A trial that runs longer is killed
    /// and aborts the sweep.
    /// 可选的单次试验超时时间（秒）。运行超时的试验会被终止并中止扫描。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Treat a non-zero exit status as a failed trial even if stdout parsed.
    /// 即使 stdout 可以解析，也将非零退出状态视为试验失败。
    #[serde(default = "default_check_exit_status")]
    pub check_exit_status: bool,

    /// Working directory for the simulator. Inherits the runner's when unset.
    /// 模拟器的工作目录。未设置时继承运行器的工作目录。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    pub sweep: AxisConfig,

    #[serde(default)]
    pub fixed: FixedConfig,
}

impl SweepConfig {
    /// The grid-size preset: square grids from 1000 to 7000, ten repetitions each.
    pub fn grid_size_preset() -> Self {
        Self::with_axis(AxisConfig::GridSize {
            values: (1..=7).map(|i| (i * 1000).to_string()).collect(),
        })
    }

    /// The thread-count preset: 1 to 25 threads on a fixed 7000x7000 grid.
    pub fn threads_preset() -> Self {
        Self::with_axis(AxisConfig::Threads {
            values: vec![],
            min: Some(1),
            max: Some(25),
        })
    }

    fn with_axis(sweep: AxisConfig) -> Self {
        Self {
            language: default_language(),
            executable: default_executable(),
            output: default_output(),
            repetitions: default_repetitions(),
            timeout_secs: None,
            check_exit_status: default_check_exit_status(),
            working_dir: None,
            sweep,
            fixed: FixedConfig::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_executable() -> String {
    "./gol".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("test_result.txt")
}

fn default_repetitions() -> usize {
    10
}

fn default_check_exit_status() -> bool {
    true
}
