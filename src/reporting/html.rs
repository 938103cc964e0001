//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the result matrix as a standalone HTML table: one row per axis value,
//! one column per seed. Values are shown exactly as they appear in the text file.
//!
//! 将结果矩阵渲染为独立的 HTML 表格：每个轴值一行，每个种子一列。
//! 数值与文本文件中的显示完全一致。

use anyhow::Result;
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::Path;

use crate::core::models::ResultMatrix;
use crate::infra::{fs::write_atomically, t};

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #24292f; }
h1 { font-size: 1.5em; }
.meta { color: #57606a; margin-bottom: 1em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #d0d7de; padding: 4px 10px; }
th { background: #f6f8fa; }
td.value { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; text-align: right; }
footer { margin-top: 1em; color: #57606a; font-size: 0.85em; }
"#;

/// Builds the report markup for `matrix`.
///
/// # Arguments / 参数
/// * `matrix` - A completed result matrix / 已完成的结果矩阵
/// * `executable` - The simulator command, shown in the header / 模拟器命令，显示在标题中
/// * `locale` - The locale to use for internationalization / 用于国际化的语言环境
pub fn render_html_report(matrix: &ResultMatrix, executable: &str, locale: &str) -> Markup {
    let (rows, columns) = matrix.dimensions();
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.title", locale = locale)) }
                div class="meta" {
                    (t!("html_report.summary", locale = locale,
                        executable = executable, axis = matrix.axis().kind().as_str(),
                        rows = rows, columns = columns))
                }
                table {
                    thead {
                        tr {
                            th { (matrix.axis().kind().as_str()) }
                            @for seed in 1..=columns {
                                th { (t!("html_report.seed_header", locale = locale, seed = seed)) }
                            }
                        }
                    }
                    tbody {
                        @for (value, cells) in matrix.rows() {
                            tr {
                                th { (value.to_string()) }
                                @for cell in cells {
                                    td class="value" {
                                        @if let Some(measurement) = cell {
                                            (measurement.to_string())
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                footer {
                    (t!("html_report.generated_at", locale = locale,
                        time = Local::now().format("%Y-%m-%d %H:%M:%S")))
                }
            }
        }
    }
}

/// Generates an HTML report of the result matrix and writes it to `output_path`.
///
/// 生成结果矩阵的 HTML 报告并将其写入 `output_path`。
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
pub fn generate_html_report(
    matrix: &ResultMatrix,
    executable: &str,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let markup = render_html_report(matrix, executable, locale);
    write_atomically(output_path, &markup.into_string())
}
