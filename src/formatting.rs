use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use scc_lib::output::SCC_OUTPUT_VERSION;
use scc_lib::{ErrorOutput, SccError, SccOutput};

use crate::cli::OutputFormat;

/// Most items listed per section in human output.
const MAX_LISTED: usize = 10;

/// Write output in the requested format.
pub fn write_output(
    body: &SccOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), SccError> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: SccError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    tracing::error!(error = %err, "scc failed");
    let error_payload = err.to_payload();
    let payload = SccOutput::Error(ErrorOutput {
        version: SCC_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Reserve exit code 2 for fatal/errors; policy failures use 1.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &SccOutput, output: Option<&Path>) -> Result<(), SccError> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &SccOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &SccOutput, colorize: bool) -> String {
    match body {
        SccOutput::Analyze(out) => {
            let mut buf = String::new();
            let status = if out.passed { "PASS" } else { "FAIL" };
            let status_colored = color(status, if out.passed { "32" } else { "31" }, colorize);
            writeln!(
                buf,
                "{} Style conflict check ({}, {} rules)",
                status_colored, out.input.path, out.input.rules
            )
            .ok();
            writeln!(
                buf,
                "Conflicts: {}  Overlaps: {}  Specificity issues: {}",
                count(out.summary.total_conflicts, colorize),
                count(out.summary.total_overlaps, colorize),
                count(out.summary.total_specificity_issues, colorize)
            )
            .ok();

            if !out.result.conflicts.is_empty() {
                writeln!(buf, "Conflicts (max {MAX_LISTED}):").ok();
                for conflict in out.result.conflicts.iter().take(MAX_LISTED) {
                    let props: Vec<&str> = conflict
                        .conflicting_properties
                        .iter()
                        .map(String::as_str)
                        .collect();
                    writeln!(
                        buf,
                        "- {}{} vs {}{}: {}",
                        conflict.selector_1,
                        line_suffix(conflict.line_1),
                        conflict.selector_2,
                        line_suffix(conflict.line_2),
                        props.join(", ")
                    )
                    .ok();
                }
            }

            if !out.result.overlapping_selectors.is_empty() {
                writeln!(buf, "Overlaps (max {MAX_LISTED}):").ok();
                for overlap in out.result.overlapping_selectors.iter().take(MAX_LISTED) {
                    writeln!(
                        buf,
                        "- [{}] {}",
                        overlap.overlap_type,
                        overlap.selectors.join(", ")
                    )
                    .ok();
                }
            }

            if !out.result.property_conflicts.is_empty() {
                writeln!(buf, "Properties by category:").ok();
                for (category, names) in &out.result.property_conflicts {
                    writeln!(buf, "- {:14} {}", category.as_str(), names.join(", ")).ok();
                }
            }

            if !out.result.specificity_issues.is_empty() {
                writeln!(buf, "Specificity issues:").ok();
                for issue in out.result.specificity_issues.iter().take(MAX_LISTED) {
                    writeln!(
                        buf,
                        "- {} {}: {}",
                        issue.selector,
                        issue.specificity,
                        issue.issue
                    )
                    .ok();
                }
            }

            if !out.result.resolution_suggestions.is_empty() {
                writeln!(buf, "Suggestions:").ok();
                for suggestion in out.result.resolution_suggestions.iter().take(MAX_LISTED) {
                    writeln!(buf, "- {suggestion}").ok();
                }
            }
            buf
        }
        SccOutput::Selectors(out) => {
            let mut buf = String::new();
            let header = color("[SELECTORS]", "36", colorize);
            writeln!(
                buf,
                "{} {} selectors, average score {:.2}",
                header,
                out.report.selectors.len(),
                out.report.average_score
            )
            .ok();
            for entry in &out.report.selectors {
                writeln!(
                    buf,
                    "- {} [{}] specificity {} (score {})",
                    entry.selector, entry.kind, entry.specificity, entry.score
                )
                .ok();
                for recommendation in &entry.recommendations {
                    writeln!(buf, "    {recommendation}").ok();
                }
            }
            buf
        }
        SccOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn line_suffix(line: Option<u32>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn count(n: usize, colorize: bool) -> String {
    let code = if n == 0 { "32" } else { "33" };
    color(&n.to_string(), code, colorize)
}

/// Determine exit code for the analyze command.
pub fn exit_code_for_analyze(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
