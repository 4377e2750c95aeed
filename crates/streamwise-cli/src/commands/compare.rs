//! The `streamwise compare` command.

use std::path::PathBuf;

use anyhow::Result;

use streamwise_core::report::AssessmentReport;

use crate::config::load_config_from;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: Option<f64>,
    fail_on_decline: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "md"),
        "unknown output format: {format} (expected text, json or markdown)"
    );

    let config = load_config_from(config_path.as_deref())?;
    let threshold = threshold.unwrap_or(config.change_threshold);
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = AssessmentReport::load_json(&baseline_path)?;
    let current = AssessmentReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} improvements, {} declines, {} unchanged (overall {:+.1})",
                report.improvements.len(),
                report.declines.len(),
                report.unchanged,
                report.total_delta
            );

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for c in &report.improvements {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1})",
                        c.domain, c.baseline, c.current, c.delta
                    );
                }
            }

            if !report.declines.is_empty() {
                println!("\nDeclines:");
                for c in &report.declines {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1})",
                        c.domain, c.baseline, c.current, c.delta
                    );
                }
            }

            let label = |s: Option<streamwise_core::model::Stream>| {
                s.map_or("-", |s| s.display_name())
            };
            if report.top_stream_changed {
                println!(
                    "\nTop stream changed: {} -> {}",
                    label(report.baseline_top),
                    label(report.current_top)
                );
            } else {
                println!("\nTop stream unchanged: {}", label(report.current_top));
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
