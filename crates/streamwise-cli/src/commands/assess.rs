//! The `streamwise assess` command.

use std::path::PathBuf;

use anyhow::Result;

use streamwise_core::model::AnswerSheet;
use streamwise_report::html::write_html_report;

use super::{load_engine, print_recommendations, print_scores, OutputFormat};
use crate::config::load_config_from;

pub fn execute(
    answers_str: String,
    bank_path: Option<PathBuf>,
    streams_path: Option<PathBuf>,
    format: Option<String>,
    save: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = OutputFormat::resolve(format.as_deref(), &config)?;

    let save_formats = save.as_deref().map(parse_save_formats).transpose()?;

    let answers: AnswerSheet = answers_str
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let engine = load_engine(bank_path, streams_path, &config)?;

    let bank_len = engine.bank().len();
    if answers.len() > bank_len {
        tracing::warn!(
            "{} answers given for {} questions; extra answers are ignored",
            answers.len(),
            bank_len
        );
    } else if answers.answered() < bank_len {
        tracing::info!(
            "{} of {} questions answered; the rest count as incorrect",
            answers.answered(),
            bank_len
        );
    }

    let report = engine.assess(&answers)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!(
                "Assessment: {} ({} questions)\n",
                report.bank.name, report.bank.item_count
            );
            print_scores(&report.scores);
            println!();
            print_recommendations(&report.recommendations);
        }
    }

    if let Some(formats) = save_formats {
        let output = output.unwrap_or_else(|| config.output_dir.clone());
        std::fs::create_dir_all(&output)?;
        let stem = format!(
            "report-{}-{}",
            report.created_at.format("%Y-%m-%dT%H%M%S"),
            &report.id.simple().to_string()[..8]
        );

        for fmt in formats {
            match fmt {
                SaveFormat::Json => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Report saved to: {}", path.display());
                }
                SaveFormat::Html => {
                    let path = output.join(format!("{stem}.html"));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveFormat {
    Json,
    Html,
}

/// `all`, or a comma-separated list of `json` and `html`.
fn parse_save_formats(save: &str) -> Result<Vec<SaveFormat>> {
    if save.trim() == "all" {
        return Ok(vec![SaveFormat::Json, SaveFormat::Html]);
    }
    save.split(',')
        .map(str::trim)
        .map(|fmt| match fmt {
            "json" => Ok(SaveFormat::Json),
            "html" => Ok(SaveFormat::Html),
            other => anyhow::bail!("unknown save format: {other} (expected json, html or all)"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_formats_expand_all() {
        assert_eq!(
            parse_save_formats("all").unwrap(),
            vec![SaveFormat::Json, SaveFormat::Html]
        );
        assert_eq!(
            parse_save_formats("html, json").unwrap(),
            vec![SaveFormat::Html, SaveFormat::Json]
        );
    }

    #[test]
    fn save_formats_reject_unknown() {
        let err = parse_save_formats("json,pdf").unwrap_err();
        assert!(err.to_string().contains("unknown save format: pdf"));
    }
}
