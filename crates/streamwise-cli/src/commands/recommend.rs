//! The `streamwise recommend` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use streamwise_core::model::DomainScores;
use streamwise_core::question_bank::QuestionBank;
use streamwise_core::ScoringEngine;

use super::{load_stream_model, print_recommendations, OutputFormat};
use crate::config::load_config_from;

pub fn execute(
    scores_path: PathBuf,
    streams_path: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = OutputFormat::resolve(format.as_deref(), &config)?;

    let content = std::fs::read_to_string(&scores_path)
        .with_context(|| format!("failed to read scores from {}", scores_path.display()))?;
    let record: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse scores JSON: {}", scores_path.display()))?;
    let scores = DomainScores::from_values(&record)?;

    let model = load_stream_model(streams_path, &config)?;
    // Recommending needs no questions; the bank is only carried for scoring.
    let engine = ScoringEngine::new(QuestionBank::builtin(), model);
    let recommendations = engine.recommend(&scores)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendations)?),
        OutputFormat::Text => print_recommendations(&recommendations),
    }

    Ok(())
}
