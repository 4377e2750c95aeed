//! Subcommand implementations and the helpers they share.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use streamwise_core::model::{DomainScores, StreamRecommendation};
use streamwise_core::parser;
use streamwise_core::question_bank::QuestionBank;
use streamwise_core::stream_model::StreamModel;
use streamwise_core::ScoringEngine;

use crate::config::StreamwiseConfig;

pub mod assess;
pub mod compare;
pub mod init;
pub mod questions;
pub mod recommend;
pub mod validate;

/// Stdout format for commands that print results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// The flag wins over the config default.
    pub fn resolve(flag: Option<&str>, config: &StreamwiseConfig) -> Result<Self> {
        match flag.unwrap_or(&config.format) {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format: {other} (expected text or json)"),
        }
    }
}

pub fn load_bank(flag: Option<PathBuf>, config: &StreamwiseConfig) -> Result<QuestionBank> {
    match flag.or_else(|| config.question_bank.clone()) {
        Some(path) => parser::parse_question_bank(&path),
        None => Ok(QuestionBank::builtin()),
    }
}

pub fn load_stream_model(flag: Option<PathBuf>, config: &StreamwiseConfig) -> Result<StreamModel> {
    match flag.or_else(|| config.stream_model.clone()) {
        Some(path) => parser::parse_stream_model(&path),
        None => Ok(StreamModel::builtin()),
    }
}

pub fn load_engine(
    bank: Option<PathBuf>,
    streams: Option<PathBuf>,
    config: &StreamwiseConfig,
) -> Result<ScoringEngine> {
    let bank = load_bank(bank, config).context("failed to load question bank")?;
    let model = load_stream_model(streams, config).context("failed to load stream model")?;
    Ok(ScoringEngine::new(bank, model))
}

pub fn print_scores(scores: &DomainScores) {
    let mut table = Table::new();
    table.set_header(vec!["Domain", "Score"]);
    for (domain, value) in scores.iter() {
        table.add_row(vec![Cell::new(domain), Cell::new(format!("{value:.0}%"))]);
    }
    table.add_row(vec![
        Cell::new("overall"),
        Cell::new(format!("{:.0}%", scores.total_score)),
    ]);
    println!("{table}");
}

pub fn print_recommendations(recommendations: &[StreamRecommendation]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Stream", "Match", "Why", "Courses"]);
    for (i, rec) in recommendations.iter().enumerate() {
        let courses: Vec<&str> = rec.courses.iter().map(|c| c.name.as_str()).collect();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(rec.stream.display_name()),
            Cell::new(format!("{}%", rec.composite_score)),
            Cell::new(rec.reasons.join("\n")),
            Cell::new(courses.join("\n")),
        ]);
    }
    println!("{table}");
}
