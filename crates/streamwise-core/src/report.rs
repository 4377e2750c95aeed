//! Assessment report types with JSON persistence and retake comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnswerSheet, Domain, DomainScores, Stream, StreamRecommendation};
use crate::question_bank::QuestionBank;

/// A complete assessment outcome for one answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the assessment was scored.
    pub created_at: DateTime<Utc>,
    /// The bank the answers were scored against.
    pub bank: BankSummary,
    /// Answers as submitted.
    pub answers: AnswerSheet,
    pub scores: DomainScores,
    /// Ranked best first.
    pub recommendations: Vec<StreamRecommendation>,
}

/// Summary of a question bank (without the items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

impl From<&QuestionBank> for BankSummary {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            item_count: bank.len(),
        }
    }
}

impl AssessmentReport {
    pub fn top_stream(&self) -> Option<Stream> {
        self.recommendations.first().map(|r| r.stream)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier attempt.
    ///
    /// `threshold` is in percentage points: a domain moves into
    /// improvements or declines only when its delta exceeds it.
    pub fn compare(&self, baseline: &AssessmentReport, threshold: f64) -> ProgressReport {
        let mut improvements = Vec::new();
        let mut declines = Vec::new();
        let mut unchanged = 0usize;

        for domain in Domain::ALL {
            let before = baseline.scores.get(domain);
            let after = self.scores.get(domain);
            let delta = after - before;
            let change = ScoreChange {
                domain,
                baseline: before,
                current: after,
                delta,
            };
            if delta > threshold {
                improvements.push(change);
            } else if delta < -threshold {
                declines.push(change);
            } else {
                unchanged += 1;
            }
        }

        let baseline_top = baseline.top_stream();
        let current_top = self.top_stream();

        ProgressReport {
            improvements,
            declines,
            unchanged,
            total_delta: self.scores.total_score - baseline.scores.total_score,
            baseline_top,
            current_top,
            top_stream_changed: baseline_top != current_top,
        }
    }
}

/// Result of comparing two assessment reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Domains whose score went up by more than the threshold.
    pub improvements: Vec<ScoreChange>,
    /// Domains whose score went down by more than the threshold.
    pub declines: Vec<ScoreChange>,
    /// Domains with no significant change.
    pub unchanged: usize,
    /// Change in overall percentage.
    pub total_delta: f64,
    pub baseline_top: Option<Stream>,
    pub current_top: Option<Stream>,
    pub top_stream_changed: bool,
}

/// Score movement in a single domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreChange {
    pub domain: Domain,
    pub baseline: f64,
    pub current: f64,
    pub delta: f64,
}

fn stream_label(stream: Option<Stream>) -> &'static str {
    stream.map_or("-", |s| s.display_name())
}

impl ProgressReport {
    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }

    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} improvements, {} declines, {} unchanged (overall {:+.1})\n\n",
            self.improvements.len(),
            self.declines.len(),
            self.unchanged,
            self.total_delta
        ));

        if self.top_stream_changed {
            md.push_str(&format!(
                "**Top stream:** {} -> {}\n\n",
                stream_label(self.baseline_top),
                stream_label(self.current_top)
            ));
        } else {
            md.push_str(&format!(
                "**Top stream:** {} (unchanged)\n\n",
                stream_label(self.current_top)
            ));
        }

        for (title, changes) in [
            ("Improvements", &self.improvements),
            ("Declines", &self.declines),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Domain | Baseline | Current | Delta |\n");
            md.push_str("|--------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:+.1} |\n",
                    c.domain, c.baseline, c.current, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }
}
