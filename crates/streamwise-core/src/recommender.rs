//! Stream ranking.
//!
//! Computes a composite score per stream from a [`DomainScores`] vector,
//! ranks the candidates, keeps the best [`MAX_RECOMMENDATIONS`] and attaches
//! the threshold-based justifications.

use crate::error::EngineError;
use crate::model::{DomainScores, RankedStream, Stream};
use crate::stream_model::{StreamModel, StreamProfile, FALLBACK_REASON};

/// Upper bound on the number of streams returned.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Ranks streams against a borrowed, immutable stream model.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    model: &'a StreamModel,
}

/// A candidate with its rounded composite, used only while sorting.
struct Candidate<'a> {
    profile: &'a StreamProfile,
    composite: u32,
}

impl<'a> Recommender<'a> {
    pub fn new(model: &'a StreamModel) -> Self {
        Self { model }
    }

    /// Unrounded composite score for every stream, in model order.
    pub fn composites(&self, scores: &DomainScores) -> Vec<(Stream, f64)> {
        self.model
            .profiles()
            .iter()
            .map(|p| (p.stream(), p.formula.evaluate(scores)))
            .collect()
    }

    /// Rank streams for `scores`, best first.
    ///
    /// Composites are rounded to the nearest integer first, then sorted
    /// descending. The sort is stable, so streams reporting the same
    /// composite keep the model's declaration order.
    pub fn rank(&self, scores: &DomainScores) -> Result<Vec<RankedStream>, EngineError> {
        check_scores(scores)?;

        let mut candidates: Vec<Candidate<'_>> = self
            .model
            .profiles()
            .iter()
            .map(|profile| Candidate {
                profile,
                composite: round_percent(profile.formula.evaluate(scores)),
            })
            .collect();

        candidates.sort_by(|a, b| b.composite.cmp(&a.composite));

        let ranked: Vec<RankedStream> = candidates
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|c| RankedStream {
                stream: c.profile.stream(),
                composite_score: c.composite,
                reasons: reasons_for(c.profile, scores),
            })
            .collect();

        tracing::debug!(
            top = ?ranked.first().map(|r| r.stream),
            count = ranked.len(),
            "ranked streams"
        );

        Ok(ranked)
    }
}

/// Fixed-text justifications whose thresholds `scores` meets, in rule order.
/// Falls back to [`FALLBACK_REASON`] so the list is never empty.
pub fn reasons_for(profile: &StreamProfile, scores: &DomainScores) -> Vec<String> {
    let reasons: Vec<String> = profile
        .reasons
        .iter()
        .filter(|rule| rule.applies(scores))
        .map(|rule| rule.text.clone())
        .collect();

    if reasons.is_empty() {
        vec![FALLBACK_REASON.to_string()]
    } else {
        reasons
    }
}

fn round_percent(value: f64) -> u32 {
    value.round() as u32
}

/// Domain values must be finite percentages; NaN would make ranking
/// order-dependent.
fn check_scores(scores: &DomainScores) -> Result<(), EngineError> {
    for (domain, value) in scores.iter() {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(EngineError::ScoreOutOfRange {
                field: domain.to_string(),
                value,
            });
        }
    }
    Ok(())
}
