//! Assessment engine facade.
//!
//! Owns an immutable question bank and stream model and exposes the two
//! entry points collaborators use: scoring a submitted answer sheet and
//! recommending streams for a score vector. The engine holds no mutable
//! state, so a single instance can be shared across threads by reference
//! or behind an `Arc`.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::assembler::assemble;
use crate::error::EngineError;
use crate::model::{AnswerSheet, DomainScores, StreamRecommendation};
use crate::question_bank::QuestionBank;
use crate::recommender::Recommender;
use crate::report::{AssessmentReport, BankSummary};
use crate::scorer;
use crate::stream_model::StreamModel;

/// Scoring and recommendation over a fixed bank and stream model.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    bank: QuestionBank,
    model: StreamModel,
}

impl ScoringEngine {
    pub fn new(bank: QuestionBank, model: StreamModel) -> Self {
        Self { bank, model }
    }

    /// Engine over the built-in bank and stream model.
    pub fn builtin() -> Self {
        Self::new(QuestionBank::builtin(), StreamModel::builtin())
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn model(&self) -> &StreamModel {
        &self.model
    }

    /// Score `answers` against this engine's bank.
    pub fn score(&self, answers: &AnswerSheet) -> DomainScores {
        scorer::score(answers, self.bank.items())
    }

    /// Rank streams for `scores` and attach their course catalogs.
    pub fn recommend(
        &self,
        scores: &DomainScores,
    ) -> Result<Vec<StreamRecommendation>, EngineError> {
        let ranked = Recommender::new(&self.model).rank(scores)?;
        assemble(&self.model, ranked)
    }

    /// Like [`recommend`](Self::recommend), for a score vector held as an
    /// open map (e.g. read back from storage). Fails with
    /// [`EngineError::IncompleteScoreVector`] if a domain key is missing.
    pub fn recommend_map(
        &self,
        scores: &BTreeMap<String, f64>,
    ) -> Result<Vec<StreamRecommendation>, EngineError> {
        self.recommend(&DomainScores::from_map(scores)?)
    }

    /// Score, recommend and package the outcome as a report.
    pub fn assess(&self, answers: &AnswerSheet) -> Result<AssessmentReport, EngineError> {
        let scores = self.score(answers);
        let recommendations = self.recommend(&scores)?;
        tracing::info!(
            bank = %self.bank.id,
            total = scores.total_score,
            top = ?recommendations.first().map(|r| r.stream),
            "assessment complete"
        );
        Ok(AssessmentReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary::from(&self.bank),
            answers: answers.clone(),
            scores,
            recommendations,
        })
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
