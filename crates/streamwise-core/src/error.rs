//! Engine error types.
//!
//! Every variant is a contract violation by the caller (a data-shape
//! mismatch between the caller and the catalogs), never a transient
//! failure, so none of them should be retried.

use thiserror::Error;

use crate::model::Domain;

/// Errors raised by the scoring and recommendation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A score vector was built without one or more of the seven domains.
    #[error("incomplete score vector, missing: {}", join_domains(missing))]
    IncompleteScoreVector { missing: Vec<Domain> },

    /// A stream name outside the compiled-in set, or a stream the loaded
    /// stream model has no profile for.
    #[error("unknown stream: {0}")]
    UnknownStream(String),

    /// A domain name outside the fixed seven-domain set.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// A difficulty other than easy, medium or hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// A score outside `[0, 100]`, or not a finite number.
    #[error("score for {field} out of range: {value}")]
    ScoreOutOfRange { field: String, value: f64 },

    /// A score vector entry for a domain that is not a number.
    #[error("score for {0} is not a number")]
    NonNumericScore(String),

    /// A quiz item that breaks a structural invariant.
    #[error("invalid quiz item {id}: {reason}")]
    InvalidQuizItem { id: String, reason: String },

    /// A stream profile that breaks a structural invariant.
    #[error("invalid stream profile {stream}: {reason}")]
    InvalidStreamProfile { stream: String, reason: String },
}

fn join_domains(domains: &[Domain]) -> String {
    domains
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
