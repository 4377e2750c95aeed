//! streamwise-core: Aptitude scoring and stream recommendation engine.
//!
//! This crate defines the quiz and stream data model, the built-in
//! catalogs, and the pure scoring and ranking logic that the rest of
//! streamwise builds on.

pub mod assembler;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod question_bank;
pub mod recommender;
pub mod report;
pub mod scorer;
pub mod stream_model;

pub use engine::ScoringEngine;
pub use error::EngineError;
