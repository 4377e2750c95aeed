//! Joins ranked streams with their course catalogs.

use crate::error::EngineError;
use crate::model::{RankedStream, StreamRecommendation};
use crate::stream_model::StreamModel;

/// Attach the full ordered course list to every ranked stream.
///
/// Courses are not truncated here. Fails with
/// [`EngineError::UnknownStream`] if a ranked stream has no profile in
/// `model`.
pub fn assemble(
    model: &StreamModel,
    ranked: Vec<RankedStream>,
) -> Result<Vec<StreamRecommendation>, EngineError> {
    ranked
        .into_iter()
        .map(|r| {
            let courses = model.courses(r.stream)?.to_vec();
            Ok(StreamRecommendation {
                stream: r.stream,
                composite_score: r.composite_score,
                reasons: r.reasons,
                courses,
            })
        })
        .collect()
}
