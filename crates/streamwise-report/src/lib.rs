//! streamwise-report: Results page generation.
//!
//! Renders an [`AssessmentReport`](streamwise_core::report::AssessmentReport)
//! as a self-contained HTML page.

pub mod html;
