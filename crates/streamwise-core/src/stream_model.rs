//! Static knowledge base of streams: composite formulas, reason rules and
//! course catalogs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{CourseRecord, Domain, DomainScores, Stream};

/// Reason attached to a stream when none of its rules fire.
pub const FALLBACK_REASON: &str = "Based on your overall performance";

/// Allowed gap between a declared `weight_sum` and the sum of its weights.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One weighted domain in a composite formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTerm {
    pub domain: Domain,
    pub weight: f64,
}

/// A stream's composite score: a linear blend of domain scores divided by
/// a declared weight sum. The weight sum must equal the sum of the weights,
/// so composites of in-range scores stay within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFormula {
    pub stream: Stream,
    /// Terms are summed in this order.
    pub weights: Vec<WeightTerm>,
    pub weight_sum: f64,
}

impl StreamFormula {
    /// Unrounded composite for `scores`.
    pub fn evaluate(&self, scores: &DomainScores) -> f64 {
        let blended = self
            .weights
            .iter()
            .fold(0.0, |acc, term| acc + term.weight * scores.get(term.domain));
        blended / self.weight_sum
    }

    fn check(&self) -> Result<(), EngineError> {
        let invalid = |reason: String| EngineError::InvalidStreamProfile {
            stream: self.stream.to_string(),
            reason,
        };
        if self.weights.is_empty() {
            return Err(invalid("formula has no weights".into()));
        }
        if let Some(term) = self
            .weights
            .iter()
            .find(|t| !t.weight.is_finite() || t.weight < 0.0)
        {
            return Err(invalid(format!(
                "weight for {} must be non-negative, got {}",
                term.domain, term.weight
            )));
        }
        if !self.weight_sum.is_finite() || self.weight_sum <= 0.0 {
            return Err(invalid(format!(
                "weight_sum must be positive, got {}",
                self.weight_sum
            )));
        }
        let total: f64 = self.weights.iter().map(|t| t.weight).sum();
        if (total - self.weight_sum).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(format!(
                "weight_sum {} does not match the sum of weights {total}",
                self.weight_sum
            )));
        }
        Ok(())
    }
}

/// Emits `text` when the score for `domain` reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonRule {
    pub domain: Domain,
    pub threshold: f64,
    pub text: String,
}

impl ReasonRule {
    pub fn applies(&self, scores: &DomainScores) -> bool {
        scores.get(self.domain) >= self.threshold
    }
}

/// Everything the engine knows about one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamProfile {
    pub formula: StreamFormula,
    #[serde(default)]
    pub reasons: Vec<ReasonRule>,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}

impl StreamProfile {
    pub fn stream(&self) -> Stream {
        self.formula.stream
    }
}

/// The immutable stream catalog. Profile order is the tie-break order used
/// when ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamModel {
    profiles: Vec<StreamProfile>,
}

impl StreamModel {
    /// Build a model, rejecting duplicate streams and malformed formulas.
    pub fn new(profiles: Vec<StreamProfile>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.stream()) {
                return Err(EngineError::InvalidStreamProfile {
                    stream: profile.stream().to_string(),
                    reason: "duplicate stream".into(),
                });
            }
            profile.formula.check()?;
        }
        Ok(Self { profiles })
    }

    /// The built-in four-stream model.
    pub fn builtin() -> Self {
        Self {
            profiles: builtin_profiles(),
        }
    }

    pub fn profiles(&self) -> &[StreamProfile] {
        &self.profiles
    }

    pub fn streams(&self) -> impl Iterator<Item = Stream> + '_ {
        self.profiles.iter().map(StreamProfile::stream)
    }

    pub fn profile(&self, stream: Stream) -> Result<&StreamProfile, EngineError> {
        self.profiles
            .iter()
            .find(|p| p.stream() == stream)
            .ok_or_else(|| EngineError::UnknownStream(stream.to_string()))
    }

    /// Look up a profile by name, e.g. from user input.
    pub fn profile_by_name(&self, name: &str) -> Result<&StreamProfile, EngineError> {
        self.profile(name.parse()?)
    }

    pub fn formula(&self, stream: Stream) -> Result<&StreamFormula, EngineError> {
        Ok(&self.profile(stream)?.formula)
    }

    pub fn courses(&self, stream: Stream) -> Result<&[CourseRecord], EngineError> {
        Ok(&self.profile(stream)?.courses)
    }

    pub fn reason_rules(&self, stream: Stream) -> Result<&[ReasonRule], EngineError> {
        Ok(&self.profile(stream)?.reasons)
    }
}

fn term(domain: Domain, weight: f64) -> WeightTerm {
    WeightTerm { domain, weight }
}

fn rule(domain: Domain, threshold: f64, text: &str) -> ReasonRule {
    ReasonRule {
        domain,
        threshold,
        text: text.to_string(),
    }
}

fn course(
    name: &str,
    description: &str,
    duration: &str,
    eligibility: &str,
    career_paths: &[&str],
    average_salary: &str,
) -> CourseRecord {
    CourseRecord {
        name: name.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        eligibility: eligibility.to_string(),
        career_paths: career_paths.iter().map(|c| c.to_string()).collect(),
        average_salary: average_salary.to_string(),
    }
}

fn builtin_profiles() -> Vec<StreamProfile> {
    use Domain::*;

    const PCM: &str = "12th with Physics, Chemistry, Mathematics";
    const ANY: &str = "12th in any stream";

    vec![
        StreamProfile {
            formula: StreamFormula {
                stream: Stream::Science,
                weights: vec![term(Science, 1.0), term(Mathematics, 1.0), term(Technical, 1.0)],
                weight_sum: 3.0,
            },
            reasons: vec![
                rule(Science, 70.0, "Strong science aptitude"),
                rule(Mathematics, 70.0, "Excellent mathematical skills"),
                rule(Technical, 60.0, "Good technical understanding"),
            ],
            courses: vec![
                course(
                    "B.Tech Computer Science",
                    "Software development, algorithms, and system design",
                    "4 years",
                    PCM,
                    &["Software Engineer", "Data Scientist", "System Administrator"],
                    "₹6-15 LPA",
                ),
                course(
                    "MBBS",
                    "Medical degree for becoming a doctor",
                    "5.5 years",
                    "12th with Physics, Chemistry, Biology",
                    &["Doctor", "Surgeon", "Medical Researcher"],
                    "₹8-25 LPA",
                ),
                course(
                    "B.Sc Physics",
                    "Study of matter, energy, and their interactions",
                    "3 years",
                    PCM,
                    &["Research Scientist", "Lab Technician", "Teacher"],
                    "₹4-10 LPA",
                ),
            ],
        },
        StreamProfile {
            formula: StreamFormula {
                stream: Stream::Mathematics,
                weights: vec![term(Mathematics, 1.0), term(Technical, 1.0), term(Science, 0.5)],
                weight_sum: 2.5,
            },
            reasons: vec![
                rule(Mathematics, 80.0, "Outstanding mathematical ability"),
                rule(Technical, 60.0, "Technical problem-solving skills"),
            ],
            courses: vec![
                course(
                    "B.Tech Engineering",
                    "Applied mathematics in engineering fields",
                    "4 years",
                    PCM,
                    &["Engineer", "Data Analyst", "Research Scientist"],
                    "₹5-12 LPA",
                ),
                course(
                    "B.Sc Mathematics",
                    "Pure and applied mathematics",
                    "3 years",
                    "12th with Mathematics",
                    &["Mathematician", "Statistician", "Actuary"],
                    "₹4-8 LPA",
                ),
                course(
                    "BCA",
                    "Computer applications with mathematical foundation",
                    "3 years",
                    "12th with Mathematics",
                    &["Software Developer", "System Analyst", "Web Developer"],
                    "₹3-8 LPA",
                ),
            ],
        },
        StreamProfile {
            formula: StreamFormula {
                stream: Stream::Commerce,
                weights: vec![term(Commerce, 1.0), term(Mathematics, 0.5), term(Social, 0.5)],
                weight_sum: 2.0,
            },
            reasons: vec![
                rule(Commerce, 60.0, "Business and economic understanding"),
                rule(Mathematics, 50.0, "Numerical and analytical skills"),
            ],
            courses: vec![
                course(
                    "B.Com",
                    "Commerce, accounting, and business studies",
                    "3 years",
                    ANY,
                    &["Accountant", "Financial Analyst", "Business Manager"],
                    "₹3-8 LPA",
                ),
                course(
                    "BBA",
                    "Business administration and management",
                    "3 years",
                    ANY,
                    &["Business Analyst", "Marketing Manager", "HR Executive"],
                    "₹4-10 LPA",
                ),
                course(
                    "CA",
                    "Chartered Accountancy professional course",
                    "4-5 years",
                    ANY,
                    &["Chartered Accountant", "Tax Consultant", "Auditor"],
                    "₹8-25 LPA",
                ),
            ],
        },
        StreamProfile {
            formula: StreamFormula {
                stream: Stream::Arts,
                weights: vec![term(Arts, 1.0), term(Social, 1.0), term(Creative, 1.0)],
                weight_sum: 3.0,
            },
            reasons: vec![
                rule(Arts, 60.0, "Creative and artistic abilities"),
                rule(Social, 60.0, "Social awareness and communication"),
            ],
            courses: vec![
                course(
                    "BA English Literature",
                    "Study of literature, language, and communication",
                    "3 years",
                    ANY,
                    &["Writer", "Journalist", "Teacher", "Content Creator"],
                    "₹3-8 LPA",
                ),
                course(
                    "BA Political Science",
                    "Study of government, politics, and public policy",
                    "3 years",
                    ANY,
                    &["Civil Servant", "Political Analyst", "Diplomat"],
                    "₹4-12 LPA",
                ),
                course(
                    "BA Psychology",
                    "Study of human behavior and mental processes",
                    "3 years",
                    ANY,
                    &["Psychologist", "Counselor", "HR Specialist"],
                    "₹3-10 LPA",
                ),
            ],
        },
    ]
}
