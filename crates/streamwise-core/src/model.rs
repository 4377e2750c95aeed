//! Core data model types for streamwise.
//!
//! These are the types shared by the scorer, the recommender and the
//! report layer: quiz items, answer sheets, domain score vectors, course
//! records and the final stream recommendations.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the seven aptitude categories every quiz item is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Science,
    Mathematics,
    Commerce,
    Arts,
    Technical,
    Creative,
    Social,
}

impl Domain {
    /// All domains, in declaration order.
    pub const ALL: [Domain; 7] = [
        Domain::Science,
        Domain::Mathematics,
        Domain::Commerce,
        Domain::Arts,
        Domain::Technical,
        Domain::Creative,
        Domain::Social,
    ];

    /// Lowercase key used in catalogs and serialized score vectors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Science => "science",
            Domain::Mathematics => "mathematics",
            Domain::Commerce => "commerce",
            Domain::Arts => "arts",
            Domain::Technical => "technical",
            Domain::Creative => "creative",
            Domain::Social => "social",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| EngineError::UnknownDomain(s.to_string()))
    }
}

/// Item difficulty. Informational only; scoring weights every item equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// One of the four academic streams the recommender ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Science,
    Mathematics,
    Commerce,
    Arts,
}

impl Stream {
    /// All streams, in declaration order. Ties in ranking keep this order.
    pub const ALL: [Stream; 4] = [
        Stream::Science,
        Stream::Mathematics,
        Stream::Commerce,
        Stream::Arts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Science => "science",
            Stream::Mathematics => "mathematics",
            Stream::Commerce => "commerce",
            Stream::Arts => "arts",
        }
    }

    /// Capitalised label for display ("Science", "Arts", ...).
    pub fn display_name(&self) -> &'static str {
        match self {
            Stream::Science => "Science",
            Stream::Mathematics => "Mathematics",
            Stream::Commerce => "Commerce",
            Stream::Arts => "Arts",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stream {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Stream::ALL
            .into_iter()
            .find(|st| st.as_str() == key)
            .ok_or_else(|| EngineError::UnknownStream(s.to_string()))
    }
}

/// A single multiple-choice assessment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Unique identifier within the bank.
    pub id: String,
    /// Domain this item measures.
    pub domain: Domain,
    /// Question text shown to the student.
    pub question: String,
    /// Answer options, at least two.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option: usize,
    pub difficulty: Difficulty,
}

impl QuizItem {
    /// Check the structural invariants of an item.
    pub fn check(&self) -> Result<(), EngineError> {
        if self.options.len() < 2 {
            return Err(EngineError::InvalidQuizItem {
                id: self.id.clone(),
                reason: format!("needs at least 2 options, has {}", self.options.len()),
            });
        }
        if self.correct_option >= self.options.len() {
            return Err(EngineError::InvalidQuizItem {
                id: self.id.clone(),
                reason: format!(
                    "correct option {} is out of range for {} options",
                    self.correct_option,
                    self.options.len()
                ),
            });
        }
        Ok(())
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_option
    }
}

/// Answers submitted for a quiz, positionally aligned to the question bank.
///
/// `None` marks an unanswered item. Positions past the end of the sheet are
/// unanswered too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(Vec<Option<usize>>);

impl AnswerSheet {
    pub fn new(answers: Vec<Option<usize>>) -> Self {
        Self(answers)
    }

    /// Build a sheet where every listed position was answered.
    pub fn from_indices(indices: &[usize]) -> Self {
        Self(indices.iter().copied().map(Some).collect())
    }

    /// The answer at `position`, if one was given.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn answered(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }
}

impl From<Vec<usize>> for AnswerSheet {
    fn from(indices: Vec<usize>) -> Self {
        Self::from_indices(&indices)
    }
}

impl fmt::Display for AnswerSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|a| match a {
                Some(i) => i.to_string(),
                None => "-".to_string(),
            })
            .collect();
        f.write_str(&parts.join(","))
    }
}

/// Parses comma-separated option indices; `-` or an empty slot is unanswered.
impl FromStr for AnswerSheet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let answers = s
            .split(',')
            .enumerate()
            .map(|(pos, raw)| match raw.trim() {
                "" | "-" => Ok(None),
                v => v
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|_| format!("invalid answer at position {}: {v:?}", pos + 1)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(answers))
    }
}

/// Per-domain aptitude percentages plus the overall percentage.
///
/// A closed record: every vector carries exactly the seven domains.
/// Deserialization goes through [`DomainScores::from_values`], so a stored
/// vector with a missing domain is rejected with
/// [`EngineError::IncompleteScoreVector`]. Extra fields of any type are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "BTreeMap<String, serde_json::Value>"
)]
pub struct DomainScores {
    pub science: f64,
    pub mathematics: f64,
    pub commerce: f64,
    pub arts: f64,
    pub technical: f64,
    pub creative: f64,
    pub social: f64,
    /// Overall percentage correct across the whole bank.
    pub total_score: f64,
}

pub const TOTAL_SCORE_KEY: &str = "totalScore";

impl DomainScores {
    /// All domains and the total at zero.
    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Every domain and the total set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            science: value,
            mathematics: value,
            commerce: value,
            arts: value,
            technical: value,
            creative: value,
            social: value,
            total_score: value,
        }
    }

    pub fn get(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Science => self.science,
            Domain::Mathematics => self.mathematics,
            Domain::Commerce => self.commerce,
            Domain::Arts => self.arts,
            Domain::Technical => self.technical,
            Domain::Creative => self.creative,
            Domain::Social => self.social,
        }
    }

    fn slot(&mut self, domain: Domain) -> &mut f64 {
        match domain {
            Domain::Science => &mut self.science,
            Domain::Mathematics => &mut self.mathematics,
            Domain::Commerce => &mut self.commerce,
            Domain::Arts => &mut self.arts,
            Domain::Technical => &mut self.technical,
            Domain::Creative => &mut self.creative,
            Domain::Social => &mut self.social,
        }
    }

    /// Return a copy with one domain replaced.
    pub fn with(mut self, domain: Domain, value: f64) -> Self {
        *self.slot(domain) = value;
        self
    }

    /// Domain scores paired with their domain, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, f64)> + '_ {
        Domain::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Build a score vector from an open `name -> value` map.
    ///
    /// Every domain key is required. `totalScore` is optional and defaults
    /// to 0. Unrecognised keys are ignored.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, EngineError> {
        let missing: Vec<Domain> = Domain::ALL
            .into_iter()
            .filter(|d| !map.contains_key(d.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::IncompleteScoreVector { missing });
        }

        let mut scores = Self::zero();
        for domain in Domain::ALL {
            let value = map.get(domain.as_str()).copied().unwrap_or_default();
            check_percentage(domain.as_str(), value)?;
            *scores.slot(domain) = value;
        }
        if let Some(&total) = map.get(TOTAL_SCORE_KEY) {
            check_percentage(TOTAL_SCORE_KEY, total)?;
            scores.total_score = total;
        }
        Ok(scores)
    }

    /// Like [`from_map`](Self::from_map), for a stored record that may carry
    /// unrelated fields (ids, timestamps, ...). Only the domain keys and
    /// `totalScore` are read; those must be numbers.
    pub fn from_values(map: &BTreeMap<String, serde_json::Value>) -> Result<Self, EngineError> {
        let mut numeric = BTreeMap::new();
        for (key, value) in map {
            let tracked = key == TOTAL_SCORE_KEY || Domain::ALL.iter().any(|d| d.as_str() == key);
            if !tracked {
                continue;
            }
            let number = value
                .as_f64()
                .ok_or_else(|| EngineError::NonNumericScore(key.clone()))?;
            numeric.insert(key.clone(), number);
        }
        Self::from_map(&numeric)
    }
}

fn check_percentage(field: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::ScoreOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

impl TryFrom<BTreeMap<String, f64>> for DomainScores {
    type Error = EngineError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

impl TryFrom<BTreeMap<String, serde_json::Value>> for DomainScores {
    type Error = EngineError;

    fn try_from(map: BTreeMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        Self::from_values(&map)
    }
}

/// A course offered under a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub eligibility: String,
    #[serde(default)]
    pub career_paths: Vec<String>,
    pub average_salary: String,
}

/// A stream selected by the recommender, before courses are attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStream {
    pub stream: Stream,
    /// Rounded composite percentage.
    pub composite_score: u32,
    /// Never empty.
    pub reasons: Vec<String>,
}

/// The engine's output unit: a ranked stream with its justification and
/// course catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecommendation {
    pub stream: Stream,
    pub composite_score: u32,
    pub reasons: Vec<String>,
    pub courses: Vec<CourseRecord>,
}
