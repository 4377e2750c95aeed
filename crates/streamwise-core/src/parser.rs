//! TOML catalog parser.
//!
//! Loads question banks and stream models from TOML files and directories,
//! and validates banks for issues that do not prevent scoring.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CourseRecord, Difficulty, Domain, QuizItem, Stream};
use crate::question_bank::QuestionBank;
use crate::stream_model::{ReasonRule, StreamFormula, StreamModel, StreamProfile, WeightTerm};

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    items: Vec<TomlQuizItem>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuizItem {
    id: String,
    domain: String,
    question: String,
    options: Vec<String>,
    correct_option: usize,
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Intermediate TOML structure for stream model files.
#[derive(Debug, Deserialize)]
struct TomlStreamFile {
    #[serde(default)]
    streams: Vec<TomlStream>,
}

#[derive(Debug, Deserialize)]
struct TomlStream {
    stream: String,
    weights: Vec<TomlWeight>,
    #[serde(default)]
    weight_sum: Option<f64>,
    #[serde(default)]
    reasons: Vec<TomlReason>,
    #[serde(default)]
    courses: Vec<CourseRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlWeight {
    domain: String,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct TomlReason {
    domain: String,
    threshold: f64,
    text: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let items = parsed
        .items
        .into_iter()
        .map(|i| {
            let domain: Domain = i
                .domain
                .parse()
                .with_context(|| format!("item {}", i.id))?;
            let difficulty: Difficulty = i
                .difficulty
                .parse()
                .with_context(|| format!("item {}", i.id))?;
            Ok(QuizItem {
                id: i.id,
                domain,
                question: i.question,
                options: i.options,
                correct_option: i.correct_option,
                difficulty,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let bank = QuestionBank::new(parsed.bank.id, parsed.bank.name, items)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))?;
    Ok(bank)
}

/// Recursively load all `.toml` question bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Parse a single TOML file into a `StreamModel`.
pub fn parse_stream_model(path: &Path) -> Result<StreamModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stream model file: {}", path.display()))?;

    parse_stream_model_str(&content, path)
}

/// Parse a TOML string into a `StreamModel`.
///
/// `weight_sum` defaults to the sum of the declared weights.
pub fn parse_stream_model_str(content: &str, source_path: &Path) -> Result<StreamModel> {
    let parsed: TomlStreamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let profiles = parsed
        .streams
        .into_iter()
        .map(|s| {
            let stream: Stream = s.stream.parse()?;
            let weights = s
                .weights
                .into_iter()
                .map(|w| {
                    Ok(WeightTerm {
                        domain: w.domain.parse()?,
                        weight: w.weight,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("stream {stream}"))?;
            let weight_sum = s
                .weight_sum
                .unwrap_or_else(|| weights.iter().map(|w| w.weight).sum());
            let reasons = s
                .reasons
                .into_iter()
                .map(|r| {
                    Ok(ReasonRule {
                        domain: r.domain.parse()?,
                        threshold: r.threshold,
                        text: r.text,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("stream {stream}"))?;

            Ok(StreamProfile {
                formula: StreamFormula {
                    stream,
                    weights,
                    weight_sum,
                },
                reasons,
                courses: s.courses,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let model = StreamModel::new(profiles)
        .with_context(|| format!("invalid stream model: {}", source_path.display()))?;
    Ok(model)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for issues that still allow scoring.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for item in bank.items() {
        if !seen_ids.insert(&item.id) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: format!("duplicate item ID: {}", item.id),
            });
        }
    }

    for item in bank.items() {
        if item.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "question text is empty".into(),
            });
        }

        let mut seen_options = HashSet::new();
        if item
            .options
            .iter()
            .any(|o| !seen_options.insert(o.trim().to_lowercase()))
        {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "options contain duplicates".into(),
            });
        }
    }

    if !bank.is_empty() {
        for (domain, count) in bank.domain_counts() {
            if count == 0 {
                warnings.push(ValidationWarning {
                    item_id: None,
                    message: format!("no items for domain {domain}; its score will always be 0"),
                });
            }
        }
    } else {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "bank has no items; every score will be 0".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_BANK: &str = r#"
[bank]
id = "mini"
name = "Mini Bank"

[[items]]
id = "s1"
domain = "science"
question = "Which gas do plants absorb?"
options = ["Carbon dioxide", "Oxygen", "Nitrogen"]
correct_option = 0
difficulty = "easy"

[[items]]
id = "a1"
domain = "arts"
question = "Who wrote Hamlet?"
options = ["Marlowe", "Shakespeare"]
correct_option = 1
"#;

    const VALID_STREAMS: &str = r#"
[[streams]]
stream = "arts"
weights = [
    { domain = "arts", weight = 2.0 },
    { domain = "creative", weight = 1.0 },
]

[[streams.reasons]]
domain = "arts"
threshold = 75
text = "Strong artistic sense"

[[streams.courses]]
name = "BFA"
description = "Fine arts"
duration = "4 years"
eligibility = "12th in any stream"
career_paths = ["Illustrator", "Animator"]
average_salary = "₹3-7 LPA"

[[streams]]
stream = "Science"
weights = [{ domain = "science", weight = 1.0 }]
weight_sum = 1.0
"#;

    #[test]
    fn parse_valid_bank() {
        let bank = parse_question_bank_str(VALID_BANK, &PathBuf::from("bank.toml")).unwrap();
        assert_eq!(bank.id, "mini");
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.items()[1].correct_option, 1);
        assert_eq!(bank.items()[1].difficulty, Difficulty::Medium);
    }

    #[test]
    fn parse_rejects_unknown_domain() {
        let toml = VALID_BANK.replace("\"arts\"", "\"music\"");
        let err = parse_question_bank_str(&toml, &PathBuf::from("bank.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown domain: music"), "got: {err:#}");
    }

    #[test]
    fn parse_rejects_out_of_range_answer() {
        let toml = VALID_BANK.replace("correct_option = 1", "correct_option = 5");
        let err = parse_question_bank_str(&toml, &PathBuf::from("bank.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("invalid quiz item a1"), "got: {err:#}");
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_question_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_stream_model_defaults_weight_sum() {
        let model =
            parse_stream_model_str(VALID_STREAMS, &PathBuf::from("streams.toml")).unwrap();
        let arts = model.formula(Stream::Arts).unwrap();
        assert_eq!(arts.weight_sum, 3.0);
        assert_eq!(model.courses(Stream::Arts).unwrap()[0].career_paths.len(), 2);
        assert_eq!(model.reason_rules(Stream::Arts).unwrap()[0].threshold, 75.0);
        assert!(model.formula(Stream::Commerce).is_err());
    }

    #[test]
    fn parse_stream_model_rejects_unknown_stream() {
        let toml = VALID_STREAMS.replace("stream = \"arts\"", "stream = \"law\"");
        let err = parse_stream_model_str(&toml, &PathBuf::from("streams.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown stream: law"), "got: {err:#}");
    }

    #[test]
    fn parse_stream_model_rejects_negative_weight() {
        let toml = VALID_STREAMS.replace("weight = 1.0 },\n]", "weight = -1.0 },\n]");
        let err = parse_stream_model_str(&toml, &PathBuf::from("streams.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("non-negative"), "got: {err:#}");
    }

    #[test]
    fn parse_stream_model_rejects_mismatched_weight_sum() {
        let toml = r#"
[[streams]]
stream = "science"
weight_sum = 1.0
weights = [
    { domain = "science", weight = 1.0 },
    { domain = "mathematics", weight = 1.0 },
]
"#;
        let err = parse_stream_model_str(toml, &PathBuf::from("streams.toml")).unwrap_err();
        assert!(
            format!("{err:#}").contains("weight_sum 1 does not match the sum of weights 2"),
            "got: {err:#}"
        );
    }

    #[test]
    fn parse_stream_model_accepts_matching_weight_sum() {
        let toml = r#"
[[streams]]
stream = "science"
weight_sum = 2.0
weights = [
    { domain = "science", weight = 1.0 },
    { domain = "mathematics", weight = 1.0 },
]
"#;
        let model = parse_stream_model_str(toml, &PathBuf::from("streams.toml")).unwrap();
        let composites = crate::recommender::Recommender::new(&model)
            .composites(&crate::model::DomainScores::uniform(100.0));
        assert_eq!(composites, vec![(Stream::Science, 100.0)]);
    }

    #[test]
    fn validate_reports_missing_domains_and_duplicates() {
        let toml = VALID_BANK.replace("id = \"a1\"", "id = \"s1\"");
        let bank = parse_question_bank_str(&toml, &PathBuf::from("bank.toml")).unwrap();
        let warnings = validate_question_bank(&bank);

        assert!(warnings.iter().any(|w| w.message.contains("duplicate item ID")));
        // Only science and arts are covered.
        let missing = warnings
            .iter()
            .filter(|w| w.message.starts_with("no items for domain"))
            .count();
        assert_eq!(missing, 5);
    }

    #[test]
    fn validate_builtin_bank_is_clean() {
        assert!(validate_question_bank(&QuestionBank::builtin()).is_empty());
    }

    #[test]
    fn validate_flags_duplicate_options() {
        let toml = VALID_BANK.replace("[\"Marlowe\", \"Shakespeare\"]", "[\"Marlowe\", \"marlowe \"]");
        let bank = parse_question_bank_str(&toml, &PathBuf::from("bank.toml")).unwrap();
        let warnings = validate_question_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.item_id.as_deref() == Some("a1") && w.message.contains("duplicates")));
    }

    #[test]
    fn load_directory_skips_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mini.toml"), VALID_BANK).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "mini");
    }
}
