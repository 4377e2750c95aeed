//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PERFECT: &str = "0,0,0,0,0,0,0,0,0,0";
const BLANK: &str = "-,-,-,-,-,-,-,-,-,-";

fn streamwise() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("streamwise").unwrap()
}

/// Run `assess --format json` and write the report to `path`.
fn save_report(answers: &str, path: &Path) {
    let output = streamwise()
        .arg("assess")
        .arg("--answers")
        .arg(answers)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    std::fs::write(path, output.stdout).unwrap();
}

#[test]
fn help_output() {
    streamwise()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Aptitude assessment and academic stream recommendations",
        ));
}

#[test]
fn version_output() {
    streamwise()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("streamwise"));
}

#[test]
fn questions_lists_builtin_bank() {
    streamwise()
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("General Aptitude (10 questions)"));
}

#[test]
fn questions_json_is_parseable() {
    let output = streamwise()
        .arg("questions")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let bank: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bank["id"], "general-aptitude");
    assert_eq!(bank["items"].as_array().unwrap().len(), 10);
}

#[test]
fn assess_perfect_sheet_recommends_science_first() {
    streamwise()
        .arg("assess")
        .arg("--answers")
        .arg(PERFECT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Science"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn assess_json_report() {
    let output = streamwise()
        .arg("assess")
        .arg("--answers")
        .arg(PERFECT)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let recs = report["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["stream"], "science");
    assert_eq!(recs[0]["composite_score"], 100);
    assert_eq!(report["scores"]["totalScore"], 100.0);
}

#[test]
fn assess_blank_sheet_falls_back_to_overall_reason() {
    streamwise()
        .arg("assess")
        .arg("--answers")
        .arg(BLANK)
        .assert()
        .success()
        .stdout(predicate::str::contains("Based on your overall performance"));
}

#[test]
fn assess_rejects_malformed_answers() {
    streamwise()
        .arg("assess")
        .arg("--answers")
        .arg("0,x,1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid answer at position"));
}

#[test]
fn assess_saves_html_report() {
    let dir = TempDir::new().unwrap();

    streamwise()
        .arg("assess")
        .arg("--answers")
        .arg(PERFECT)
        .arg("--save")
        .arg("all")
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("HTML report:"));

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert!(files.iter().any(|p| p.extension().is_some_and(|e| e == "json")));
    let html = files
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "html"))
        .unwrap();
    let content = std::fs::read_to_string(html).unwrap();
    assert!(content.contains("Recommended streams"));
}

#[test]
fn recommend_from_scores_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(
        &path,
        r#"{"science": 100, "mathematics": 100, "commerce": 25, "arts": 0,
            "technical": 0, "creative": 0, "social": 0}"#,
    )
    .unwrap();

    let output = streamwise()
        .arg("recommend")
        .arg("--scores")
        .arg(&path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let recs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(recs[0]["stream"], "science");
    assert_eq!(recs[0]["composite_score"], 67);
    assert_eq!(recs[1]["stream"], "mathematics");
    assert_eq!(recs[1]["composite_score"], 60);
    assert_eq!(recs[2]["stream"], "commerce");
    assert_eq!(recs[2]["composite_score"], 38);
}

#[test]
fn recommend_rejects_incomplete_vector() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, r#"{"science": 80, "mathematics": 70}"#).unwrap();

    streamwise()
        .arg("recommend")
        .arg("--scores")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("incomplete score vector"));
}

#[test]
fn compare_reports_declines() {
    let dir = TempDir::new().unwrap();
    let baseline = dir.path().join("baseline.json");
    let current = dir.path().join("current.json");
    save_report(PERFECT, &baseline);
    save_report(BLANK, &current);

    streamwise()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 declines"));

    streamwise()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-decline")
        .assert()
        .failure();
}

#[test]
fn compare_markdown_output() {
    let dir = TempDir::new().unwrap();
    let baseline = dir.path().join("baseline.json");
    let current = dir.path().join("current.json");
    save_report(BLANK, &baseline);
    save_report(PERFECT, &current);

    streamwise()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--format")
        .arg("markdown")
        .arg("--fail-on-decline")
        .assert()
        .success()
        .stdout(predicate::str::contains("| science | 0.0% | 100.0% | +100.0 |"));
}

#[test]
fn compare_nonexistent_report() {
    streamwise()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn validate_nonexistent_file() {
    streamwise()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_reports_missing_domains() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiny.toml");
    std::fs::write(
        &path,
        r#"
[bank]
id = "tiny"
name = "Tiny"

[[items]]
id = "s1"
domain = "science"
question = "H2O is?"
options = ["Water", "Salt"]
correct_option = 0
"#,
    )
    .unwrap();

    streamwise()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tiny (1 questions)"))
        .stdout(predicate::str::contains("no items for domain arts"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    streamwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created streamwise.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"));

    assert!(dir.path().join("streamwise.toml").exists());
    assert!(dir.path().join("banks/example.toml").exists());
    assert!(dir.path().join("streams/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    streamwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    streamwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_validates_and_assesses() {
    let dir = TempDir::new().unwrap();

    streamwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    streamwise()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks")
        .arg("--streams")
        .arg("streams/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Bank (7 questions)"))
        .stdout(predicate::str::contains("Stream model: 2 streams"))
        .stdout(predicate::str::contains("All catalogs valid."));

    let output = streamwise()
        .current_dir(dir.path())
        .arg("assess")
        .arg("--bank")
        .arg("banks/example.toml")
        .arg("--streams")
        .arg("streams/example.toml")
        .arg("--answers")
        .arg("0,0,0,0,0,0,0")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let recs = report["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["stream"], "science");
    assert_eq!(recs[0]["courses"][0]["name"], "B.Sc Physics");
}

#[test]
fn recommend_ignores_unrelated_fields_in_scores_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(
        &path,
        r#"{"userId": "u1", "completedAt": "2024-06-01T10:00:00Z",
            "science": 100, "mathematics": 100, "commerce": 25, "arts": 0,
            "technical": 0, "creative": 0, "social": 0, "totalScore": 60}"#,
    )
    .unwrap();

    let output = streamwise()
        .arg("recommend")
        .arg("--scores")
        .arg(&path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let recs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(recs[0]["stream"], "science");
    assert_eq!(recs[0]["composite_score"], 67);
}

#[test]
fn assess_rejects_unknown_save_format() {
    let dir = TempDir::new().unwrap();

    streamwise()
        .arg("assess")
        .arg("--answers")
        .arg(PERFECT)
        .arg("--save")
        .arg("pdf")
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown save format: pdf"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn compare_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let baseline = dir.path().join("baseline.json");
    save_report(PERFECT, &baseline);

    streamwise()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&baseline)
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format: yaml"));
}

#[test]
fn validate_rejects_mismatched_weight_sum() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.toml");
    let streams = dir.path().join("streams.toml");
    std::fs::write(
        &bank,
        r#"
[bank]
id = "tiny"
name = "Tiny"

[[items]]
id = "s1"
domain = "science"
question = "H2O is?"
options = ["Water", "Salt"]
correct_option = 0
"#,
    )
    .unwrap();
    std::fs::write(
        &streams,
        r#"
[[streams]]
stream = "science"
weight_sum = 1.0
weights = [
  { domain = "science", weight = 1.0 },
  { domain = "mathematics", weight = 1.0 },
]
"#,
    )
    .unwrap();

    streamwise()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .arg("--streams")
        .arg(&streams)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match the sum of weights"));
}
