//! HTML results page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use streamwise_core::model::{CourseRecord, DomainScores, StreamRecommendation};
use streamwise_core::report::AssessmentReport;

/// Career paths shown per course card before collapsing into "+N more".
const MAX_CAREER_PATHS: usize = 3;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML results page from an assessment report.
pub fn generate_html(report: &AssessmentReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>streamwise results: {}</title>\n",
        html_escape(&report.bank.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Your assessment results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Bank: <strong>{}</strong> | {} of {} answered | overall {:.0}% | {}</p>\n",
        html_escape(&report.bank.name),
        report.answers.answered(),
        report.bank.item_count,
        report.scores.total_score,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Aptitude breakdown
    html.push_str("<section class=\"breakdown\">\n");
    html.push_str("<h2>Aptitude breakdown</h2>\n");
    html.push_str(&generate_bar_chart(&report.scores));
    html.push_str("</section>\n");

    // Recommendations
    html.push_str("<section class=\"recommendations\">\n");
    html.push_str("<h2>Recommended streams</h2>\n");
    if report.recommendations.is_empty() {
        html.push_str("<p class=\"meta\">No streams to recommend.</p>\n");
    }
    for (rank, rec) in report.recommendations.iter().enumerate() {
        html.push_str(&stream_card(rank + 1, rec));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML results page to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn stream_card(rank: usize, rec: &StreamRecommendation) -> String {
    let mut card = String::new();
    card.push_str("<article class=\"stream\">\n");
    card.push_str(&format!(
        "<h3><span class=\"rank\">#{rank}</span> {} <span class=\"match\">{}% match</span></h3>\n",
        html_escape(rec.stream.display_name()),
        rec.composite_score
    ));

    card.push_str("<ul class=\"reasons\">\n");
    for reason in &rec.reasons {
        card.push_str(&format!("<li>{}</li>\n", html_escape(reason)));
    }
    card.push_str("</ul>\n");

    if !rec.courses.is_empty() {
        card.push_str("<div class=\"courses\">\n");
        for course in &rec.courses {
            card.push_str(&course_card(course));
        }
        card.push_str("</div>\n");
    }

    card.push_str("</article>\n");
    card
}

fn course_card(course: &CourseRecord) -> String {
    let shown: Vec<String> = course
        .career_paths
        .iter()
        .take(MAX_CAREER_PATHS)
        .map(|c| format!("<span class=\"career\">{}</span>", html_escape(c)))
        .collect();
    let hidden = course.career_paths.len().saturating_sub(MAX_CAREER_PATHS);
    let more = if hidden > 0 {
        format!(" <span class=\"more\">+{hidden} more</span>")
    } else {
        String::new()
    };

    format!(
        "<div class=\"course\">\n<h4>{}</h4>\n<p>{}</p>\n<dl><dt>Duration</dt><dd>{}</dd><dt>Average salary</dt><dd>{}</dd><dt>Eligibility</dt><dd>{}</dd></dl>\n<p class=\"careers\">{}{}</p>\n</div>\n",
        html_escape(&course.name),
        html_escape(&course.description),
        html_escape(&course.duration),
        html_escape(&course.average_salary),
        html_escape(&course.eligibility),
        shown.join(" "),
        more
    )
}

fn generate_bar_chart(scores: &DomainScores) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 120;

    let total_height = scores.iter().count() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (domain, score)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (score / 100.0 * max_width as f64) as usize;

        let color = if score >= 70.0 {
            "#22c55e"
        } else if score >= 40.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            domain
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.0}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --accent: #2563eb; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --accent: #60a5fa; --muted: #9ca3af; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
.stream { border: 1px solid var(--border); border-radius: 12px; padding: 1rem 1.5rem; margin: 1.5rem 0; }
.rank { color: var(--accent); }
.match { float: right; color: var(--accent); font-weight: normal; }
.courses { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.course { border: 1px solid var(--border); border-radius: 8px; padding: 0.75rem 1rem; }
.course dl { display: grid; grid-template-columns: auto 1fr; gap: 0.25rem 0.75rem; font-size: 0.9rem; }
.course dt { color: var(--muted); }
.career { display: inline-block; background: var(--border); border-radius: 999px; padding: 0.1rem 0.6rem; font-size: 0.8rem; }
.more { color: var(--muted); font-size: 0.8rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
