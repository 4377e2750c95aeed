//! The `streamwise init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("streamwise.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("banks")?;
    write_if_missing(Path::new("banks/example.toml"), EXAMPLE_BANK)?;

    std::fs::create_dir_all("streams")?;
    write_if_missing(Path::new("streams/example.toml"), EXAMPLE_STREAMS)?;

    println!("\nNext steps:");
    println!("  1. Run: streamwise validate --bank banks/example.toml --streams streams/example.toml");
    println!("  2. Run: streamwise questions --bank banks/example.toml");
    println!("  3. Run: streamwise assess --bank banks/example.toml --answers 0,0,0,0,0,0,0");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# streamwise configuration

# Leave unset to use the built-in catalogs.
# question_bank = "banks/example.toml"
# stream_model = "streams/example.toml"

output_dir = "./streamwise-results"
format = "text"
change_threshold = 5.0
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"

[[items]]
id = "sci-1"
domain = "science"
question = "Which gas do plants absorb during photosynthesis?"
options = ["Carbon dioxide", "Oxygen", "Nitrogen", "Hydrogen"]
correct_option = 0
difficulty = "easy"

[[items]]
id = "math-1"
domain = "mathematics"
question = "What is 15% of 200?"
options = ["30", "20", "15", "25"]
correct_option = 0
difficulty = "easy"

[[items]]
id = "com-1"
domain = "commerce"
question = "What does GST stand for?"
options = ["Goods and Services Tax", "General Sales Tax", "Government Service Tax", "Gross State Tax"]
correct_option = 0

[[items]]
id = "arts-1"
domain = "arts"
question = "Who painted the Mona Lisa?"
options = ["Leonardo da Vinci", "Michelangelo", "Raphael", "Donatello"]
correct_option = 0
difficulty = "easy"

[[items]]
id = "tech-1"
domain = "technical"
question = "Which of these is an output device?"
options = ["Monitor", "Keyboard", "Mouse", "Scanner"]
correct_option = 0
difficulty = "easy"

[[items]]
id = "cre-1"
domain = "creative"
question = "Which colours are primary in the RGB model?"
options = ["Red, green, blue", "Red, yellow, blue", "Cyan, magenta, yellow", "Red, white, black"]
correct_option = 0

[[items]]
id = "soc-1"
domain = "social"
question = "A classmate is upset before an exam. What do you do first?"
options = ["Listen to what is worrying them", "Tell them to relax", "Ignore it", "Report it to a teacher"]
correct_option = 0
difficulty = "hard"
"#;

const EXAMPLE_STREAMS: &str = r#"[[streams]]
stream = "science"
weights = [
  { domain = "science", weight = 1.0 },
  { domain = "mathematics", weight = 1.0 },
  { domain = "technical", weight = 1.0 },
]
reasons = [
  { domain = "science", threshold = 70, text = "Strong aptitude in science subjects" },
]

[[streams.courses]]
name = "B.Sc Physics"
description = "Study of matter, energy and the laws of nature"
duration = "3 years"
eligibility = "12th with Physics and Mathematics"
career_paths = ["Research Scientist", "Lab Technician", "Teacher"]
average_salary = "4-8 LPA"

[[streams]]
stream = "arts"
weights = [
  { domain = "arts", weight = 1.0 },
  { domain = "social", weight = 1.0 },
  { domain = "creative", weight = 1.0 },
]
reasons = [
  { domain = "creative", threshold = 70, text = "Creative and artistic abilities" },
]

[[streams.courses]]
name = "BA English Literature"
description = "Study of literature, language and writing"
duration = "3 years"
eligibility = "12th in any stream"
career_paths = ["Writer", "Editor", "Teacher"]
average_salary = "3-6 LPA"
"#;
