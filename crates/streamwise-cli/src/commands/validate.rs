//! The `streamwise validate` command.

use std::path::PathBuf;

use anyhow::Result;

use streamwise_core::parser;

pub fn execute(bank_path: PathBuf, streams_path: Option<PathBuf>) -> Result<()> {
    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_question_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Question bank: {} ({} questions)", bank.name, bank.len());

        let warnings = parser::validate_question_bank(bank);
        for w in &warnings {
            let prefix = w
                .item_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if let Some(path) = streams_path {
        let model = parser::parse_stream_model(&path)?;
        println!("Stream model: {} streams", model.profiles().len());
        for profile in model.profiles() {
            if profile.courses.is_empty() {
                println!("  [{}] WARNING: no courses listed", profile.stream());
                total_warnings += 1;
            }
        }
    }

    if total_warnings == 0 {
        println!("All catalogs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
