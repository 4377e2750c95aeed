//! The `streamwise questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::{load_bank, OutputFormat};
use crate::config::load_config_from;

pub fn execute(
    bank_path: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = OutputFormat::resolve(format.as_deref(), &config)?;
    let bank = load_bank(bank_path, &config)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&bank)?);
        }
        OutputFormat::Text => {
            println!("Question bank: {} ({} questions)", bank.name, bank.len());

            let mut table = Table::new();
            table.set_header(vec!["#", "Domain", "Difficulty", "Question", "Options"]);
            for (i, item) in bank.items().iter().enumerate() {
                let options: Vec<String> = item
                    .options
                    .iter()
                    .enumerate()
                    .map(|(n, o)| format!("{n}) {o}"))
                    .collect();
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(item.domain),
                    Cell::new(item.difficulty),
                    Cell::new(&item.question),
                    Cell::new(options.join("\n")),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
