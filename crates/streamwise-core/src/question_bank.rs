//! The question bank: a fixed, ordered catalog of quiz items.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::EngineError;
use crate::model::{Difficulty, Domain, QuizItem};

/// An immutable, ordered catalog of assessment items.
///
/// Item order is stable for the lifetime of the value; answer sheets are
/// aligned against it positionally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    items: Vec<QuizItem>,
}

impl QuestionBank {
    /// Build a bank, checking every item's structural invariants.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        items: Vec<QuizItem>,
    ) -> Result<Self, EngineError> {
        for item in &items {
            item.check()?;
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            items,
        })
    }

    /// The built-in ten-item general aptitude bank.
    pub fn builtin() -> Self {
        Self {
            id: "general-aptitude".into(),
            name: "General Aptitude".into(),
            items: builtin_items(),
        }
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items per domain. Every domain is present, possibly at 0.
    pub fn domain_counts(&self) -> BTreeMap<Domain, usize> {
        domain_counts(&self.items)
    }
}

pub(crate) fn domain_counts(items: &[QuizItem]) -> BTreeMap<Domain, usize> {
    let mut counts: BTreeMap<Domain, usize> = Domain::ALL.iter().map(|d| (*d, 0)).collect();
    for item in items {
        *counts.entry(item.domain).or_default() += 1;
    }
    counts
}

fn item(
    id: &str,
    domain: Domain,
    question: &str,
    options: [&str; 4],
    difficulty: Difficulty,
) -> QuizItem {
    QuizItem {
        id: id.to_string(),
        domain,
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option: 0,
        difficulty,
    }
}

fn builtin_items() -> Vec<QuizItem> {
    use Difficulty::{Easy, Medium};
    vec![
        item(
            "1",
            Domain::Science,
            "Which of the following is the chemical formula for water?",
            ["H2O", "CO2", "NaCl", "CH4"],
            Easy,
        ),
        item(
            "2",
            Domain::Mathematics,
            "What is the value of π (pi) approximately?",
            ["3.14", "2.14", "4.14", "1.14"],
            Easy,
        ),
        item(
            "3",
            Domain::Commerce,
            "What does GDP stand for?",
            [
                "Gross Domestic Product",
                "General Development Plan",
                "Global Distribution Process",
                "Government Data Portal",
            ],
            Medium,
        ),
        item(
            "4",
            Domain::Arts,
            "Who painted the Mona Lisa?",
            [
                "Leonardo da Vinci",
                "Pablo Picasso",
                "Vincent van Gogh",
                "Michelangelo",
            ],
            Easy,
        ),
        item(
            "5",
            Domain::Technical,
            "What does CPU stand for in computers?",
            [
                "Central Processing Unit",
                "Computer Personal Unit",
                "Central Program Utility",
                "Computer Processing Unit",
            ],
            Easy,
        ),
        item(
            "6",
            Domain::Creative,
            "Which color is created by mixing red and blue?",
            ["Purple", "Green", "Orange", "Yellow"],
            Easy,
        ),
        item(
            "7",
            Domain::Social,
            "Who was the first Prime Minister of India?",
            [
                "Jawaharlal Nehru",
                "Mahatma Gandhi",
                "Sardar Patel",
                "Dr. Rajendra Prasad",
            ],
            Easy,
        ),
        item(
            "8",
            Domain::Science,
            "What is the speed of light in vacuum?",
            ["3 × 10⁸ m/s", "3 × 10⁶ m/s", "3 × 10¹⁰ m/s", "3 × 10⁴ m/s"],
            Medium,
        ),
        item(
            "9",
            Domain::Mathematics,
            "What is the derivative of x²?",
            ["2x", "x²", "2x²", "x"],
            Medium,
        ),
        item(
            "10",
            Domain::Commerce,
            "What is inflation?",
            [
                "Rise in general price levels",
                "Fall in prices",
                "Stable prices",
                "Fixed prices",
            ],
            Medium,
        ),
    ]
}
