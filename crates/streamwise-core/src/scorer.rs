//! Answer scoring.
//!
//! Converts an answer sheet into per-domain and overall percentages. Each
//! domain is normalised by the number of items the bank actually holds for
//! it, so a bank with an uneven domain distribution still scores every
//! domain on the same 0–100 scale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSheet, Domain, DomainScores, QuizItem};
use crate::question_bank::domain_counts;

/// Raw correct/attempted counts behind a [`DomainScores`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Correct answers per domain. Every domain is present.
    pub correct: BTreeMap<Domain, usize>,
    /// Items per domain in the bank. Every domain is present.
    pub items: BTreeMap<Domain, usize>,
    pub total_correct: usize,
    pub total_items: usize,
}

impl Tally {
    /// Count correct answers against `items`.
    ///
    /// Answers past the end of `items` are ignored; items past the end of
    /// the sheet count as incorrect.
    pub fn count(answers: &AnswerSheet, items: &[QuizItem]) -> Self {
        let mut correct: BTreeMap<Domain, usize> = Domain::ALL.iter().map(|d| (*d, 0)).collect();
        let mut total_correct = 0;

        for (position, item) in items.iter().enumerate() {
            if answers.get(position).is_some_and(|a| item.is_correct(a)) {
                *correct.entry(item.domain).or_default() += 1;
                total_correct += 1;
            }
        }

        Self {
            correct,
            items: domain_counts(items),
            total_correct,
            total_items: items.len(),
        }
    }

    /// Percentage correct in `domain`, 0 when the bank has no items for it.
    pub fn percentage(&self, domain: Domain) -> f64 {
        let attempted = self.items.get(&domain).copied().unwrap_or(0);
        let correct = self.correct.get(&domain).copied().unwrap_or(0);
        ratio_percent(correct, attempted)
    }

    pub fn scores(&self) -> DomainScores {
        let mut scores = DomainScores::zero();
        for domain in Domain::ALL {
            scores = scores.with(domain, self.percentage(domain));
        }
        scores.total_score = ratio_percent(self.total_correct, self.total_items);
        scores
    }
}

fn ratio_percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64) * 100.0
}

/// Score an answer sheet against an ordered list of items.
///
/// An empty item list yields all-zero scores rather than an error.
pub fn score(answers: &AnswerSheet, items: &[QuizItem]) -> DomainScores {
    let tally = Tally::count(answers, items);
    tracing::debug!(
        correct = tally.total_correct,
        items = tally.total_items,
        answered = answers.answered(),
        "scored answer sheet"
    );
    tally.scores()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::question_bank::QuestionBank;

    fn make_item(id: &str, domain: Domain, correct_option: usize) -> QuizItem {
        QuizItem {
            id: id.into(),
            domain,
            question: format!("question {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_option,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn empty_answers_score_zero() {
        let bank = QuestionBank::builtin();
        let scores = score(&AnswerSheet::default(), bank.items());
        assert_eq!(scores, DomainScores::zero());
    }

    #[test]
    fn empty_bank_scores_zero() {
        let scores = score(&AnswerSheet::from_indices(&[0, 0, 0]), &[]);
        assert_eq!(scores, DomainScores::zero());
    }

    #[test]
    fn all_correct_on_builtin_bank() {
        let bank = QuestionBank::builtin();
        let scores = score(&AnswerSheet::from_indices(&[0; 10]), bank.items());
        assert_eq!(scores, DomainScores::uniform(100.0));
    }

    #[test]
    fn partial_credit_in_two_item_domain() {
        let bank = QuestionBank::builtin();
        // Item 8 (science) wrong, everything else right.
        let answers = AnswerSheet::from_indices(&[0, 0, 0, 0, 0, 0, 0, 1, 0, 0]);
        let scores = score(&answers, bank.items());
        assert_eq!(scores.science, 50.0);
        assert_eq!(scores.mathematics, 100.0);
        assert_eq!(scores.total_score, 90.0);
    }

    #[test]
    fn short_sheet_counts_missing_as_incorrect() {
        let bank = QuestionBank::builtin();
        let scores = score(&AnswerSheet::from_indices(&[0, 0, 0]), bank.items());
        assert_eq!(scores.science, 50.0);
        assert_eq!(scores.mathematics, 50.0);
        assert_eq!(scores.commerce, 50.0);
        assert_eq!(scores.arts, 0.0);
        assert_eq!(scores.total_score, 30.0);
    }

    #[test]
    fn long_sheet_ignores_extra_answers() {
        let items = vec![make_item("a", Domain::Arts, 1)];
        let scores = score(&AnswerSheet::from_indices(&[1, 1, 1, 1]), &items);
        assert_eq!(scores.arts, 100.0);
        assert_eq!(scores.total_score, 100.0);
    }

    #[test]
    fn unanswered_slot_never_matches() {
        let items = vec![make_item("a", Domain::Social, 0), make_item("b", Domain::Social, 0)];
        let answers = AnswerSheet::new(vec![None, Some(0)]);
        let scores = score(&answers, &items);
        assert_eq!(scores.social, 50.0);
    }

    #[test]
    fn normalises_by_actual_domain_count() {
        let items = vec![
            make_item("1", Domain::Creative, 0),
            make_item("2", Domain::Creative, 0),
            make_item("3", Domain::Creative, 0),
            make_item("4", Domain::Creative, 0),
        ];
        let scores = score(&AnswerSheet::from_indices(&[0, 0, 0, 2]), &items);
        assert_eq!(scores.creative, 75.0);
        // Domains without items stay at zero.
        assert_eq!(scores.science, 0.0);
    }

    #[test]
    fn tally_exposes_counts() {
        let bank = QuestionBank::builtin();
        let tally = Tally::count(&AnswerSheet::from_indices(&[0, 1, 0]), bank.items());
        assert_eq!(tally.total_correct, 2);
        assert_eq!(tally.total_items, 10);
        assert_eq!(tally.correct[&Domain::Mathematics], 0);
        assert_eq!(tally.items[&Domain::Mathematics], 2);
    }
}
