// src/scoring.rs

//! Pure scoring and aggregation logic.
//!
//! Everything in this module operates on rows already fetched from the
//! database and performs no I/O, which keeps the grading rules unit-testable
//! without a running Postgres.

use crate::models::{answer::AnswerStatus, question::QuestionCategory, report::CategoryScore};

/// Result of running the keyword auto-scorer over a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScore {
    /// `None` when the question defines no keywords and the answer must
    /// wait for manual grading.
    pub score: Option<i32>,
    pub status: AnswerStatus,
}

/// Scores a free-text answer against a question's keyword list.
///
/// Each list entry counts once in the denominator and once in the numerator
/// if it occurs anywhere in the answer text, case-insensitively. Substring
/// containment is sufficient on purpose: the keywords act as a short answer
/// key, not a tokenized vocabulary. Duplicate entries therefore weigh twice
/// on both sides, and a keyword found several times still counts once.
///
/// The proportional score is rounded half-away-from-zero, so two of three
/// keywords on a 100-point question score 67.
pub fn auto_score(content: &str, keywords: Option<&[String]>, max_score: i32) -> AutoScore {
    let keywords = match keywords {
        Some(list) if !list.is_empty() => list,
        _ => {
            return AutoScore {
                score: None,
                status: AnswerStatus::Pending,
            };
        }
    };

    let haystack = content.to_lowercase();
    let matched = keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .count();

    let raw = matched as f64 / keywords.len() as f64 * max_score as f64;

    AutoScore {
        score: Some(raw.round() as i32),
        status: AnswerStatus::AutoScored,
    }
}

/// A question as seen by the aggregator: its category and weight.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub category: QuestionCategory,
    pub max_score: i32,
}

/// One of a student's answers, joined with its question's category.
#[derive(Debug, Clone, Copy)]
pub struct ScoredAnswer {
    pub category: QuestionCategory,
    pub final_score: Option<i32>,
}

/// Aggregated totals for one student, before the student's identity is
/// attached by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTotals {
    pub total_questions: i64,
    pub answered_questions: i64,
    pub total_score: i32,
    pub max_possible_score: i32,
    pub percentage: f64,
    pub category_scores: Vec<CategoryScore>,
}

/// Computes one student's overall and per-category totals.
///
/// `questions` is the full catalog, not just the questions the student
/// answered; an unscored pending answer still counts as answered with a
/// contribution of zero. Every one of the 7 categories appears in the
/// breakdown even when it has no questions yet.
pub fn summarize(questions: &[CatalogEntry], answers: &[ScoredAnswer]) -> ScoreTotals {
    let max_possible_score: i32 = questions.iter().map(|q| q.max_score).sum();
    let total_score: i32 = answers.iter().filter_map(|a| a.final_score).sum();

    let category_scores = QuestionCategory::ALL
        .iter()
        .map(|&category| {
            let max_score = questions
                .iter()
                .filter(|q| q.category == category)
                .map(|q| q.max_score)
                .sum();
            let score = answers
                .iter()
                .filter(|a| a.category == category)
                .filter_map(|a| a.final_score)
                .sum();
            CategoryScore {
                category,
                score,
                max_score,
                percentage: percentage(score, max_score),
            }
        })
        .collect();

    ScoreTotals {
        total_questions: questions.len() as i64,
        answered_questions: answers.len() as i64,
        total_score,
        max_possible_score,
        percentage: percentage(total_score, max_possible_score),
        category_scores,
    }
}

/// Ratio of `score` to `max_score` as a percentage rounded to 2 decimal
/// places; 0 when there is nothing to score against.
pub fn percentage(score: i32, max_score: i32) -> f64 {
    if max_score > 0 {
        (score as f64 / max_score as f64 * 10000.0).round() / 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn no_keywords_leaves_answer_pending() {
        let result = auto_score("any answer at all", None, 100);
        assert_eq!(result.score, None);
        assert_eq!(result.status, AnswerStatus::Pending);

        let empty = kw(&[]);
        let result = auto_score("any answer at all", Some(&empty), 100);
        assert_eq!(result.score, None);
        assert_eq!(result.status, AnswerStatus::Pending);
    }

    #[test]
    fn partial_keyword_match_is_proportional() {
        // 2 of 3 keywords present -> round(66.67) = 67.
        let keywords = kw(&["network", "analysis", "system"]);
        let result = auto_score(
            "The network requires careful analysis.",
            Some(&keywords),
            100,
        );
        assert_eq!(result.score, Some(67));
        assert_eq!(result.status, AnswerStatus::AutoScored);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let keywords = kw(&["Monte Carlo", "SIMULASI"]);
        let result = auto_score("simulasi monte carlo berulang", Some(&keywords), 10);
        assert_eq!(result.score, Some(10));
    }

    #[test]
    fn keyword_is_matched_by_substring_containment() {
        // "jaring" is contained in "jaringan"; no word boundary required.
        let keywords = kw(&["jaring"]);
        let result = auto_score("analisis jaringan proyek", Some(&keywords), 5);
        assert_eq!(result.score, Some(5));
    }

    #[test]
    fn repeated_occurrences_count_once() {
        let keywords = kw(&["node", "edge"]);
        let result = auto_score("node node node node", Some(&keywords), 100);
        assert_eq!(result.score, Some(50));
    }

    #[test]
    fn duplicate_list_entries_weigh_on_both_sides() {
        // The denominator is the list length, and a duplicate that matches
        // contributes to the numerator once per entry.
        let keywords = kw(&["critical", "critical", "path", "slack"]);
        let result = auto_score("the critical path", Some(&keywords), 100);
        assert_eq!(result.score, Some(75));

        let result = auto_score("only slack here", Some(&keywords), 100);
        assert_eq!(result.score, Some(25));
    }

    #[test]
    fn all_and_none_matched_hit_the_bounds() {
        let keywords = kw(&["a", "b"]);
        assert_eq!(auto_score("a b", Some(&keywords), 30).score, Some(30));
        assert_eq!(auto_score("xyz", Some(&keywords), 30).score, Some(0));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 1 of 2 keywords on a 15-point question: 7.5 rounds up to 8.
        let keywords = kw(&["first", "second"]);
        let result = auto_score("only the first one", Some(&keywords), 15);
        assert_eq!(result.score, Some(8));
    }

    fn catalog(entries: &[(QuestionCategory, i32)]) -> Vec<CatalogEntry> {
        entries
            .iter()
            .map(|&(category, max_score)| CatalogEntry {
                category,
                max_score,
            })
            .collect()
    }

    #[test]
    fn summary_for_empty_catalog_is_all_zero() {
        let totals = summarize(&[], &[]);
        assert_eq!(totals.total_questions, 0);
        assert_eq!(totals.answered_questions, 0);
        assert_eq!(totals.total_score, 0);
        assert_eq!(totals.max_possible_score, 0);
        assert_eq!(totals.percentage, 0.0);
        assert_eq!(totals.category_scores.len(), 7);
        for cat in &totals.category_scores {
            assert_eq!(cat.score, 0);
            assert_eq!(cat.max_score, 0);
            assert_eq!(cat.percentage, 0.0);
        }
    }

    #[test]
    fn summary_counts_answered_and_scored_questions() {
        let questions = catalog(&[
            (QuestionCategory::PemikiranSistem, 10),
            (QuestionCategory::AnalisisJaringan, 15),
        ]);
        let answers = [ScoredAnswer {
            category: QuestionCategory::PemikiranSistem,
            final_score: Some(8),
        }];

        let totals = summarize(&questions, &answers);
        assert_eq!(totals.total_questions, 2);
        assert_eq!(totals.answered_questions, 1);
        assert_eq!(totals.total_score, 8);
        assert_eq!(totals.max_possible_score, 25);
        assert_eq!(totals.percentage, 32.00);
    }

    #[test]
    fn pending_answers_count_as_answered_but_score_zero() {
        let questions = catalog(&[(QuestionCategory::GameTheory2xN, 20)]);
        let answers = [ScoredAnswer {
            category: QuestionCategory::GameTheory2xN,
            final_score: None,
        }];

        let totals = summarize(&questions, &answers);
        assert_eq!(totals.answered_questions, 1);
        assert_eq!(totals.total_score, 0);
        assert_eq!(totals.percentage, 0.0);
    }

    #[test]
    fn every_category_is_present_in_declaration_order() {
        let questions = catalog(&[(QuestionCategory::SimulasiMonteCarlo, 10)]);
        let totals = summarize(&questions, &[]);

        let listed: Vec<QuestionCategory> =
            totals.category_scores.iter().map(|c| c.category).collect();
        assert_eq!(listed, QuestionCategory::ALL.to_vec());
    }

    #[test]
    fn category_totals_sum_to_overall_totals() {
        let questions = catalog(&[
            (QuestionCategory::PemikiranSistem, 10),
            (QuestionCategory::PemikiranSistem, 20),
            (QuestionCategory::GameTheoryMxN, 30),
            (QuestionCategory::SimulasiMonteCarlo, 40),
        ]);
        let answers = [
            ScoredAnswer {
                category: QuestionCategory::PemikiranSistem,
                final_score: Some(9),
            },
            ScoredAnswer {
                category: QuestionCategory::GameTheoryMxN,
                final_score: Some(21),
            },
            ScoredAnswer {
                category: QuestionCategory::SimulasiMonteCarlo,
                final_score: None,
            },
        ];

        let totals = summarize(&questions, &answers);
        let cat_max: i32 = totals.category_scores.iter().map(|c| c.max_score).sum();
        let cat_score: i32 = totals.category_scores.iter().map(|c| c.score).sum();
        assert_eq!(cat_max, totals.max_possible_score);
        assert_eq!(cat_score, totals.total_score);
        assert!(totals.percentage >= 0.0 && totals.percentage <= 100.0);
    }

    #[test]
    fn summarize_is_idempotent() {
        let questions = catalog(&[
            (QuestionCategory::AnalisisJaringan, 25),
            (QuestionCategory::ParameterAnalisisJaringan, 25),
        ]);
        let answers = [ScoredAnswer {
            category: QuestionCategory::AnalisisJaringan,
            final_score: Some(17),
        }];

        assert_eq!(
            summarize(&questions, &answers),
            summarize(&questions, &answers)
        );
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(8, 25), 32.00);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }
}
