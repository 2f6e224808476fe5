//! Core types for verdure assessments.
//!
//! These types are the data structures exchanged between the scoring engine
//! and its callers: per-criterion match outcomes, criterion scores, and the
//! assessment result handed back to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of matching one criterion's keywords against a description.
///
/// The two lists are disjoint by construction: a term that the negation
/// detector rejects lands in `negated` and never in `matched`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Canonical terms found and not negated, in keyword-list order.
    pub matched: Vec<String>,

    /// Canonical terms found but negated in the original text.
    pub negated: Vec<String>,
}

impl MatchOutcome {
    /// Number of accepted (non-negated) matches.
    pub fn count(&self) -> usize {
        self.matched.len()
    }

    /// True if no keyword was accepted.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Score for a single rubric criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionScore {
    /// Criterion name (e.g., "vegetation_layers").
    pub criterion: String,

    /// Score in 1..=3.
    pub score: u8,

    /// Human-readable provenance: which terms or matches produced the score.
    /// Never consumed by further computation.
    pub comment: String,
}

/// Result of assessing one description against one rubric.
///
/// Criterion scores keep the rubric's declaration order; the overall score is
/// the round-half-up mean of the criterion scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Name of the rubric that produced this result.
    pub rubric: String,

    /// Per-criterion scores, in rubric order.
    pub scores: Vec<CriterionScore>,

    /// Aggregate score in 1..=3.
    pub overall_score: u8,

    /// Label for the aggregate score (e.g., "Moderate Performance").
    pub overall_label: String,

    /// When the assessment ran. `Assessor::assess_at` accepts an explicit
    /// timestamp for reproducible results.
    pub evaluated_at: DateTime<Utc>,
}

impl AssessmentResult {
    /// Look up a criterion score by name.
    pub fn score_for(&self, criterion: &str) -> Option<&CriterionScore> {
        self.scores.iter().find(|s| s.criterion == criterion)
    }
}

/// Labels for the three score levels, indexed by score.
///
/// Serializes as a three-element array ordered score 1 to score 3. Label text
/// is domain-specific: score 1 is "Weak Performance" for biodiversity but
/// "High Effort" for maintenance, where a large matched weight means more
/// upkeep, not better performance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreLabels([String; 3]);

impl ScoreLabels {
    pub fn new(
        score_1: impl Into<String>,
        score_2: impl Into<String>,
        score_3: impl Into<String>,
    ) -> Self {
        Self([score_1.into(), score_2.into(), score_3.into()])
    }

    /// Label for a score in 1..=3. Out-of-range scores clamp to the ends.
    pub fn get(&self, score: u8) -> &str {
        let idx = usize::from(score.clamp(1, 3)) - 1;
        &self.0[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_labels_lookup() {
        let labels = ScoreLabels::new("Weak", "Moderate", "Strong");
        assert_eq!(labels.get(1), "Weak");
        assert_eq!(labels.get(2), "Moderate");
        assert_eq!(labels.get(3), "Strong");
    }

    #[test]
    fn test_score_labels_clamp_out_of_range() {
        let labels = ScoreLabels::new("Weak", "Moderate", "Strong");
        assert_eq!(labels.get(0), "Weak");
        assert_eq!(labels.get(9), "Strong");
    }

    #[test]
    fn test_match_outcome_count() {
        let outcome = MatchOutcome {
            matched: vec!["shrub".to_string(), "grass meadow".to_string()],
            negated: vec!["birdhouse".to_string()],
        };
        assert_eq!(outcome.count(), 2);
        assert!(!outcome.is_empty());
    }
}
