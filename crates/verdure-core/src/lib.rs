//! # verdure-core
//!
//! Deterministic rubric-scoring engine for free-text landscape descriptions.
//!
//! The engine detects normalized keywords, proximity relationships, and
//! negation in a description, scores each rubric criterion on a 1–3 scale
//! with a provenance comment, and aggregates the criterion scores into an
//! overall rating.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same lexicon, rubric, and text always produce the
//!    same scores.
//! 2. **Rule-based**: no model calls; every score traces to keyword tables.
//! 3. **Explained**: every criterion score carries a comment naming the
//!    matches (and skipped negations) that produced it.
//! 4. **Pure**: one assessment reads only immutable tables; concurrent
//!    callers can share one `Assessor`.
//!
//! ## Example
//!
//! ```rust
//! use verdure_core::{Assessor, Rubric};
//!
//! let assessor = Assessor::default();
//! let rubric = Rubric::biodiversity();
//! let result = assessor
//!     .assess(&rubric, "A grass meadow with shrubs, a birdhouse and an insect hotel.")
//!     .expect("built-in rubric has criteria");
//!
//! for score in &result.scores {
//!     println!("{}: {} - {}", score.criterion, score.score, score.comment);
//! }
//! println!("{} - {}", result.overall_score, result.overall_label);
//! ```

pub mod aggregate;
pub mod lemma;
pub mod lexicon;
pub mod matcher;
pub mod negation;
pub mod normalizer;
mod policies;
pub mod rubric;
pub mod types;

// Re-export main types at crate root
pub use lexicon::Lexicon;
pub use matcher::ProximityPolicy;
pub use normalizer::Normalizer;
pub use rubric::{Rubric, RubricError, ScorePolicy};
pub use types::{AssessmentResult, CriterionScore, MatchOutcome, ScoreLabels};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during assessment.
///
/// Scoring itself is total: no matches is the floor score, not a failure.
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("rubric defines no criteria")]
    NoCriteria,
}

/// The scoring engine: an immutable lexicon plus its compiled normalizer.
pub struct Assessor {
    lexicon: Lexicon,
    normalizer: Normalizer,
}

impl Assessor {
    /// Build an assessor over an injected lexicon.
    pub fn new(lexicon: Lexicon) -> Self {
        let normalizer = Normalizer::new(&lexicon);
        Self {
            lexicon,
            normalizer,
        }
    }

    /// The lexicon this assessor matches against.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Assess a description against a rubric, stamped with the current time.
    ///
    /// For reproducible results (golden tests, audits), use
    /// [`Assessor::assess_at`] instead.
    pub fn assess(
        &self,
        rubric: &Rubric,
        description: &str,
    ) -> Result<AssessmentResult, AssessmentError> {
        self.assess_at(rubric, description, Utc::now())
    }

    /// Assess with an explicit timestamp. Fully deterministic: same inputs
    /// always produce the same output.
    pub fn assess_at(
        &self,
        rubric: &Rubric,
        description: &str,
        evaluated_at: DateTime<Utc>,
    ) -> Result<AssessmentResult, AssessmentError> {
        let normalized = self.normalizer.normalize(&self.lexicon, description);

        let ctx = policies::MatchContext {
            lexicon: &self.lexicon,
            normalized: &normalized,
            original: description,
            proximity: rubric.proximity,
        };

        let scores: Vec<CriterionScore> = rubric
            .criteria
            .iter()
            .map(|criterion| policies::evaluate(&ctx, &criterion.name, &criterion.policy))
            .collect();

        let (overall_score, overall_label) = aggregate::aggregate(&scores, &rubric.labels)?;

        Ok(AssessmentResult {
            rubric: rubric.name.clone(),
            scores,
            overall_score,
            overall_label,
            evaluated_at,
        })
    }
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

/// Assess with the built-in lexicon. Convenience wrapper over
/// [`Assessor::assess`].
pub fn assess(rubric: &Rubric, description: &str) -> Result<AssessmentResult, AssessmentError> {
    Assessor::default().assess(rubric, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_assessment() {
        let rubric = Rubric::biodiversity();
        let result = assess(
            &rubric,
            "A grass meadow and wildflower meadow with shrubs; a birdhouse and an insect hotel \
             sit near a rock pile.",
        )
        .expect("assessment succeeds");

        assert_eq!(result.rubric, "biodiversity");
        assert_eq!(result.scores.len(), 4);
        assert!(result.overall_score >= 2);
    }

    #[test]
    fn test_empty_description_floors_every_criterion() {
        // Degenerate but well-defined: rejecting empty input is the caller's
        // job; the engine itself floors everything.
        let result = assess(&Rubric::biodiversity(), "").expect("assessment succeeds");
        for score in &result.scores {
            assert_eq!(score.score, 1);
        }
        assert_eq!(result.overall_score, 1);
        assert_eq!(result.overall_label, "Weak Performance");
    }

    #[test]
    fn test_assess_at_is_deterministic() {
        let rubric = Rubric::stormwater();
        let at = chrono::DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&chrono::Utc);
        let text = "Grass and mulch beds with a dense tree cluster beside a gravel path.";

        let first = Assessor::default()
            .assess_at(&rubric, text, at)
            .expect("assessment succeeds");
        let second = Assessor::default()
            .assess_at(&rubric, text, at)
            .expect("assessment succeeds");

        assert_eq!(first.evaluated_at, second.evaluated_at);
        assert_eq!(first.overall_score, second.overall_score);
        for (a, b) in first.scores.iter().zip(second.scores.iter()) {
            assert_eq!(a.score, b.score);
            assert_eq!(a.comment, b.comment);
        }
    }

    #[test]
    fn test_substitute_lexicon_is_injected_not_ambient() {
        // A lexicon without the "bushes" synonym must not canonicalize it.
        let bare = Lexicon::new(vec![], vec![], std::collections::HashSet::new());
        let assessor = Assessor::new(bare);
        let rubric = Rubric::biodiversity();
        let result = assessor
            .assess(&rubric, "Bushes everywhere.")
            .expect("assessment succeeds");
        let layers = result.score_for("vegetation_layers").expect("criterion");
        assert_eq!(layers.score, 1);

        // The built-in lexicon rewrites "bushes" → "shrub" and scores it.
        let with_builtin = assess(&rubric, "Bushes everywhere.").expect("assessment succeeds");
        let layers = with_builtin
            .score_for("vegetation_layers")
            .expect("criterion");
        assert!(layers.comment.contains("shrub"));
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = assess(&Rubric::maintenance(), "A bench beside a gravel path.")
            .expect("assessment succeeds");
        let json = serde_json::to_string(&result).expect("serializes");
        assert!(json.contains("\"maintenance_effort\""));
        assert!(json.contains("\"overall_label\""));
    }
}
