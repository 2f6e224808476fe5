//! Aggregation of criterion scores into an overall rating.
//!
//! The rule is fixed: the overall score is the round-half-up mean of the
//! criterion scores, computed in integer arithmetic so no float rounding
//! mode can perturb it. A mean of exactly 1.5 aggregates to 2. The label
//! comes from the rubric's score labels.
//!
//! Aggregating zero criteria is a contract violation by the caller, not a
//! runtime condition: every rubric must produce a score for every criterion.

use crate::types::{CriterionScore, ScoreLabels};
use crate::AssessmentError;

/// Combine criterion scores into `(overall_score, overall_label)`.
pub fn aggregate(
    scores: &[CriterionScore],
    labels: &ScoreLabels,
) -> Result<(u8, String), AssessmentError> {
    if scores.is_empty() {
        return Err(AssessmentError::NoCriteria);
    }

    let sum: u32 = scores.iter().map(|s| u32::from(s.score)).sum();
    let count = scores.len() as u32;

    // round_half_up(sum / count) without touching floats.
    let overall = ((2 * sum + count) / (2 * count)) as u8;

    Ok((overall, labels.get(overall).to_string()))
}
