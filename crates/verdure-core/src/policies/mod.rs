//! Scoring policy evaluation.
//!
//! Each policy file turns one criterion's configuration plus the prepared
//! text into a `CriterionScore`. Policies evaluate independently: no policy
//! sees another criterion's outcome, and aggregation happens afterwards as a
//! separate fixed step.

mod counted;
mod surface;
mod tiered;
mod weighted;

use crate::lexicon::Lexicon;
use crate::matcher::ProximityPolicy;
use crate::rubric::ScorePolicy;
use crate::types::CriterionScore;

/// Per-assessment inputs shared by every policy: the lexicon, the normalized
/// text for keyword lookups, and the original text for negation and quantity
/// extraction.
pub(crate) struct MatchContext<'a> {
    pub lexicon: &'a Lexicon,
    pub normalized: &'a str,
    pub original: &'a str,
    pub proximity: ProximityPolicy,
}

/// Evaluate one criterion.
pub(crate) fn evaluate(ctx: &MatchContext<'_>, name: &str, policy: &ScorePolicy) -> CriterionScore {
    match policy {
        ScorePolicy::Tiered(p) => tiered::evaluate(ctx, name, p),
        ScorePolicy::Counted(p) => counted::evaluate(ctx, name, p),
        ScorePolicy::WeightedSum(p) => weighted::evaluate(ctx, name, p),
        ScorePolicy::SurfaceBalance(p) => surface::evaluate(ctx, name, p),
    }
}

/// Append the skipped-negated suffix the comments share.
pub(crate) fn append_negated(comment: &mut String, negated: &[String]) {
    if !negated.is_empty() {
        comment.push_str(&format!(" (Skipped negated: {})", negated.join(", ")));
    }
}
