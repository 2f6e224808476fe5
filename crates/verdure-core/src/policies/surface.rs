//! Surface-balance policy.
//!
//! Counts keyword presences across the three permeability categories and
//! compares: more permeable mentions than semi-permeable plus impermeable
//! combined scores 3, an exact tie scores 2, fewer scores 1. Counts are
//! presences, not weights; negated mentions do not count.

use crate::matcher;
use crate::rubric::SurfaceBalancePolicy;
use crate::types::CriterionScore;

use super::MatchContext;

pub(crate) fn evaluate(
    ctx: &MatchContext<'_>,
    name: &str,
    policy: &SurfaceBalancePolicy,
) -> CriterionScore {
    let count = |keywords: &[String]| {
        matcher::find_matches(ctx.lexicon, ctx.normalized, ctx.original, keywords).count()
    };

    let permeable = count(&policy.permeable);
    let semi_permeable = count(&policy.semi_permeable);
    let impermeable = count(&policy.impermeable);
    let comparison = semi_permeable + impermeable;

    let score = if permeable > comparison {
        3
    } else if permeable == comparison {
        2
    } else {
        1
    };

    let comment = format!(
        "Permeable surfaces = {permeable}; Semi-permeable + Impermeable = {comparison} \
         (Semi-permeable: {semi_permeable}, Impermeable: {impermeable})"
    );

    CriterionScore {
        criterion: name.to_string(),
        score,
        comment,
    }
}
