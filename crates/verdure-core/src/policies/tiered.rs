//! Tier-matching policy.
//!
//! Tiers are evaluated top-down. A tier is satisfied by at least one
//! non-negated exact match, or (only when no exact match exists) by one of
//! its proximity pairs co-occurring within the rubric's token window. The
//! first satisfied tier assigns its score; otherwise the criterion floors to
//! score 1.

use crate::matcher;
use crate::rubric::TieredPolicy;
use crate::types::CriterionScore;

use super::{append_negated, MatchContext};

pub(crate) fn evaluate(ctx: &MatchContext<'_>, name: &str, policy: &TieredPolicy) -> CriterionScore {
    for tier in &policy.tiers {
        let outcome =
            matcher::find_matches(ctx.lexicon, ctx.normalized, ctx.original, &tier.keywords);
        let mut accepted = outcome.matched.clone();

        if accepted.is_empty() {
            for (a, b) in &tier.proximity_pairs {
                if matcher::nearby(ctx.lexicon, ctx.normalized, a, b, ctx.proximity) {
                    accepted.push(format!("{a} + {b} (proximity match)"));
                    break;
                }
            }
        }

        if !accepted.is_empty() {
            let mut comment = format!("{}: {}", tier.comment_prefix, accepted.join(", "));
            append_negated(&mut comment, &outcome.negated);
            return CriterionScore {
                criterion: name.to_string(),
                score: tier.score,
                comment,
            };
        }
    }

    CriterionScore {
        criterion: name.to_string(),
        score: 1,
        comment: policy.floor_comment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::matcher::ProximityPolicy;
    use crate::normalizer::Normalizer;
    use crate::rubric::{Rubric, ScorePolicy};

    fn species_policy() -> TieredPolicy {
        let ScorePolicy::Tiered(policy) = Rubric::biodiversity()
            .criteria
            .into_iter()
            .find(|c| c.name == "species_variety")
            .expect("criterion exists")
            .policy
        else {
            panic!("species variety must be tiered");
        };
        policy
    }

    fn score(text: &str) -> CriterionScore {
        let lexicon = Lexicon::builtin();
        let normalized = Normalizer::new(&lexicon).normalize(&lexicon, text);
        let ctx = MatchContext {
            lexicon: &lexicon,
            normalized: &normalized,
            original: text,
            proximity: ProximityPolicy::default(),
        };
        evaluate(&ctx, "species_variety", &species_policy())
    }

    #[test]
    fn test_exact_high_tier_match() {
        let result = score("The planting shows a diverse species variety throughout.");
        assert_eq!(result.score, 3);
        assert!(result.comment.contains("diverse species variety"));
    }

    #[test]
    fn test_high_tier_beats_moderate_tier() {
        let result = score(
            "A balanced variety near the entrance, but overall a vibrant mix of planting.",
        );
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_proximity_fallback_only_when_exact_absent() {
        let result = score("Species variety across the garden feels quite diverse.");
        assert_eq!(result.score, 3);
        assert!(result.comment.contains("(proximity match)"));
    }

    #[test]
    fn test_exact_match_suppresses_proximity_note() {
        let result = score("The planting shows a diverse species variety throughout.");
        assert!(!result.comment.contains("(proximity match)"));
    }

    #[test]
    fn test_moderate_tier() {
        let result = score("There is some plant diversity in the beds.");
        assert_eq!(result.score, 2);
        assert!(result.comment.starts_with("Moderate variety"));
    }

    #[test]
    fn test_floor_when_nothing_matches() {
        let result = score("A paved courtyard with a single bench.");
        assert_eq!(result.score, 1);
        assert_eq!(result.comment, "Limited or sparse species variety.");
    }
}
