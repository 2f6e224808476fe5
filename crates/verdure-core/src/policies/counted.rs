//! Count-threshold policy.
//!
//! Score is a step function of the number of distinct non-negated matches in
//! a flat keyword list. Adding a previously-absent, non-negated keyword can
//! only raise the count, so the score never decreases as matches accumulate.

use crate::matcher;
use crate::rubric::CountedPolicy;
use crate::types::CriterionScore;

use super::{append_negated, MatchContext};

pub(crate) fn evaluate(
    ctx: &MatchContext<'_>,
    name: &str,
    policy: &CountedPolicy,
) -> CriterionScore {
    let outcome = matcher::find_matches(ctx.lexicon, ctx.normalized, ctx.original, &policy.keywords);
    let count = outcome.count();

    let score = policy
        .thresholds
        .iter()
        .find(|step| count >= step.min)
        .map_or(1, |step| step.score);

    let mut comment = if count > 0 {
        format!("{count} {}: {}", policy.unit, outcome.matched.join(", "))
    } else {
        policy.floor_comment.clone()
    };
    append_negated(&mut comment, &outcome.negated);

    CriterionScore {
        criterion: name.to_string(),
        score,
        comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::matcher::ProximityPolicy;
    use crate::normalizer::Normalizer;
    use crate::rubric::{Rubric, ScorePolicy};

    fn policy_for(criterion: &str) -> CountedPolicy {
        let ScorePolicy::Counted(policy) = Rubric::biodiversity()
            .criteria
            .into_iter()
            .find(|c| c.name == criterion)
            .expect("criterion exists")
            .policy
        else {
            panic!("{criterion} must be counted");
        };
        policy
    }

    fn score(criterion: &str, text: &str) -> CriterionScore {
        let lexicon = Lexicon::builtin();
        let normalized = Normalizer::new(&lexicon).normalize(&lexicon, text);
        let ctx = MatchContext {
            lexicon: &lexicon,
            normalized: &normalized,
            original: text,
            proximity: ProximityPolicy::default(),
        };
        evaluate(&ctx, criterion, &policy_for(criterion))
    }

    #[test]
    fn test_four_layers_score_three() {
        let result = score(
            "vegetation_layers",
            "A grass meadow with a wildflower meadow strip, shrubs along the fence, \
             and a dense tree cluster at the back.",
        );
        assert_eq!(result.score, 3);
        assert!(result.comment.starts_with("4 matches"));
    }

    #[test]
    fn test_two_layers_score_two() {
        let result = score("vegetation_layers", "Some shrubs beside a patch of grass.");
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_no_layers_floor() {
        let result = score("vegetation_layers", "A concrete plaza with benches.");
        assert_eq!(result.score, 1);
        assert_eq!(result.comment, "Limited vegetation layers detected.");
    }

    #[test]
    fn test_monotonicity_adding_a_keyword_never_lowers_the_score() {
        let base = "Some shrubs beside a patch of grass.";
        let extended = format!("{base} A wildflower meadow fills the corner.");
        let before = score("vegetation_layers", base);
        let after = score("vegetation_layers", &extended);
        assert!(after.score >= before.score);
    }

    #[test]
    fn test_hotspot_thresholds() {
        let one = score("biodiversity_hotspots", "A single birdhouse on a pole.");
        assert_eq!(one.score, 2);

        let three = score(
            "biodiversity_hotspots",
            "A birdhouse, an insect hotel, and a rock pile near the hedge.",
        );
        assert_eq!(three.score, 3);
    }

    #[test]
    fn test_negated_hotspots_floor_with_provenance() {
        let result = score(
            "biodiversity_hotspots",
            "There is no birdhouse or insect hotel present.",
        );
        assert_eq!(result.score, 1);
        assert!(result.comment.contains("Skipped negated"));
        assert!(result.comment.contains("birdhouse"));
        assert!(result.comment.contains("insect hotel"));
    }
}
