//! Weighted-sum policy.
//!
//! Every configured term that survives negation contributes
//! `count x weight x density multiplier` to a running total, and the total
//! maps to a score through the rubric's mapping. Count resolution order:
//!
//! 1. quantity phrases on the original text, when enabled ("three
//!    birdhouses" → 3);
//! 2. the term's proximity pairs, as presence (count 1);
//! 3. plural-tolerant whole-word presence in the normalized text (count 1).
//!
//! The mapping owns the score direction. Maintenance maps large totals DOWN
//! to score 1 (more matched weight is more upkeep); stormwater normalizes
//! the total against a diversity threshold. Neither direction is assumed
//! here.

use crate::lemma;
use crate::matcher;
use crate::negation;
use crate::rubric::WeightedSumPolicy;
use crate::types::CriterionScore;

use super::MatchContext;

pub(crate) fn evaluate(
    ctx: &MatchContext<'_>,
    name: &str,
    policy: &WeightedSumPolicy,
) -> CriterionScore {
    let mut total = 0.0_f64;
    let mut parts: Vec<String> = Vec::new();

    for weighted in &policy.weights {
        let term = &weighted.term;

        let mut count: u32 = if policy.use_quantities {
            matcher::extract_quantities(ctx.lexicon, ctx.original, term)
                .iter()
                .sum()
        } else {
            0
        };

        if count == 0 {
            let by_proximity = policy
                .proximity_fallbacks
                .iter()
                .find(|fallback| &fallback.term == term)
                .is_some_and(|fallback| {
                    fallback.pairs.iter().any(|(a, b)| {
                        matcher::nearby(ctx.lexicon, ctx.normalized, a, b, ctx.proximity)
                    })
                });
            if by_proximity {
                count = 1;
            }
        }

        if count == 0
            && matcher::plural_tolerant_pattern(ctx.lexicon, term).is_match(ctx.normalized)
        {
            count = 1;
        }

        if count == 0 {
            continue;
        }
        if negation::is_negated_with_synonyms(ctx.lexicon, ctx.original, term) {
            continue;
        }

        let multiplier = if policy.density_adjusted {
            density_multiplier(ctx, term)
        } else {
            1.0
        };
        let contribution = f64::from(count) * weighted.weight * multiplier;
        total += contribution;

        if policy.density_adjusted {
            parts.push(format!(
                "{term} (base {} x density {multiplier} = {contribution})",
                weighted.weight
            ));
        } else {
            parts.push(format!("{term} (x{count}, weight {contribution})"));
        }
    }

    let score = policy.mapping.score_for(total);
    let comment = if parts.is_empty() {
        policy.empty_comment.clone()
    } else {
        format!("{} (total weight {total})", parts.join(", "))
    };

    CriterionScore {
        criterion: name.to_string(),
        score,
        comment,
    }
}

/// Strongest density multiplier near any occurrence of the term's first
/// word; 1.0 when no occurrence sits near a density adjective.
fn density_multiplier(ctx: &MatchContext<'_>, term: &str) -> f64 {
    let Some(first_word) = term.split_whitespace().next() else {
        return 1.0;
    };
    let first = lemma::lemma(ctx.lexicon, &first_word.to_lowercase());
    let tokens: Vec<&str> = ctx.normalized.split_whitespace().collect();

    let mut best: Option<f64> = None;
    for (i, token) in tokens.iter().enumerate() {
        if *token != first {
            continue;
        }
        let start = i.saturating_sub(6);
        let end = (i + 7).min(tokens.len());
        let window = &tokens[start..end];

        let multiplier = ctx
            .lexicon
            .density_adjectives()
            .find(|adj| window.contains(adj))
            .and_then(|adj| ctx.lexicon.density_multiplier(adj))
            .unwrap_or(1.0);
        best = Some(best.map_or(multiplier, |b: f64| b.max(multiplier)));
    }

    best.unwrap_or(1.0)
}
