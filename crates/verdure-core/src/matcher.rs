//! Keyword, proximity, and quantity matching over normalized text.
//!
//! Matching is presence-based: a keyword counts once no matter how often it
//! appears. Frequency only matters to quantity extraction, which the
//! weighted scorers use for multiplicities ("three birdhouses" → 3).
//!
//! Keywords are lemmatized with the same rules as the text before lookup, so
//! configuration lists stay in natural wording ("multiple colors and forms")
//! while matching happens in lemma space.

use regex::Regex;

use crate::lemma;
use crate::lexicon::Lexicon;
use crate::negation;
use crate::types::MatchOutcome;

/// Tokenization knobs for the proximity search. Which variant applies is a
/// property of the rubric, not of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProximityPolicy {
    /// Drop stop-words before counting token distance.
    pub strip_stopwords: bool,

    /// Drop punctuation characters before tokenizing.
    pub strip_punctuation: bool,

    /// Maximum absolute token-index distance for a pair to qualify.
    pub max_distance: usize,
}

impl Default for ProximityPolicy {
    fn default() -> Self {
        Self {
            strip_stopwords: true,
            strip_punctuation: true,
            max_distance: 10,
        }
    }
}

/// Whole-word presence pattern for a keyword, in lemma space.
pub(crate) fn keyword_pattern(lexicon: &Lexicon, keyword: &str) -> Regex {
    let lemmatized = lemma::lemmatize_text(lexicon, keyword);
    // Escaped literals always compile.
    Regex::new(&format!(r"\b{}\b", regex::escape(&lemmatized))).unwrap()
}

/// Presence pattern tolerating a trailing plural "s", for weighted terms
/// whose last word may survive normalization inflected.
pub(crate) fn plural_tolerant_pattern(lexicon: &Lexicon, keyword: &str) -> Regex {
    let lemmatized = lemma::lemmatize_text(lexicon, keyword);
    Regex::new(&format!(r"\b{}s?\b", regex::escape(&lemmatized))).unwrap()
}

/// Match a keyword list against normalized text, sorting each hit into
/// matched or negated.
///
/// Negation runs against the original, non-normalized text: the canonical
/// keyword and every registered surface synonym are checked, because any one
/// of them may be the wording that actually triggered the match.
pub fn find_matches(
    lexicon: &Lexicon,
    normalized: &str,
    original: &str,
    keywords: &[String],
) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for keyword in keywords {
        if !keyword_pattern(lexicon, keyword).is_match(normalized) {
            continue;
        }
        if negation::is_negated_with_synonyms(lexicon, original, keyword) {
            outcome.negated.push(keyword.clone());
        } else {
            outcome.matched.push(keyword.clone());
        }
    }

    outcome
}

/// True if any word of `phrase_a` occurs within `max_distance` tokens of any
/// word of `phrase_b`.
///
/// The relation is symmetric and existential: one qualifying pair suffices.
/// Probe-phrase words pass through the lemmatizer so inflection never defeats
/// a pair; `text` is expected to be normalized already.
pub fn nearby(
    lexicon: &Lexicon,
    text: &str,
    phrase_a: &str,
    phrase_b: &str,
    policy: ProximityPolicy,
) -> bool {
    let tokens = proximity_tokens(lexicon, text, policy);
    let probe_a = probe_tokens(lexicon, phrase_a, policy);
    let probe_b = probe_tokens(lexicon, phrase_b, policy);

    if probe_a.is_empty() || probe_b.is_empty() {
        return false;
    }

    let positions_a: Vec<usize> = positions_of(&tokens, &probe_a);
    let positions_b: Vec<usize> = positions_of(&tokens, &probe_b);

    positions_a.iter().any(|&i| {
        positions_b
            .iter()
            .any(|&j| i.abs_diff(j) <= policy.max_distance)
    })
}

fn proximity_tokens(lexicon: &Lexicon, text: &str, policy: ProximityPolicy) -> Vec<String> {
    let cleaned: String = if policy.strip_punctuation {
        text.chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect()
    } else {
        text.to_string()
    };

    cleaned
        .split_whitespace()
        .filter(|token| !policy.strip_stopwords || !lexicon.is_stopword(token))
        .map(String::from)
        .collect()
}

fn probe_tokens(lexicon: &Lexicon, phrase: &str, policy: ProximityPolicy) -> Vec<String> {
    phrase
        .to_lowercase()
        .split_whitespace()
        .filter(|token| !policy.strip_stopwords || !lexicon.is_stopword(token))
        .map(|token| lemma::lemma(lexicon, token))
        .collect()
}

fn positions_of(tokens: &[String], probe: &[String]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| probe.iter().any(|p| p == *token))
        .map(|(i, _)| i)
        .collect()
}

/// Extract quantity mentions for a keyword: a cardinal (digit or spelled-out
/// "one".."ten"), up to 4 filler words, then the keyword.
///
/// The keyword match is prefix-tolerant (no trailing boundary), so
/// "three educational signs" counts for "educational sign". Runs on raw
/// lower-cased text, where the author's numerals actually live.
pub fn extract_quantities(lexicon: &Lexicon, text: &str, keyword: &str) -> Vec<u32> {
    let pattern = format!(
        r"\b(\d+|{})\b(?:\s+\w+){{0,4}}?\s+{}",
        lexicon.number_word_alternation(),
        regex::escape(keyword)
    );
    // Escaped keyword plus a fixed skeleton always compiles.
    let quantity = Regex::new(&pattern).unwrap();

    let lowered = text.to_lowercase();
    quantity
        .captures_iter(&lowered)
        .filter_map(|caps| {
            let token = caps.get(1)?.as_str();
            token.parse::<u32>().ok().or_else(|| lexicon.number_value(token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::builtin()
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_find_matches_whole_word_only() {
        let outcome = find_matches(
            &lex(),
            "a shrub near the shrubbery",
            "a shrub near the shrubbery",
            &keywords(&["shrub", "tree"]),
        );
        assert_eq!(outcome.matched, vec!["shrub".to_string()]);
        assert!(outcome.negated.is_empty());
    }

    #[test]
    fn test_find_matches_keyword_lemmatized_before_lookup() {
        // Config keyword in natural plural wording; text is lemma space.
        let outcome = find_matches(
            &lex(),
            "multiple color and form in the planting",
            "multiple colors and forms in the planting",
            &keywords(&["multiple colors and forms"]),
        );
        assert_eq!(outcome.count(), 1);
    }

    #[test]
    fn test_find_matches_sorts_negated_terms() {
        let original = "There is no birdhouse in the garden. A bench sits by the path.";
        let normalized = "there is no birdhouse in the garden. a bench sit by the path.";
        let outcome = find_matches(&lex(), normalized, original, &keywords(&["birdhouse", "bench"]));
        assert_eq!(outcome.matched, vec!["bench".to_string()]);
        assert_eq!(outcome.negated, vec!["birdhouse".to_string()]);
    }

    #[test]
    fn test_matched_and_negated_disjoint() {
        let original = "No birdhouse here. A birdhouse would help.";
        let outcome = find_matches(&lex(), "no birdhouse here. a birdhouse would help.", original, &keywords(&["birdhouse"]));
        // One sentence negates it; the keyword lands in exactly one set.
        assert_eq!(outcome.matched.len() + outcome.negated.len(), 1);
    }

    #[test]
    fn test_nearby_within_distance() {
        let lexicon = lex();
        let policy = ProximityPolicy::default();
        assert!(nearby(
            &lexicon,
            "species variety across the garden feels quite diverse",
            "species",
            "diverse",
            policy,
        ));
    }

    #[test]
    fn test_nearby_beyond_distance() {
        let lexicon = lex();
        let policy = ProximityPolicy {
            strip_stopwords: false,
            strip_punctuation: true,
            max_distance: 2,
        };
        assert!(!nearby(
            &lexicon,
            "species one two three four five six diverse",
            "species",
            "diverse",
            policy,
        ));
    }

    #[test]
    fn test_nearby_is_symmetric() {
        let lexicon = lex();
        let policy = ProximityPolicy::default();
        let text = "vegetation cover is mostly dense toward the back";
        assert_eq!(
            nearby(&lexicon, text, "vegetation", "dense", policy),
            nearby(&lexicon, text, "dense", "vegetation", policy),
        );
    }

    #[test]
    fn test_nearby_probe_tokens_lemmatized() {
        let lexicon = lex();
        let policy = ProximityPolicy {
            strip_stopwords: false,
            strip_punctuation: false,
            max_distance: 6,
        };
        // Text is lemma space ("chip"); the probe says "chips".
        assert!(nearby(&lexicon, "wood chip along the trail", "wood", "chips", policy));
    }

    #[test]
    fn test_extract_quantities_digits_and_words() {
        let lexicon = lex();
        assert_eq!(
            extract_quantities(&lexicon, "Three birdhouses and 2 benches", "birdhouse"),
            vec![3]
        );
        assert_eq!(
            extract_quantities(&lexicon, "we counted 12 rocks in a pile", "rocks"),
            vec![12]
        );
    }

    #[test]
    fn test_extract_quantities_filler_words() {
        let lexicon = lex();
        // Up to four filler words between the cardinal and the keyword.
        assert_eq!(
            extract_quantities(&lexicon, "two freshly painted wooden birdhouses", "birdhouse"),
            vec![2]
        );
        assert!(extract_quantities(
            &lexicon,
            "two big red shiny brand new expensive birdhouses",
            "birdhouse"
        )
        .is_empty());
    }

    #[test]
    fn test_extract_quantities_prefix_tolerant() {
        let lexicon = lex();
        assert_eq!(
            extract_quantities(&lexicon, "three educational signs by the gate", "educational sign"),
            vec![3]
        );
    }
}
