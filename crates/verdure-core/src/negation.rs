//! Negation detection for matched keywords.
//!
//! Scope is approximated by sentence plus a fixed forward window rather than
//! dependency parsing: a keyword is negated when a negation marker appears in
//! the same sentence and the keyword follows within 20 tokens, or when the
//! sentence reads `<marker> ... such as ... <keyword>` (exclusionary
//! listing). The heuristic is part of the scoring contract; keeping it fixed
//! is what keeps scores reproducible.
//!
//! Negation always runs against the original, non-normalized text, because
//! the author's wording ("no nesting boxes") may be a synonym of the
//! canonical term that matched ("birdhouse"). Callers that matched a
//! canonical term use [`is_negated_with_synonyms`] to cover every surface
//! form.

use regex::Regex;

use crate::lemma;
use crate::lexicon::Lexicon;

/// Decide whether `keyword` is negated anywhere in `text`.
///
/// Tokens on both sides are compared in lemma space, so "lacks" matches its
/// marker entry and "birdhouses" matches the keyword "birdhouse".
pub fn is_negated(lexicon: &Lexicon, text: &str, keyword: &str) -> bool {
    let keyword_lower = keyword.to_lowercase();
    let keyword_tokens: Vec<&str> = keyword_lower.split_whitespace().collect();
    if keyword_tokens.is_empty() {
        return false;
    }
    let keyword_lemmas: Vec<String> = keyword_tokens
        .iter()
        .map(|t| lemma::lemma(lexicon, t))
        .collect();

    let lowered = text.to_lowercase();
    for sentence in lowered.split(['.', '!', '?']) {
        // Cheap raw-token filter before any lemmatization.
        if !keyword_tokens.iter().any(|tok| sentence.contains(tok)) {
            continue;
        }

        let clean = sentence.replace([',', ';'], " ");
        let lemmas: Vec<String> = clean
            .split_whitespace()
            .map(|w| lemma::lemma(lexicon, w))
            .collect();

        for term in lexicon.negation_terms() {
            let term_lemmas: Vec<String> = term
                .split_whitespace()
                .map(|w| lemma::lemma(lexicon, w))
                .collect();

            let Some(pos) = find_subsequence(&lemmas, &term_lemmas) else {
                continue;
            };

            // 20-token window immediately after the marker.
            let start = pos + term_lemmas.len();
            let end = (start + 20).min(lemmas.len());
            if contains_subsequence(&lemmas[start..end], &keyword_lemmas) {
                return true;
            }

            // Exclusionary listing: "no features such as birdhouses".
            if sentence.contains("such as") {
                let pattern = format!(
                    r"{}.*such as.*{}",
                    regex::escape(term),
                    regex::escape(&keyword_lower)
                );
                // Escaped literals always compile.
                if Regex::new(&pattern).unwrap().is_match(sentence) {
                    return true;
                }
            }
        }
    }

    false
}

/// [`is_negated`] over a canonical term and all of its registered surface
/// synonyms: any negated wording suppresses the match.
pub fn is_negated_with_synonyms(lexicon: &Lexicon, text: &str, canonical: &str) -> bool {
    if is_negated(lexicon, text, canonical) {
        return true;
    }
    lexicon
        .surface_forms(canonical)
        .iter()
        .any(|surface| is_negated(lexicon, text, surface))
}

/// First index where `needle` occurs contiguously in `haystack`.
fn find_subsequence(haystack: &[String], needle: &[String]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn contains_subsequence(haystack: &[String], needle: &[String]) -> bool {
    find_subsequence(haystack, needle).is_some()
}
