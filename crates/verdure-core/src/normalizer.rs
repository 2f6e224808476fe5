//! Text normalization: canonicalization and lemmatization.
//!
//! `Normalizer::normalize` turns raw description text into the canonical,
//! lemmatized form every downstream lookup runs against. Steps, in order:
//!
//! 1. lower-case the whole text;
//! 2. phrase-level rewrites ("the species variety is moderate" →
//!    "moderate species variety");
//! 3. synonym-level rewrites ("bushes" → "shrub");
//! 4. lemmatize each whitespace token and re-join with single spaces.
//!
//! Both rewrite passes are word-boundary-anchored, and a surface form is not
//! rewritten when it already sits inside an occurrence of its own canonical
//! phrase ("rocks" inside "rock pile" stays put). Together these make
//! normalization idempotent: `normalize(normalize(x)) == normalize(x)`.

use regex::{Captures, Regex};

use crate::lemma;
use crate::lexicon::Lexicon;

/// One compiled rewrite: surface pattern, canonical replacement, and the
/// canonical's own pattern for the overlap guard.
struct RewriteRule {
    surface: Regex,
    canonical: String,
    canonical_span: Regex,
}

impl RewriteRule {
    fn new(surface: &str, canonical: &str) -> Self {
        Self {
            // Escaped literals always compile.
            surface: Regex::new(&format!(r"\b{}\b", regex::escape(surface))).unwrap(),
            canonical: canonical.to_string(),
            canonical_span: Regex::new(&format!(r"\b{}\b", regex::escape(canonical))).unwrap(),
        }
    }

    /// Replace surface occurrences, skipping any that lie inside an existing
    /// occurrence of the canonical phrase.
    fn apply(&self, text: &str) -> String {
        if !self.surface.is_match(text) {
            return text.to_string();
        }

        let canonical_spans: Vec<(usize, usize)> = self
            .canonical_span
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();

        self.surface
            .replace_all(text, |caps: &Captures| {
                let m = caps.get(0).expect("whole match");
                let covered = canonical_spans
                    .iter()
                    .any(|&(s, e)| m.start() >= s && m.end() <= e);
                if covered {
                    m.as_str().to_string()
                } else {
                    self.canonical.clone()
                }
            })
            .into_owned()
    }
}

/// Applies the lexicon's rewrite tables and the lemmatizer. Patterns are
/// compiled once at construction.
pub struct Normalizer {
    rules: Vec<RewriteRule>,
}

impl Normalizer {
    /// Compile rewrite rules from the lexicon's phrase and synonym tables,
    /// preserving table order (phrases first).
    pub fn new(lexicon: &Lexicon) -> Self {
        let rules = lexicon
            .phrases()
            .iter()
            .chain(lexicon.synonyms().iter())
            .map(|(surface, canonical)| RewriteRule::new(surface, canonical))
            .collect();
        Self { rules }
    }

    /// Normalize raw description text into canonical lemmatized form.
    pub fn normalize(&self, lexicon: &Lexicon, raw: &str) -> String {
        let mut text = raw.to_lowercase();
        for rule in &self.rules {
            text = rule.apply(&text);
        }
        lemma::lemmatize_text(lexicon, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        let lexicon = Lexicon::builtin();
        Normalizer::new(&lexicon).normalize(&lexicon, raw)
    }

    #[test]
    fn test_lowercases_and_lemmatizes() {
        assert_eq!(normalize("Two Trees"), "two tree");
    }

    #[test]
    fn test_synonym_rewrite_is_boundary_anchored() {
        assert_eq!(normalize("the bushes"), "the shrub");
        // "bushesque" must not be rewritten.
        assert_eq!(normalize("bushesque"), "bushesque");
    }

    #[test]
    fn test_phrase_rewrite_before_synonyms() {
        assert_eq!(
            normalize("The species variety is moderate here"),
            "moderate species variety here"
        );
    }

    #[test]
    fn test_longer_surface_wins_over_shorter() {
        assert_eq!(normalize("a pile of rocks"), "a rock pile");
        assert_eq!(normalize("an info sign"), "an educational sign");
    }

    #[test]
    fn test_canonical_overlap_guard() {
        // "rocks" inside "piled rocks" must not be rewritten a second time
        // after the longer form has produced the canonical.
        assert_eq!(normalize("piled rocks near the path"), "rock pile near the path");
        // A canonical already present in the input is left alone.
        assert_eq!(normalize("an educational sign"), "an educational sign");
        assert_eq!(normalize("a rock pile"), "a rock pile");
    }

    #[test]
    fn test_idempotent_normalization() {
        let texts = [
            "A pile of rocks beside the educational sign.",
            "The species variety is moderate, with bushes and tall grass.",
            "Three birdhouses, an insect hotel and some deadwood.",
            "Gravel walkway through dense vegetation zones.",
        ];
        for raw in texts {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_unrecognized_words_pass_through() {
        assert_eq!(normalize("xeriscaping berm"), "xeriscaping berm");
    }
}
