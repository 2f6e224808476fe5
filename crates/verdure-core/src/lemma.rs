//! Rule-based English lemmatization.
//!
//! Keyword tables list base forms only, so matching relies on collapsing
//! plurals and minor inflection ("trees" → "tree", "varieties" → "variety")
//! before lookup. A dictionary lemmatizer is overkill for this vocabulary;
//! the rules below cover the tables' inflection patterns deterministically:
//!
//! 1. invariant words ("species") and stop-words pass through unchanged;
//! 2. irregular plurals resolve via a fixed table;
//! 3. suffix rules handle regular plurals (`-ies` → `-y`; `-sses`/`-xes`/
//!    `-zes`/`-ches`/`-shes` drop `es`; a trailing `-s` drops unless the word
//!    ends in `ss`, `us`, or `is`).
//!
//! Unrecognized words pass through untouched, and punctuation glued to a
//! token survives around the lemmatized core ("rocks," → "rock,").

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

use crate::lexicon::Lexicon;

lazy_static! {
    /// Words that look plural but are their own lemma.
    static ref INVARIANT: HashSet<&'static str> = ["species", "series", "always", "perhaps"]
        .into_iter()
        .collect();

    /// Irregular plural → singular.
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("leaves", "leaf"),
        ("knives", "knife"),
        ("wolves", "wolf"),
        ("shelves", "shelf"),
        ("lives", "life"),
        ("children", "child"),
        ("people", "person"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("men", "man"),
        ("women", "woman"),
    ]
    .into_iter()
    .collect();
}

/// Lemmatize a single token, preserving punctuation glued to its edges.
pub fn lemma(lexicon: &Lexicon, token: &str) -> String {
    let start = token
        .find(|c: char| c.is_alphanumeric())
        .unwrap_or(token.len());
    let end = token
        .rfind(|c: char| c.is_alphanumeric())
        .map_or(start, |i| i + token[i..].chars().next().map_or(1, char::len_utf8));

    if start >= end {
        return token.to_string();
    }

    let (prefix, rest) = token.split_at(start);
    let (core, suffix) = rest.split_at(end - start);
    let base = lemma_core(lexicon, core);

    if prefix.is_empty() && suffix.is_empty() {
        base
    } else {
        format!("{prefix}{base}{suffix}")
    }
}

/// Lemmatize a bare word with no surrounding punctuation.
fn lemma_core(lexicon: &Lexicon, word: &str) -> String {
    if word.len() <= 3 || INVARIANT.contains(word) || lexicon.is_stopword(word) {
        return word.to_string();
    }

    if let Some(singular) = IRREGULAR.get(word) {
        return (*singular).to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return format!("{stem}y");
        }
    }

    for compound in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(compound) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Lemmatize every whitespace-separated token of `text`.
pub fn lemmatize_text(lexicon: &Lexicon, text: &str) -> String {
    text.split_whitespace()
        .map(|token| lemma(lexicon, token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::builtin()
    }

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemma(&lex(), "trees"), "tree");
        assert_eq!(lemma(&lex(), "rocks"), "rock");
        assert_eq!(lemma(&lex(), "birdhouses"), "birdhouse");
        assert_eq!(lemma(&lex(), "meadows"), "meadow");
        assert_eq!(lemma(&lex(), "plaques"), "plaque");
    }

    #[test]
    fn test_ies_plural() {
        assert_eq!(lemma(&lex(), "varieties"), "variety");
        assert_eq!(lemma(&lex(), "libraries"), "library");
    }

    #[test]
    fn test_es_after_sibilant() {
        assert_eq!(lemma(&lex(), "grasses"), "grass");
        assert_eq!(lemma(&lex(), "benches"), "bench");
        assert_eq!(lemma(&lex(), "boxes"), "box");
        assert_eq!(lemma(&lex(), "bushes"), "bush");
    }

    #[test]
    fn test_houses_is_not_sibilant_compound() {
        // "houses" must not lose its final "e".
        assert_eq!(lemma(&lex(), "houses"), "house");
    }

    #[test]
    fn test_invariants_and_short_words() {
        assert_eq!(lemma(&lex(), "species"), "species");
        assert_eq!(lemma(&lex(), "grass"), "grass");
        assert_eq!(lemma(&lex(), "gas"), "gas");
        assert_eq!(lemma(&lex(), "this"), "this");
        assert_eq!(lemma(&lex(), "has"), "has");
    }

    #[test]
    fn test_irregular_plurals() {
        assert_eq!(lemma(&lex(), "leaves"), "leaf");
        assert_eq!(lemma(&lex(), "shelves"), "shelf");
    }

    #[test]
    fn test_punctuation_preserved_around_core() {
        assert_eq!(lemma(&lex(), "rocks,"), "rock,");
        assert_eq!(lemma(&lex(), "(trees)"), "(tree)");
        assert_eq!(lemma(&lex(), "..."), "...");
    }

    #[test]
    fn test_lemmatize_text_joins_with_spaces() {
        assert_eq!(
            lemmatize_text(&lex(), "two birdhouses and  three  rocks"),
            "two birdhouse and three rock"
        );
    }

    #[test]
    fn test_idempotent() {
        for word in ["trees", "species", "varieties", "grasses", "benches"] {
            let once = lemma(&lex(), word);
            assert_eq!(lemma(&lex(), &once), once);
        }
    }
}
