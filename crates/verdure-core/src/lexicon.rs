//! Static vocabulary tables for normalization and matching.
//!
//! The `Lexicon` collects every table the engine consults: phrase and synonym
//! canonicalization maps, stop-words, negation terms, number words, and
//! density-adjective multipliers. It is constructed once at startup and
//! injected into the engine; nothing mutates it afterwards, so a shared
//! reference is safe across concurrent assessments.
//!
//! ## Ordering invariant
//!
//! Both rewrite tables are ordered: entries are applied first to last, and
//! longer or more specific surface forms must be registered before shorter
//! ones that overlap them ("pile of rocks" before "rocks", "info sign" before
//! "sign"). The built-in tables follow this discipline.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Multi-word phrase rewrites, applied before synonym rewrites.
///
/// These collapse sentence-shaped wording into the canonical keyword phrases
/// the rubric tiers look for.
static PHRASE_TABLE: &[(&str, &str)] = &[
    (
        "species variety across the space is moderate",
        "moderate species variety",
    ),
    (
        "species variety across the area is moderate",
        "moderate species variety",
    ),
    ("the species variety is moderate", "moderate species variety"),
    ("species variety appears moderate", "moderate species variety"),
    ("species variety is moderate", "moderate species variety"),
    (
        "species variety across the space is diverse",
        "diverse species variety",
    ),
    (
        "species variety across the area is diverse",
        "diverse species variety",
    ),
    ("the species variety is diverse", "diverse species variety"),
    ("species variety appears diverse", "diverse species variety"),
    ("species variety is diverse", "diverse species variety"),
    ("vegetation density is dense", "dense vegetation"),
    ("vegetation density is high", "dense vegetation"),
    ("the vegetation is dense", "dense vegetation"),
    ("vegetation is dense", "dense vegetation"),
    ("vegetation density is moderate", "moderate vegetation"),
    ("vegetation appears moderate", "moderate vegetation"),
];

/// Surface form → canonical term. Ordered; see the module docs.
static SYNONYM_TABLE: &[(&str, &str)] = &[
    // Vegetation
    ("bushy plant", "shrub"),
    ("evergreen bushes", "shrub"),
    ("flowering shrubs", "shrub"),
    ("ornamental plants", "shrub"),
    ("thicket", "shrub"),
    ("bushes", "shrub"),
    ("shrubs", "shrub"),
    ("bush", "shrub"),
    ("patch of grass", "low-rise grass"),
    ("grassy field", "low-rise grass"),
    ("grassland", "low-rise grass"),
    ("meadow grass", "grass meadow"),
    ("ornamental grass", "grass meadow"),
    ("natural meadow", "grass meadow"),
    ("tall grass", "grass meadow"),
    ("flowering plants", "wildflower meadow"),
    ("flower bed", "wildflower meadow"),
    ("young tree", "isolated tree with small canopy"),
    ("single tree", "isolated tree with small canopy"),
    ("several trees", "tree cluster"),
    ("trees cluster", "tree cluster"),
    // Micro-habitat features
    ("insect hotels", "insect hotel"),
    ("bee hotel", "insect hotel"),
    ("bug house", "insect hotel"),
    ("pollinator box", "insect hotel"),
    ("habitat log", "deadwood"),
    ("fallen log", "deadwood"),
    ("tree stump", "deadwood"),
    ("deadwoods", "deadwood"),
    ("stack of wood", "wood pile"),
    ("pile of rocks", "rock pile"),
    ("piled rocks", "rock pile"),
    ("rock piles", "rock pile"),
    ("rock stack", "rock pile"),
    ("piled rock", "rock pile"),
    ("rocks", "rock pile"),
    ("hollow logs", "hollow log"),
    ("hollow tree", "hollow log"),
    ("birdhouses", "birdhouse"),
    ("nesting box", "birdhouse"),
    ("nest box", "birdhouse"),
    ("bird box", "birdhouse"),
    ("dead hedges", "dead hedge"),
    ("brush hedge", "dead hedge"),
    // Hardscape
    ("gravel walkway", "gravel path"),
    ("gravel trail", "gravel path"),
    ("bare soil trail", "open soil path"),
    ("bare soil path", "open soil path"),
    ("dirt path", "open soil path"),
    ("wood trail", "wood chip path"),
    ("wood path", "wood chip path"),
    // Infrastructure
    ("wooden bench", "bench"),
    ("log bench", "bench"),
    ("stone seat", "bench"),
    ("seating island", "bench"),
    ("benches", "bench"),
    ("wood logs", "wood log"),
    ("logs", "wood log"),
    ("picnic area", "picnic table"),
    ("picnic tables", "picnic table"),
    ("educational signs", "educational sign"),
    ("biodiversity sign", "educational sign"),
    ("sign board", "educational sign"),
    ("info sign", "educational sign"),
    ("interpretive panel", "educational sign"),
    ("signpost", "educational sign"),
    ("signs", "educational sign"),
    ("sign", "educational sign"),
    ("event plaques", "event plaque"),
    ("plaques", "event plaque"),
    ("plaque", "event plaque"),
    ("mini library", "bookshelf"),
    ("book hut", "bookshelf"),
    ("shared bookshelf", "bookshelf"),
    ("bookshelves", "bookshelf"),
];

/// Closed set of negation markers. Multi-word terms match as contiguous
/// token subsequences.
static NEGATION_TERMS: &[&str] = &[
    "no",
    "not",
    "without",
    "lacks",
    "lack of",
    "missing",
    "absent",
    "devoid of",
    "none of the",
];

/// Spelled-out cardinals recognized by quantity extraction.
static NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Density adjectives and the multiplier they apply to a nearby vegetation
/// term's weight. Checked in order; the first adjective found in the window
/// wins.
static DENSITY_TABLE: &[(&str, f64)] = &[
    ("sparse", 0.5),
    ("scattered", 0.5),
    ("patchy", 0.5),
    ("thin", 0.5),
    ("moderate", 0.5),
    ("some", 0.5),
    ("few", 0.5),
    ("dense", 1.0),
    ("thick", 1.0),
    ("lush", 1.0),
    ("abundant", 1.0),
];

lazy_static! {
    /// Common English stop-words, strippable before proximity search.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words = [
            // Articles
            "a", "an", "the",
            // Prepositions
            "about", "above", "across", "after", "against", "along", "among", "around",
            "at", "before", "behind", "below", "beneath", "beside", "between", "beyond",
            "by", "down", "during", "except", "for", "from", "in", "inside", "into",
            "near", "of", "off", "on", "onto", "out", "outside", "over", "past",
            "through", "to", "toward", "under", "until", "up", "upon", "with", "within",
            // Conjunctions
            "and", "but", "or", "nor", "so", "yet", "both", "either", "neither",
            // Pronouns
            "i", "me", "my", "we", "our", "you", "your", "it", "its",
            "they", "them", "their", "this", "that", "these", "those",
            "what", "which", "who", "whom",
            // Common verbs
            "is", "are", "was", "were", "be", "been", "being",
            "have", "has", "had", "do", "does", "did",
            "can", "could", "shall", "should", "will", "would", "may", "might", "must",
            // Other common words
            "all", "any", "each", "every", "more", "most", "other", "such",
            "only", "own", "same", "than", "too", "very",
            "just", "also", "now", "here", "there", "when", "where", "how",
        ];
        words.into_iter().collect()
    };

    static ref BUILTIN: Lexicon = Lexicon::new(
        PHRASE_TABLE
            .iter()
            .map(|(s, c)| ((*s).to_string(), (*c).to_string()))
            .collect(),
        SYNONYM_TABLE
            .iter()
            .map(|(s, c)| ((*s).to_string(), (*c).to_string()))
            .collect(),
        STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
    );
}

/// Immutable vocabulary tables injected into the scoring engine.
#[derive(Debug, Clone)]
pub struct Lexicon {
    phrases: Vec<(String, String)>,
    synonyms: Vec<(String, String)>,
    stopwords: HashSet<String>,
    negation_terms: Vec<String>,
    number_words: HashMap<String, u32>,
    density_multipliers: Vec<(String, f64)>,
    reverse_synonyms: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Build a lexicon from explicit tables. The negation, number, and
    /// density tables are fixed engine vocabulary and are not substitutable.
    pub fn new(
        phrases: Vec<(String, String)>,
        synonyms: Vec<(String, String)>,
        stopwords: HashSet<String>,
    ) -> Self {
        let mut reverse_synonyms: HashMap<String, Vec<String>> = HashMap::new();
        for (surface, canonical) in &synonyms {
            reverse_synonyms
                .entry(canonical.clone())
                .or_default()
                .push(surface.clone());
        }

        Self {
            phrases,
            synonyms,
            stopwords,
            negation_terms: NEGATION_TERMS.iter().map(|t| (*t).to_string()).collect(),
            number_words: NUMBER_WORDS
                .iter()
                .map(|(w, n)| ((*w).to_string(), *n))
                .collect(),
            density_multipliers: DENSITY_TABLE
                .iter()
                .map(|(w, m)| ((*w).to_string(), *m))
                .collect(),
            reverse_synonyms,
        }
    }

    /// The lexicon shipped with the crate, merged from all assessment
    /// domains.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Ordered phrase rewrites (surface → canonical).
    pub fn phrases(&self) -> &[(String, String)] {
        &self.phrases
    }

    /// Ordered synonym rewrites (surface → canonical).
    pub fn synonyms(&self) -> &[(String, String)] {
        &self.synonyms
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// The fixed negation-marker set.
    pub fn negation_terms(&self) -> &[String] {
        &self.negation_terms
    }

    /// Numeric value of a spelled-out cardinal, if recognized.
    pub fn number_value(&self, word: &str) -> Option<u32> {
        self.number_words.get(word).copied()
    }

    /// Alternation fragment matching any spelled-out cardinal, for embedding
    /// in the quantity pattern.
    pub fn number_word_alternation(&self) -> String {
        NUMBER_WORDS
            .iter()
            .map(|(w, _)| *w)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Multiplier for a density adjective, if the word is one.
    pub fn density_multiplier(&self, word: &str) -> Option<f64> {
        self.density_multipliers
            .iter()
            .find(|(adj, _)| adj == word)
            .map(|(_, m)| *m)
    }

    /// Density adjectives in table order.
    pub fn density_adjectives(&self) -> impl Iterator<Item = &str> {
        self.density_multipliers.iter().map(|(adj, _)| adj.as_str())
    }

    /// All registered surface forms for a canonical term. Empty when the
    /// term has no synonyms.
    pub fn surface_forms(&self, canonical: &str) -> &[String] {
        self.reverse_synonyms
            .get(canonical)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_nonempty() {
        let lex = Lexicon::builtin();
        assert!(!lex.phrases().is_empty());
        assert!(!lex.synonyms().is_empty());
        assert!(lex.is_stopword("the"));
        assert!(!lex.is_stopword("diverse"));
    }

    #[test]
    fn test_reverse_map_collects_all_surfaces() {
        let lex = Lexicon::builtin();
        let surfaces = lex.surface_forms("insect hotel");
        assert!(surfaces.contains(&"bee hotel".to_string()));
        assert!(surfaces.contains(&"bug house".to_string()));
        assert!(surfaces.contains(&"pollinator box".to_string()));
    }

    #[test]
    fn test_longer_surface_forms_registered_first() {
        let lex = Lexicon::builtin();
        let pos = |needle: &str| {
            lex.synonyms()
                .iter()
                .position(|(s, _)| s == needle)
                .expect("surface form present")
        };
        assert!(pos("pile of rocks") < pos("rocks"));
        assert!(pos("piled rocks") < pos("rocks"));
        assert!(pos("info sign") < pos("sign"));
        assert!(pos("hollow logs") < pos("logs"));
    }

    #[test]
    fn test_number_words() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.number_value("three"), Some(3));
        assert_eq!(lex.number_value("eleven"), None);
    }

    #[test]
    fn test_density_multipliers() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.density_multiplier("sparse"), Some(0.5));
        assert_eq!(lex.density_multiplier("lush"), Some(1.0));
        assert_eq!(lex.density_multiplier("green"), None);
    }
}
