//! Rubric configuration.
//!
//! A `Rubric` is the value object that parameterizes the engine: an ordered
//! set of criteria, each bound to a scoring policy, plus the proximity policy
//! and score labels for the domain. The assessment domains that used to be
//! separate scripts (biodiversity, stormwater, maintenance) are now just
//! different rubric values over the same engine; built-in rubrics live in
//! [`builtin`], and custom rubrics load from YAML or JSON.
//!
//! ## Validation
//!
//! Parsing alone does not make a rubric usable. `validate()` enforces the
//! semantic rules the engine relies on:
//!
//! | Rule | Why |
//! |------|-----|
//! | at least one criterion | aggregation over zero scores is undefined |
//! | scores within 1..=3 | the score scale is fixed |
//! | tier scores strictly descending | tiers are evaluated top-down |
//! | thresholds strictly descending | step lookup takes the first hit |
//! | weights strictly positive | weights model relative contribution |

mod builtin;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::matcher::ProximityPolicy;
use crate::types::ScoreLabels;

/// Errors that can occur when loading a rubric.
#[derive(Error, Debug)]
pub enum RubricError {
    #[error("failed to read rubric file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rubric validation failed: {0}")]
    Validation(String),
}

/// A named assessment rubric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    /// Rubric name (e.g., "biodiversity").
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Criteria in evaluation and presentation order.
    pub criteria: Vec<CriterionSpec>,

    /// Proximity-search knobs for this domain.
    #[serde(default)]
    pub proximity: ProximityPolicy,

    /// Labels for overall scores 1..=3.
    pub labels: ScoreLabels,
}

/// One criterion: a name and the policy that scores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub name: String,

    #[serde(flatten)]
    pub policy: ScorePolicy,
}

/// The scoring policies the engine supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Ordered tiers evaluated top-down; first tier with an accepted match
    /// (exact or proximity fallback) assigns its score.
    Tiered(TieredPolicy),

    /// Score is a step function of the number of distinct non-negated
    /// matches in a flat keyword list.
    Counted(CountedPolicy),

    /// Each matched term contributes `count x weight`; the sum maps to a
    /// score through the configured mapping.
    WeightedSum(WeightedSumPolicy),

    /// Compares keyword counts across the three surface permeability
    /// categories.
    SurfaceBalance(SurfaceBalancePolicy),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieredPolicy {
    pub tiers: Vec<Tier>,

    /// Comment for the floor score when no tier matches.
    pub floor_comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    /// Score this tier assigns (3 for the top tier).
    pub score: u8,

    pub keywords: Vec<String>,

    /// Word pairs accepted as a synthetic match when no keyword is present.
    #[serde(default)]
    pub proximity_pairs: Vec<(String, String)>,

    /// Comment prefix (e.g., "High variety").
    pub comment_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountedPolicy {
    pub keywords: Vec<String>,

    /// Minimum-count steps in descending order; the first satisfied step's
    /// score wins. Counts below every step floor to 1.
    pub thresholds: Vec<CountStep>,

    /// Noun used in the comment ("matches", "hotspot(s)").
    pub unit: String,

    /// Comment for the floor score when nothing matches.
    pub floor_comment: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountStep {
    pub min: usize,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedSumPolicy {
    pub weights: Vec<WeightedTerm>,

    /// Extract quantity phrases ("three birdhouses" → 3). When off, presence
    /// contributes count 1.
    #[serde(default)]
    pub use_quantities: bool,

    /// Scale each term's weight by a nearby density adjective (0.5 or 1.0).
    #[serde(default)]
    pub density_adjusted: bool,

    /// Per-term proximity pairs accepted as presence when neither quantities
    /// nor direct keywords hit.
    #[serde(default)]
    pub proximity_fallbacks: Vec<ProximityFallback>,

    pub mapping: WeightMapping,

    /// Comment when no term contributes.
    pub empty_comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityFallback {
    pub term: String,
    pub pairs: Vec<(String, String)>,
}

/// How a weighted total maps to a score.
///
/// The step direction is part of the domain contract: maintenance maps HIGH
/// totals to score 1 (more matched weight means more upkeep), so the mapping
/// must never be assumed monotonic-good.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightMapping {
    /// First step whose `min` the total reaches wins; otherwise
    /// `default_score`.
    Stepped {
        steps: Vec<WeightStep>,
        default_score: u8,
    },

    /// `round_half_up(total / threshold * 3)`, clamped to 1..=3.
    Normalized { threshold: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightStep {
    pub min: f64,
    pub score: u8,
}

impl WeightMapping {
    /// Map a weighted total to a score in 1..=3.
    pub fn score_for(&self, total: f64) -> u8 {
        match self {
            Self::Stepped {
                steps,
                default_score,
            } => steps
                .iter()
                .find(|step| total >= step.min)
                .map_or(*default_score, |step| step.score),
            Self::Normalized { threshold } => {
                let scaled = total / threshold * 3.0;
                // Round-half-up, pinned independently of float rounding modes.
                let rounded = (scaled + 0.5).floor() as i64;
                rounded.clamp(1, 3) as u8
            }
        }
    }
}

impl Rubric {
    /// Parse a rubric from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, RubricError> {
        let rubric: Self = serde_yaml::from_str(yaml)?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Parse a rubric from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, RubricError> {
        let rubric: Self = serde_json::from_str(json)?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Load a rubric from a file; `.json` parses as JSON, anything else as
    /// YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Semantic validation beyond what parsing enforces.
    pub fn validate(&self) -> Result<(), RubricError> {
        if self.name.trim().is_empty() {
            return Err(RubricError::Validation("rubric name is empty".to_string()));
        }
        if self.criteria.is_empty() {
            return Err(RubricError::Validation(
                "rubric defines no criteria".to_string(),
            ));
        }

        for criterion in &self.criteria {
            if criterion.name.trim().is_empty() {
                return Err(RubricError::Validation(
                    "criterion name is empty".to_string(),
                ));
            }
            criterion.policy.validate(&criterion.name)?;
        }

        Ok(())
    }
}

impl ScorePolicy {
    fn validate(&self, criterion: &str) -> Result<(), RubricError> {
        let bad_score = |score: u8| !(1..=3).contains(&score);
        let fail = |msg: String| Err(RubricError::Validation(format!("{criterion}: {msg}")));

        match self {
            Self::Tiered(policy) => {
                if policy.tiers.is_empty() {
                    return fail("tiered policy has no tiers".to_string());
                }
                for tier in &policy.tiers {
                    if bad_score(tier.score) {
                        return fail(format!("tier score {} outside 1..=3", tier.score));
                    }
                    if tier.keywords.is_empty() && tier.proximity_pairs.is_empty() {
                        return fail("tier has neither keywords nor proximity pairs".to_string());
                    }
                }
                let descending = policy
                    .tiers
                    .windows(2)
                    .all(|pair| pair[0].score > pair[1].score);
                if !descending {
                    return fail("tier scores must be strictly descending".to_string());
                }
            }
            Self::Counted(policy) => {
                if policy.keywords.is_empty() {
                    return fail("counted policy has no keywords".to_string());
                }
                for step in &policy.thresholds {
                    if bad_score(step.score) {
                        return fail(format!("threshold score {} outside 1..=3", step.score));
                    }
                }
                let descending = policy
                    .thresholds
                    .windows(2)
                    .all(|pair| pair[0].min > pair[1].min);
                if !descending {
                    return fail("count thresholds must be strictly descending".to_string());
                }
            }
            Self::WeightedSum(policy) => {
                if policy.weights.is_empty() {
                    return fail("weighted policy has no weights".to_string());
                }
                for weighted in &policy.weights {
                    if weighted.weight <= 0.0 {
                        return fail(format!(
                            "weight for '{}' must be positive",
                            weighted.term
                        ));
                    }
                }
                match &policy.mapping {
                    WeightMapping::Stepped {
                        steps,
                        default_score,
                    } => {
                        if bad_score(*default_score) {
                            return fail(format!("default score {default_score} outside 1..=3"));
                        }
                        for step in steps {
                            if bad_score(step.score) {
                                return fail(format!("step score {} outside 1..=3", step.score));
                            }
                        }
                        let descending = steps.windows(2).all(|pair| pair[0].min > pair[1].min);
                        if !descending {
                            return fail("weight steps must be strictly descending".to_string());
                        }
                    }
                    WeightMapping::Normalized { threshold } => {
                        if *threshold <= 0.0 {
                            return fail("normalization threshold must be positive".to_string());
                        }
                    }
                }
            }
            Self::SurfaceBalance(policy) => {
                if policy.permeable.is_empty()
                    || policy.semi_permeable.is_empty()
                    || policy.impermeable.is_empty()
                {
                    return fail("every surface category needs keywords".to_string());
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceBalancePolicy {
    pub permeable: Vec<String>,
    pub semi_permeable: Vec<String>,
    pub impermeable: Vec<String>,
}
