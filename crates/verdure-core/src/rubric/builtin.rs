//! Built-in rubrics for the three assessment domains.
//!
//! Keyword lists, weights, and thresholds are the domain calibration; the
//! engine itself has no opinion about them. Keywords are written in natural
//! wording; the matcher lemmatizes them before lookup.

use crate::matcher::ProximityPolicy;
use crate::types::ScoreLabels;

use super::{
    CountStep, CountedPolicy, CriterionSpec, ProximityFallback, Rubric, ScorePolicy,
    SurfaceBalancePolicy, Tier, TieredPolicy, WeightMapping, WeightStep, WeightedSumPolicy,
    WeightedTerm,
};

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect()
}

fn weights(entries: &[(&str, f64)]) -> Vec<WeightedTerm> {
    entries
        .iter()
        .map(|(term, weight)| WeightedTerm {
            term: (*term).to_string(),
            weight: *weight,
        })
        .collect()
}

impl Rubric {
    /// Names of the rubrics shipped with the crate.
    pub fn builtin_names() -> &'static [&'static str] {
        &["biodiversity", "stormwater", "maintenance"]
    }

    /// Look up a built-in rubric by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "biodiversity" => Some(Self::biodiversity()),
            "stormwater" => Some(Self::stormwater()),
            "maintenance" => Some(Self::maintenance()),
            _ => None,
        }
    }

    /// Biodiversity performance: vegetation layering, species variety,
    /// vegetation density, and micro-habitat features.
    pub fn biodiversity() -> Self {
        let vegetation_layers = CriterionSpec {
            name: "vegetation_layers".to_string(),
            policy: ScorePolicy::Counted(CountedPolicy {
                keywords: keywords(&[
                    "grass meadow",
                    "low-rise grass",
                    "wildflower meadow",
                    "shrub",
                    "sparse tree cluster",
                    "dense tree cluster",
                    "isolated tree",
                ]),
                thresholds: vec![
                    CountStep { min: 4, score: 3 },
                    CountStep { min: 2, score: 2 },
                ],
                unit: "matches".to_string(),
                floor_comment: "Limited vegetation layers detected.".to_string(),
            }),
        };

        let species_variety = CriterionSpec {
            name: "species_variety".to_string(),
            policy: ScorePolicy::Tiered(TieredPolicy {
                tiers: vec![
                    Tier {
                        score: 3,
                        keywords: keywords(&[
                            "diverse species variety",
                            "high species variety",
                            "numerous species",
                            "vibrant mix",
                            "broad range of species",
                            "many type of flowering plant",
                            "visible diversity of species",
                            "colorful plant mix",
                            "diverse mix",
                            "variety of flowering species",
                            "multiple colors and forms",
                            "visually rich planting",
                            "diverse palette",
                            "rich mix of plants",
                            "structured plant diversity",
                            "wide array",
                            "ecological diversity",
                        ]),
                        proximity_pairs: pairs(&[
                            ("species", "diverse"),
                            ("species variety", "diverse"),
                            ("variety", "diverse"),
                            ("mix", "species"),
                        ]),
                        comment_prefix: "High variety".to_string(),
                    },
                    Tier {
                        score: 2,
                        keywords: keywords(&[
                            "moderate species variety",
                            "balanced variety",
                            "curated but not overly complex",
                            "moderate to diverse",
                            "some species variety",
                            "moderate mix",
                            "some plant diversity",
                            "fair variety",
                            "not overly complex palette",
                        ]),
                        proximity_pairs: pairs(&[
                            ("species", "moderate"),
                            ("species variety", "moderate"),
                            ("variety", "moderate"),
                        ]),
                        comment_prefix: "Moderate variety".to_string(),
                    },
                ],
                floor_comment: "Limited or sparse species variety.".to_string(),
            }),
        };

        let vegetation_density = CriterionSpec {
            name: "vegetation_density".to_string(),
            policy: ScorePolicy::Tiered(TieredPolicy {
                tiers: vec![
                    Tier {
                        score: 3,
                        keywords: keywords(&[
                            "dense vegetation",
                            "thick vegetation",
                            "lush vegetation",
                            "cover the ground entirely",
                            "rich and textured vegetative carpet",
                            "dense vegetation zones",
                            "dense planting",
                            "dense coverage",
                        ]),
                        proximity_pairs: pairs(&[
                            ("vegetation", "dense"),
                            ("vegetation density", "dense"),
                            ("vegetation density", "high"),
                        ]),
                        comment_prefix: "Dense".to_string(),
                    },
                    Tier {
                        score: 2,
                        keywords: keywords(&[
                            "moderate vegetation",
                            "moderate density",
                            "partial coverage",
                            "moderate plant mass",
                            "moderate vegetation density",
                            "moderate plant coverage",
                            "the vegetation is moderately dense",
                            "moderate to dense",
                            "moderate planting",
                            "moderate coverage",
                        ]),
                        proximity_pairs: pairs(&[
                            ("vegetation", "moderate"),
                            ("vegetation density", "moderate"),
                        ]),
                        comment_prefix: "Moderate".to_string(),
                    },
                ],
                floor_comment: "Sparse or low vegetation coverage.".to_string(),
            }),
        };

        let biodiversity_hotspots = CriterionSpec {
            name: "biodiversity_hotspots".to_string(),
            policy: ScorePolicy::Counted(CountedPolicy {
                keywords: keywords(&[
                    "birdhouse",
                    "bird house",
                    "insect hotel",
                    "bug hotel",
                    "rock pile",
                    "deadwood",
                    "dead wood",
                    "dead hedge",
                    "hollow log",
                    "log",
                    "wood pile",
                ]),
                thresholds: vec![
                    CountStep { min: 3, score: 3 },
                    CountStep { min: 1, score: 2 },
                ],
                unit: "hotspot(s)".to_string(),
                floor_comment: "No biodiversity hotspots detected.".to_string(),
            }),
        };

        Self {
            name: "biodiversity".to_string(),
            description: Some(
                "Biodiversity performance across vegetation layers, species variety, \
                 vegetation density, and micro-habitat features."
                    .to_string(),
            ),
            criteria: vec![
                vegetation_layers,
                species_variety,
                vegetation_density,
                biodiversity_hotspots,
            ],
            proximity: ProximityPolicy {
                strip_stopwords: true,
                strip_punctuation: true,
                max_distance: 10,
            },
            labels: ScoreLabels::new(
                "Weak Performance",
                "Moderate Performance",
                "Strong Performance",
            ),
        }
    }

    /// Stormwater infiltration and retention: surface permeability balance,
    /// water-retentive vegetation, and vegetation density.
    pub fn stormwater() -> Self {
        let permeable_surface = CriterionSpec {
            name: "permeable_surface".to_string(),
            policy: ScorePolicy::SurfaceBalance(SurfaceBalancePolicy {
                permeable: keywords(&[
                    "grass",
                    "meadow",
                    "shrub",
                    "wood chip",
                    "mulch",
                    "wildflower",
                    "tree cluster",
                ]),
                semi_permeable: keywords(&[
                    "gravel",
                    "gravel path",
                    "open soil",
                    "dirt",
                    "bare soil",
                ]),
                impermeable: keywords(&["asphalt", "concrete", "paved"]),
            }),
        };

        let vegetation_retention = CriterionSpec {
            name: "vegetation_retention".to_string(),
            policy: ScorePolicy::WeightedSum(WeightedSumPolicy {
                weights: weights(&[
                    ("low-rise grass", 1.0),
                    ("grass meadow", 2.0),
                    ("wildflower meadow", 3.0),
                    ("shrub", 3.0),
                    ("isolated tree", 2.0),
                    ("tree cluster", 4.0),
                ]),
                use_quantities: false,
                density_adjusted: true,
                proximity_fallbacks: vec![],
                mapping: WeightMapping::Normalized { threshold: 12.0 },
                empty_comment: "No significant water-retentive vegetation found.".to_string(),
            }),
        };

        let vegetation_density = CriterionSpec {
            name: "vegetation_density".to_string(),
            policy: ScorePolicy::Tiered(TieredPolicy {
                tiers: vec![
                    Tier {
                        score: 3,
                        keywords: keywords(&[
                            "dense vegetation",
                            "dense planting",
                            "dense coverage",
                        ]),
                        proximity_pairs: pairs(&[
                            ("vegetation", "dense"),
                            ("vegetation density", "dense"),
                        ]),
                        comment_prefix: "Dense".to_string(),
                    },
                    Tier {
                        score: 2,
                        keywords: keywords(&[
                            "moderate vegetation",
                            "moderate planting",
                            "moderate coverage",
                        ]),
                        proximity_pairs: pairs(&[
                            ("vegetation", "moderate"),
                            ("vegetation density", "moderate"),
                        ]),
                        comment_prefix: "Moderate".to_string(),
                    },
                ],
                floor_comment: "Sparse or low vegetation coverage.".to_string(),
            }),
        };

        Self {
            name: "stormwater".to_string(),
            description: Some(
                "Stormwater infiltration and retention potential from surface types \
                 and vegetation."
                    .to_string(),
            ),
            criteria: vec![permeable_surface, vegetation_retention, vegetation_density],
            proximity: ProximityPolicy {
                strip_stopwords: true,
                strip_punctuation: true,
                max_distance: 10,
            },
            labels: ScoreLabels::new(
                "Weak Performance",
                "Moderate Performance",
                "Strong Performance",
            ),
        }
    }

    /// Maintenance effort implied by vegetation, hardscape, infrastructure,
    /// and micro-habitat elements.
    ///
    /// Direction is inverted relative to the other domains: a HIGH matched
    /// weight means more upkeep and maps to score 1.
    pub fn maintenance() -> Self {
        let maintenance_effort = CriterionSpec {
            name: "maintenance_effort".to_string(),
            policy: ScorePolicy::WeightedSum(WeightedSumPolicy {
                weights: weights(&[
                    ("grass meadow", 1.0),
                    ("low-rise grass", 1.0),
                    ("wildflower meadow", 2.0),
                    ("shrub", 2.0),
                    ("tree", 2.0),
                    ("gravel path", 2.0),
                    ("open soil path", 2.0),
                    ("wood chip path", 2.0),
                    ("bench", 2.0),
                    ("wood stump", 1.0),
                    ("wood log", 1.0),
                    ("picnic table", 2.0),
                    ("educational sign", 3.0),
                    ("event plaque", 2.0),
                    ("bookshelf", 3.0),
                    ("insect hotel", 3.0),
                    ("birdhouse", 2.0),
                    ("rock pile", 1.0),
                    ("deadwood", 1.0),
                    ("dead hedge", 1.0),
                ]),
                use_quantities: true,
                density_adjusted: false,
                proximity_fallbacks: vec![
                    ProximityFallback {
                        term: "gravel path".to_string(),
                        pairs: pairs(&[("gravel", "path"), ("gravel", "trail")]),
                    },
                    ProximityFallback {
                        term: "open soil path".to_string(),
                        pairs: pairs(&[("bare", "soil"), ("dirt", "trail")]),
                    },
                    ProximityFallback {
                        term: "wood chip path".to_string(),
                        pairs: pairs(&[("wood", "chips"), ("mulch", "trail"), ("wood", "trail")]),
                    },
                    ProximityFallback {
                        term: "birdhouse".to_string(),
                        pairs: pairs(&[("bird", "structure"), ("nesting", "box")]),
                    },
                    ProximityFallback {
                        term: "insect hotel".to_string(),
                        pairs: pairs(&[("insect", "hotel"), ("bug", "shelter")]),
                    },
                    ProximityFallback {
                        term: "deadwood".to_string(),
                        pairs: pairs(&[("fallen", "log"), ("dead", "wood")]),
                    },
                    ProximityFallback {
                        term: "dead hedge".to_string(),
                        pairs: pairs(&[("brush", "hedge")]),
                    },
                    ProximityFallback {
                        term: "bench".to_string(),
                        pairs: pairs(&[("wood", "seating")]),
                    },
                ],
                mapping: WeightMapping::Stepped {
                    steps: vec![
                        WeightStep {
                            min: 20.0,
                            score: 1,
                        },
                        WeightStep {
                            min: 12.0,
                            score: 2,
                        },
                    ],
                    default_score: 3,
                },
                empty_comment: "No maintenance-relevant elements detected.".to_string(),
            }),
        };

        Self {
            name: "maintenance".to_string(),
            description: Some(
                "Maintenance effort implied by vegetation complexity, hardscape, \
                 infrastructure, and micro-habitat elements."
                    .to_string(),
            ),
            criteria: vec![maintenance_effort],
            proximity: ProximityPolicy {
                strip_stopwords: false,
                strip_punctuation: true,
                max_distance: 6,
            },
            labels: ScoreLabels::new("High Effort", "Moderate Effort", "Low Effort"),
        }
    }
}
