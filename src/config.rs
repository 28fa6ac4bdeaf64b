//! Engine configuration
//!
//! Weight tables and thresholds live here rather than in module globals so
//! alternate weightings can be injected per call. Configuration is read from
//! YAML; every section and field falls back to its default when absent.

use crate::model::{MetricValue, Metrics};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the embedding clusterer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Merge while the best pair's cosine similarity exceeds this
    pub similarity_threshold: f64,
    /// Report cluster pairs whose distance exceeds this as gaps
    pub gap_threshold: f64,
    /// Keep at most this many gaps, widest first
    pub max_gaps: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            gap_threshold: 0.4,
            max_gaps: 3,
        }
    }
}

/// Durability weights and normalization for structural scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    /// Share of an enforcement trace's weight that also counts as coding
    pub enforcement_coding_factor: f64,
    /// Raw accumulator value that maps to a score of 10
    pub saturation: f64,
}

impl Default for StructuralWeights {
    fn default() -> Self {
        Self {
            high: 3.0,
            medium: 2.0,
            low: 1.0,
            enforcement_coding_factor: 0.5,
            saturation: 15.0,
        }
    }
}

/// Settings for the evidence verifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Elided fragments shorter than this (after normalization) are not searched
    pub min_fragment_len: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { min_fragment_len: 3 }
    }
}

/// Maps role or category keywords onto one canonical actor type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeKeywords {
    #[serde(rename = "type")]
    pub actor_type: String,
    pub keywords: Vec<String>,
}

impl TypeKeywords {
    pub fn new(actor_type: &str, keywords: &[&str]) -> Self {
        Self {
            actor_type: actor_type.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// True if any keyword occurs in the already lowercased `role`.
    pub fn matches(&self, role: &str) -> bool {
        self.keywords.iter().any(|k| !k.is_empty() && role.contains(k.as_str()))
    }
}

fn default_type_keywords() -> Vec<TypeKeywords> {
    vec![
        TypeKeywords::new("Policymaker", &["government", "state", "ministry"]),
        TypeKeywords::new("Academic", &["academic", "research", "expert"]),
        TypeKeywords::new("PrivateTech", &["startup", "business", "private", "tech"]),
        TypeKeywords::new("Infrastructure", &["infra", "platform"]),
        TypeKeywords::new("Dataset", &["data", "set"]),
        TypeKeywords::new("Algorithm", &["algo", "ai"]),
        TypeKeywords::new("AlgorithmicAgent", &["agent"]),
        TypeKeywords::new("LegalObject", &["law", "legal"]),
    ]
}

/// Defaults applied to synthesized ghost entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    pub default_type: String,
    pub default_description: String,
    pub default_metrics: Metrics,
    /// Checked in order; the first entry with a matching keyword wins
    pub type_keywords: Vec<TypeKeywords>,
}

impl Default for GhostConfig {
    fn default() -> Self {
        let mut default_metrics = Metrics::new();
        default_metrics.insert("territorialization".into(), MetricValue::Text("Weak".into()));
        default_metrics.insert("deterritorialization".into(), MetricValue::Text("Strong".into()));
        default_metrics.insert("coding".into(), MetricValue::Text("Weak".into()));
        Self {
            default_type: "Civil Society".to_string(),
            default_description: "Structurally absent actor".to_string(),
            default_metrics,
            type_keywords: default_type_keywords(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cluster: ClusterConfig,
    pub structural: StructuralWeights,
    pub verifier: VerifierConfig,
    pub ghost: GhostConfig,
}

impl EngineConfig {
    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// A missing default file is not an error; an explicit path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Check numeric settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cluster.similarity_threshold", self.cluster.similarity_threshold),
            ("cluster.gap_threshold", self.cluster.gap_threshold),
        ] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite number in [-1, 1], got {}",
                    name, value
                )));
            }
        }

        let w = &self.structural;
        for (name, value) in [
            ("structural.high", w.high),
            ("structural.medium", w.medium),
            ("structural.low", w.low),
            ("structural.saturation", w.saturation),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        if !w.enforcement_coding_factor.is_finite() || w.enforcement_coding_factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "structural.enforcement_coding_factor must be non-negative, got {}",
                w.enforcement_coding_factor
            )));
        }

        if self.ghost.default_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "ghost.default_type must not be empty".to_string(),
            ));
        }
        for (i, entry) in self.ghost.type_keywords.iter().enumerate() {
            if entry.actor_type.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "ghost.type_keywords[{}].type must not be empty",
                    i
                )));
            }
        }
        Ok(())
    }
}

/// Default config location (`<config_dir>/strata/config.yaml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("strata").join("config.yaml"))
}
