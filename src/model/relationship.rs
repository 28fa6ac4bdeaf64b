//! Pairwise relationships scored on the mediator/intermediary continuum

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::EntityId;

/// Bucketed mediator strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediatorClassification {
    /// [0.0, 0.3)
    StrongIntermediary,
    /// [0.3, 0.5)
    WeakIntermediary,
    /// [0.5, 0.7)
    WeakMediator,
    /// [0.7, 1.0]
    StrongMediator,
}

impl MediatorClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongIntermediary => "strong_intermediary",
            Self::WeakIntermediary => "weak_intermediary",
            Self::WeakMediator => "weak_mediator",
            Self::StrongMediator => "strong_mediator",
        }
    }
}

impl fmt::Display for MediatorClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// One scored dimension of a relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Clamped to [0.0, 1.0]
    pub score: f64,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub confidence: ConfidenceLevel,
}

impl DimensionScore {
    pub fn new(score: f64, justification: impl Into<String>) -> Self {
        Self {
            score,
            justification: justification.into(),
            confidence: ConfidenceLevel::default(),
        }
    }
}

/// The five dimensions a mediator score is averaged from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediatorDimensions {
    pub transformation: DimensionScore,
    pub stability: DimensionScore,
    pub multiplicity: DimensionScore,
    pub generativity: DimensionScore,
    pub contestation: DimensionScore,
}

impl MediatorDimensions {
    /// Dimensions in declaration order, paired with their names
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &DimensionScore)> {
        [
            ("transformation", &self.transformation),
            ("stability", &self.stability),
            ("multiplicity", &self.multiplicity),
            ("generativity", &self.generativity),
            ("contestation", &self.contestation),
        ]
        .into_iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut DimensionScore> {
        [
            &mut self.transformation,
            &mut self.stability,
            &mut self.multiplicity,
            &mut self.generativity,
            &mut self.contestation,
        ]
        .into_iter()
    }

    /// Unweighted mean of the five dimension scores
    pub fn mean_score(&self) -> f64 {
        self.iter().map(|(_, d)| d.score).sum::<f64>() / 5.0
    }
}

/// A scored relationship between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub source: EntityId,
    pub target: EntityId,
    /// Free-form verb, e.g. "regulates", "advises"
    #[serde(rename = "type", default)]
    pub relationship_type: String,
    pub dimensions: MediatorDimensions,
    pub mediator_score: f64,
    pub classification: MediatorClassification,
}
