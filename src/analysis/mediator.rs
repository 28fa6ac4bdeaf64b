//! Mediator/intermediary classification of relationships
//!
//! Boundaries are fixed: `< 0.3` strong intermediary, `< 0.5` weak
//! intermediary, `< 0.7` weak mediator, anything else strong mediator.
//! They are part of the contract, not configuration.

use crate::model::{
    ensure_finite, AnalysisResult, EntityId, MediatorClassification, MediatorDimensions,
    Relationship,
};
use tracing::debug;

const STRONG_INTERMEDIARY_BELOW: f64 = 0.3;
const WEAK_INTERMEDIARY_BELOW: f64 = 0.5;
const WEAK_MEDIATOR_BELOW: f64 = 0.7;

/// Bucket a mediator score. Non-finite scores are rejected.
pub fn classify(mediator_score: f64) -> AnalysisResult<MediatorClassification> {
    let score = ensure_finite("mediator_score", mediator_score)?;
    Ok(if score < STRONG_INTERMEDIARY_BELOW {
        MediatorClassification::StrongIntermediary
    } else if score < WEAK_INTERMEDIARY_BELOW {
        MediatorClassification::WeakIntermediary
    } else if score < WEAK_MEDIATOR_BELOW {
        MediatorClassification::WeakMediator
    } else {
        MediatorClassification::StrongMediator
    })
}

/// Clamp a finite score onto [0.0, 1.0].
pub fn clamp_score(field: &str, score: f64) -> AnalysisResult<f64> {
    Ok(ensure_finite(field, score)?.clamp(0.0, 1.0))
}

/// Build a relationship from scored dimensions.
///
/// Every dimension score is clamped, the mediator score is their mean (or
/// `explicit_score` when the upstream supplied one), clamped as well, and the
/// classification follows from it.
pub fn score_relationship(
    id: impl Into<String>,
    source: impl Into<EntityId>,
    target: impl Into<EntityId>,
    relationship_type: impl Into<String>,
    mut dimensions: MediatorDimensions,
    explicit_score: Option<f64>,
) -> AnalysisResult<Relationship> {
    for (name, dim) in dimensions.iter() {
        ensure_finite(name, dim.score)?;
    }
    for dim in dimensions.iter_mut() {
        dim.score = dim.score.clamp(0.0, 1.0);
    }

    let raw = explicit_score.unwrap_or_else(|| dimensions.mean_score());
    let mediator_score = clamp_score("mediator_score", raw)?;
    let classification = classify(mediator_score)?;

    let relationship = Relationship {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        relationship_type: relationship_type.into(),
        dimensions,
        mediator_score,
        classification,
    };
    debug!(
        id = %relationship.id,
        score = mediator_score,
        classification = %classification,
        "relationship scored"
    );
    Ok(relationship)
}

impl Relationship {
    /// Build a relationship whose score is the mean of its dimensions.
    pub fn from_dimensions(
        id: impl Into<String>,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        relationship_type: impl Into<String>,
        dimensions: MediatorDimensions,
    ) -> AnalysisResult<Self> {
        score_relationship(id, source, target, relationship_type, dimensions, None)
    }
}
