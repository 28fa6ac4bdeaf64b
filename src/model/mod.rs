//! Shared entity and evidence data model

mod entity;
mod error;
mod evidence;
mod relationship;
mod theme;

#[cfg(test)]
mod tests;

pub use entity::{AbsentAssertion, Entity, EntityId, GraphLink, MetricValue, Metrics};
pub use error::{AnalysisError, AnalysisResult};
pub use evidence::{Durability, EvidenceTrace, TraceType};
pub use relationship::{
    ConfidenceLevel, DimensionScore, MediatorClassification, MediatorDimensions, Relationship,
};
pub use theme::{DiscourseCluster, DiscourseGap, ThemeObservation};

pub(crate) use error::ensure_finite;
