//! Strata: deterministic analytics for extracted policy assemblages
//!
//! Upstream language models read policy documents and emit themes, evidence
//! traces, actors, and claims about who is missing. Strata does the
//! arithmetic on top of that output, with no model calls of its own.
//!
//! # Core Concepts
//!
//! - **Evidence verification**: is a quoted passage really in the source text?
//! - **Discourse clustering**: group theme embeddings and find the gaps between groups
//! - **Structural metrics**: territorialization, coding, porosity, mediator scores
//! - **Ghost entities**: absent actors merged alongside the ones found in text
//!
//! # Example
//!
//! ```
//! use strata::{AnalyticsEngine, ThemeObservation};
//!
//! let engine = AnalyticsEngine::new();
//! let clusters = engine
//!     .cluster(&[
//!         ThemeObservation::new("doc-1", "Privacy", "", vec![1.0, 0.0]),
//!         ThemeObservation::new("doc-2", "Data protection", "", vec![0.9, 0.1]),
//!     ])
//!     .unwrap();
//! assert_eq!(clusters.len(), 1);
//! ```

pub mod analysis;
pub mod config;
mod engine;
pub mod ingest;
pub mod model;

pub use config::{ConfigError, EngineConfig};
pub use engine::AnalyticsEngine;
pub use model::{
    AbsentAssertion, AnalysisError, AnalysisResult, DiscourseCluster, DiscourseGap, Durability,
    Entity, EntityId, EvidenceTrace, GraphLink, MediatorClassification, MediatorDimensions,
    Relationship, ThemeObservation, TraceType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
