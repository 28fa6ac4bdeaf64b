//! Deterministic analytics over extracted policy data
//!
//! Every operation here is a pure function of its inputs and an optional
//! config section. Nothing is cached and nothing is persisted.
//!
//! - [`verify`]: check that a quote actually occurs in a reference text
//! - [`cluster`]: agglomerative clustering of theme embeddings, plus gaps
//! - [`metrics`]: territorialization and coding scores from evidence traces
//! - [`porosity`]: how open a group of actors is to the rest of the graph
//! - [`mediator`]: bucket relationships on the intermediary/mediator scale
//! - [`ghost`]: identity and merging of structurally absent actors
//!
//! # Example
//!
//! ```
//! use strata::analysis::{classify, verify_quote};
//! use strata::model::MediatorClassification;
//!
//! assert!(verify_quote("the Data Protection Authority", "Created by the data protection authority."));
//! assert_eq!(classify(0.55).unwrap(), MediatorClassification::WeakMediator);
//! ```

pub mod cluster;
pub mod ghost;
pub mod mediator;
pub mod metrics;
pub mod porosity;
pub mod verify;

pub use cluster::{
    cluster, cluster_with_config, cluster_with_threshold, cosine_similarity, find_discourse_gaps,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use ghost::{fingerprint, ghost_id, merge_ghosts};
pub use mediator::{classify, clamp_score, score_relationship};
pub use metrics::{compute_structural_metrics, compute_structural_metrics_with, StructuralMetrics, NO_TRACES};
pub use porosity::{compute_porosity, PorosityReport};
pub use verify::{normalize_text, verify_quote, verify_quote_with, verify_quotes, VerifiedQuote};
