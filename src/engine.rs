//! Stateless facade binding an [`EngineConfig`] to the analytics operations

use crate::analysis::{
    self, PorosityReport, StructuralMetrics, VerifiedQuote,
};
use crate::config::EngineConfig;
use crate::model::{
    AbsentAssertion, AnalysisResult, DiscourseCluster, DiscourseGap, Entity, EntityId,
    EvidenceTrace, GraphLink, MediatorClassification, MediatorDimensions, Relationship,
    ThemeObservation,
};
use serde_json::Value;
use std::collections::HashSet;

/// The analytics engine.
///
/// Holds only configuration. Every method is a pure function of its
/// arguments and that configuration, so one engine can be shared freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Evidence verification ---

    pub fn verify_quote(&self, quote: &str, reference: &str) -> bool {
        analysis::verify_quote_with(quote, reference, &self.config.verifier)
    }

    /// Verify every quotation found in an analysis document.
    pub fn audit_quotes(&self, reference: &str, document: &Value) -> Vec<VerifiedQuote> {
        analysis::verify_quotes(reference, document, &self.config.verifier)
    }

    // --- Embedding clustering ---

    pub fn cluster(&self, observations: &[ThemeObservation]) -> AnalysisResult<Vec<DiscourseCluster>> {
        analysis::cluster_with_config(observations, &self.config.cluster)
    }

    pub fn discourse_gaps(&self, clusters: &[DiscourseCluster]) -> AnalysisResult<Vec<DiscourseGap>> {
        analysis::find_discourse_gaps(clusters, &self.config.cluster)
    }

    // --- Structural and graph metrics ---

    pub fn structural_metrics(&self, traces: &[EvidenceTrace]) -> StructuralMetrics {
        analysis::compute_structural_metrics_with(traces, &self.config.structural)
    }

    pub fn porosity(&self, member_ids: &HashSet<EntityId>, links: &[GraphLink]) -> PorosityReport {
        analysis::compute_porosity(member_ids, links)
    }

    pub fn classify(&self, mediator_score: f64) -> AnalysisResult<MediatorClassification> {
        analysis::classify(mediator_score)
    }

    pub fn score_relationship(
        &self,
        id: impl Into<String>,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        relationship_type: impl Into<String>,
        dimensions: MediatorDimensions,
        explicit_score: Option<f64>,
    ) -> AnalysisResult<Relationship> {
        analysis::score_relationship(id, source, target, relationship_type, dimensions, explicit_score)
    }

    // --- Ghost entities ---

    pub fn fingerprint(&self, name: &str, context_key: &str, themes: Option<&[String]>) -> String {
        analysis::fingerprint(name, context_key, themes)
    }

    pub fn merge_ghosts(&self, physical: &[Entity], absences: &[AbsentAssertion]) -> Vec<Entity> {
        analysis::merge_ghosts(physical, absences, &self.config.ghost)
    }
}
