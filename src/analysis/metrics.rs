//! Structural scores from typed evidence traces
//!
//! - Territorialization: how firmly roles and boundaries are fixed. Fed by
//!   `Enforcement` and `Narrative` traces.
//! - Coding intensity: how much formal rules govern behavior. Fed by `Rule`
//!   traces, plus a fraction of each `Enforcement` trace.
//!
//! Each trace contributes its durability weight. Raw sums are compressed onto
//! 1..=10 with `round(10 * log2(raw + 1) / log2(saturation + 1))`.

use crate::config::StructuralWeights;
use crate::model::{Durability, EvidenceTrace, TraceType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Audit entry used when there is no evidence at all
pub const NO_TRACES: &str = "No traces found.";

/// Territorialization and coding scores with the audit trail behind them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralMetrics {
    /// 1..=10, or 0 when there were no traces
    pub territorialization: u8,
    /// 1..=10, or 0 when there were no traces
    pub coding: u8,
    pub territorialization_audit: Vec<String>,
    pub coding_audit: Vec<String>,
}

impl StructuralMetrics {
    fn empty() -> Self {
        Self {
            territorialization: 0,
            coding: 0,
            territorialization_audit: vec![NO_TRACES.to_string()],
            coding_audit: vec![NO_TRACES.to_string()],
        }
    }
}

impl StructuralWeights {
    /// Weight for a durability level
    pub fn weight(&self, durability: Durability) -> f64 {
        match durability {
            Durability::High => self.high,
            Durability::Medium => self.medium,
            Durability::Low => self.low,
        }
    }

    /// Compress a raw accumulator onto 1..=10.
    pub fn normalize(&self, raw: f64) -> u8 {
        let scaled = 10.0 * (raw.max(0.0) + 1.0).log2() / (self.saturation + 1.0).log2();
        if !scaled.is_finite() {
            return 10;
        }
        scaled.round().clamp(1.0, 10.0) as u8
    }
}

fn audit_line(trace: &EvidenceTrace, weight: f64) -> String {
    format!(
        "[{} | {}] {} (+{})",
        trace.trace_type,
        trace.durability,
        trace.summary(),
        weight
    )
}

/// Compute structural scores with the default weights.
pub fn compute_structural_metrics(traces: &[EvidenceTrace]) -> StructuralMetrics {
    compute_structural_metrics_with(traces, &StructuralWeights::default())
}

/// Compute structural scores with injected weights.
pub fn compute_structural_metrics_with(
    traces: &[EvidenceTrace],
    weights: &StructuralWeights,
) -> StructuralMetrics {
    if traces.is_empty() {
        return StructuralMetrics::empty();
    }

    let mut territorialization_raw = 0.0;
    let mut coding_raw = 0.0;
    let mut territorialization_audit = Vec::new();
    let mut coding_audit = Vec::new();

    for trace in traces {
        let weight = weights.weight(trace.durability);

        if matches!(trace.trace_type, TraceType::Enforcement | TraceType::Narrative) {
            territorialization_raw += weight;
            territorialization_audit.push(audit_line(trace, weight));
        }

        match trace.trace_type {
            TraceType::Rule => {
                coding_raw += weight;
                coding_audit.push(audit_line(trace, weight));
            }
            // An enforcement action is partial evidence that a rule exists
            TraceType::Enforcement => {
                let partial = weight * weights.enforcement_coding_factor;
                coding_raw += partial;
                coding_audit.push(audit_line(trace, partial));
            }
            TraceType::Narrative | TraceType::Resource => {}
        }
    }

    let metrics = StructuralMetrics {
        territorialization: weights.normalize(territorialization_raw),
        coding: weights.normalize(coding_raw),
        territorialization_audit,
        coding_audit,
    };
    debug!(
        traces = traces.len(),
        territorialization_raw,
        coding_raw,
        territorialization = metrics.territorialization,
        coding = metrics.coding,
        "structural metrics computed"
    );
    metrics
}
