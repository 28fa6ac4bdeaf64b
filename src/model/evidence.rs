//! Evidence traces backing structural claims

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of structural work a piece of evidence does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceType {
    /// A formal rule (law, code, standard)
    Rule,
    /// An action that enforces a boundary
    Enforcement,
    /// A story that fixes identity or roles
    Narrative,
    /// A material or financial resource
    Resource,
}

impl TraceType {
    /// Parse a type label case-insensitively. Returns `None` for unknown labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "rule" => Some(Self::Rule),
            "enforcement" => Some(Self::Enforcement),
            "narrative" => Some(Self::Narrative),
            "resource" => Some(Self::Resource),
            _ => None,
        }
    }
}

impl fmt::Display for TraceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rule => "Rule",
            Self::Enforcement => "Enforcement",
            Self::Narrative => "Narrative",
            Self::Resource => "Resource",
        };
        f.write_str(s)
    }
}

/// How hard the evidence is to undo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Durability {
    /// Law, code, physical infrastructure
    High,
    /// Contracts, standards
    Medium,
    /// Norms, speech
    Low,
}

impl Durability {
    /// Parse a durability label case-insensitively. Returns `None` for unknown labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

/// A verbatim piece of evidence extracted upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceTrace {
    pub id: String,
    pub source_actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_actor: Option<String>,
    /// The verbatim evidence
    pub content: String,
    #[serde(rename = "type")]
    pub trace_type: TraceType,
    pub durability: Durability,
    /// Short summary used in audit lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EvidenceTrace {
    pub fn new(
        id: impl Into<String>,
        source_actor: impl Into<String>,
        content: impl Into<String>,
        trace_type: TraceType,
        durability: Durability,
    ) -> Self {
        Self {
            id: id.into(),
            source_actor: source_actor.into(),
            target_actor: None,
            content: content.into(),
            trace_type,
            durability,
            description: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_actor = Some(target.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The description if present, otherwise the verbatim content.
    pub fn summary(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.content)
    }
}
