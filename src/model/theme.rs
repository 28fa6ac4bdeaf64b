//! Theme observations and the discourse clusters built from them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single extracted theme with its supporting quote and embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeObservation {
    /// Source document the theme was extracted from
    pub source_id: String,
    pub theme: String,
    #[serde(default)]
    pub quote: String,
    pub embedding: Vec<f32>,
}

impl ThemeObservation {
    pub fn new(
        source_id: impl Into<String>,
        theme: impl Into<String>,
        quote: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            theme: theme.into(),
            quote: quote.into(),
            embedding,
        }
    }
}

/// A group of theme observations merged by embedding similarity.
///
/// Cluster ids are assigned per invocation (`cluster-{i}` in output order)
/// and carry no meaning across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscourseCluster {
    pub id: String,
    /// Label for display: the first member theme
    pub name: String,
    pub themes: Vec<ThemeObservation>,
    pub source_ids: BTreeSet<String>,
    /// Mean of the two centroids merged last, not of all members
    pub centroid: Vec<f32>,
}

impl DiscourseCluster {
    /// Number of member themes
    pub fn size(&self) -> usize {
        self.themes.len()
    }

    /// Member theme labels in merge order
    pub fn theme_labels(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.theme.as_str()).collect()
    }
}

/// A wide semantic distance between two clusters ("cultural hole").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscourseGap {
    pub id: String,
    pub cluster_a: String,
    pub cluster_b: String,
    /// `1 - cosine(centroid_a, centroid_b)`, rounded to 3 decimals
    pub distance: f64,
}
