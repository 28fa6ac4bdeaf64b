//! Greedy agglomerative clustering of theme observations
//!
//! Every observation starts as its own cluster. Each round merges the single
//! most similar pair of centroids while that similarity exceeds the threshold.
//! The merged centroid is the elementwise mean of the two centroids, not of all
//! member embeddings, so it leans toward the most recently merged pair.
//!
//! The pair scan visits `(i, j)` with `i < j` in order and only replaces the
//! best pair on a strictly higher similarity, so ties go to the first pair
//! found. The merged cluster is appended after the survivors. Output is
//! deterministic for a given input order, but permuting the input may change
//! the partition.

use crate::config::ClusterConfig;
use crate::model::{
    ensure_finite, AnalysisError, AnalysisResult, DiscourseCluster, DiscourseGap, ThemeObservation,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Default merge threshold
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Cosine similarity between two vectors.
///
/// Returns `None` when either vector has zero magnitude or the result is not
/// finite; such pairs are never similar.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let sim = dot / (norm_a * norm_b);
    sim.is_finite().then_some(sim)
}

/// Working cluster before ids are assigned
struct PendingCluster {
    themes: Vec<ThemeObservation>,
    source_ids: BTreeSet<String>,
    centroid: Vec<f32>,
}

impl PendingCluster {
    fn seed(observation: &ThemeObservation) -> Self {
        Self {
            centroid: observation.embedding.clone(),
            source_ids: BTreeSet::from([observation.source_id.clone()]),
            themes: vec![observation.clone()],
        }
    }

    fn merge(mut self, other: PendingCluster) -> Self {
        let centroid = self
            .centroid
            .iter()
            .zip(other.centroid.iter())
            .map(|(a, b)| (a + b) / 2.0)
            .collect();
        self.themes.extend(other.themes);
        self.source_ids.extend(other.source_ids);
        Self {
            themes: self.themes,
            source_ids: self.source_ids,
            centroid,
        }
    }
}

/// Check that all embeddings share one dimensionality and are finite.
fn validate_observations(observations: &[ThemeObservation]) -> AnalysisResult<()> {
    let Some(first) = observations.first() else {
        return Ok(());
    };
    let expected = first.embedding.len();
    for (index, obs) in observations.iter().enumerate() {
        if obs.embedding.len() != expected {
            return Err(AnalysisError::DimensionMismatch {
                index,
                expected,
                found: obs.embedding.len(),
            });
        }
        if let Some(bad) = obs.embedding.iter().find(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFinite {
                field: format!("observations[{}].embedding", index),
                value: *bad as f64,
            });
        }
    }
    Ok(())
}

/// Find the most similar pair strictly above the threshold.
fn best_pair(clusters: &[PendingCluster], threshold: f64) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_sim = threshold;
    for i in 0..clusters.len() {
        for j in (i + 1)..clusters.len() {
            let Some(sim) = cosine_similarity(&clusters[i].centroid, &clusters[j].centroid) else {
                continue;
            };
            if sim > best_sim {
                best_sim = sim;
                best = Some((i, j, sim));
            }
        }
    }
    best
}

/// Cluster observations with the default threshold (0.7).
pub fn cluster(observations: &[ThemeObservation]) -> AnalysisResult<Vec<DiscourseCluster>> {
    cluster_with_threshold(observations, DEFAULT_SIMILARITY_THRESHOLD)
}

/// Cluster observations, merging while the best pair exceeds `similarity_threshold`.
pub fn cluster_with_threshold(
    observations: &[ThemeObservation],
    similarity_threshold: f64,
) -> AnalysisResult<Vec<DiscourseCluster>> {
    if !similarity_threshold.is_finite() {
        return Err(AnalysisError::InvalidThreshold(similarity_threshold));
    }
    validate_observations(observations)?;

    let mut clusters: Vec<PendingCluster> = observations.iter().map(PendingCluster::seed).collect();
    let mut merges = 0usize;

    while clusters.len() > 1 {
        let Some((i, j, sim)) = best_pair(&clusters, similarity_threshold) else {
            break;
        };
        // j > i, so removing j first keeps i valid
        let right = clusters.remove(j);
        let left = clusters.remove(i);
        debug!(left = i, right = j, similarity = sim, "merging clusters");
        clusters.push(left.merge(right));
        merges += 1;
    }

    debug!(
        observations = observations.len(),
        clusters = clusters.len(),
        merges,
        "clustering complete"
    );

    Ok(clusters
        .into_iter()
        .enumerate()
        .map(|(i, c)| DiscourseCluster {
            id: format!("cluster-{}", i),
            name: c.themes.first().map(|t| t.theme.clone()).unwrap_or_default(),
            themes: c.themes,
            source_ids: c.source_ids,
            centroid: c.centroid,
        })
        .collect())
}

/// Cluster using the thresholds in a [`ClusterConfig`].
pub fn cluster_with_config(
    observations: &[ThemeObservation],
    config: &ClusterConfig,
) -> AnalysisResult<Vec<DiscourseCluster>> {
    cluster_with_threshold(observations, config.similarity_threshold)
}

/// Find the widest semantic gaps between clusters.
///
/// A pair is a gap when `1 - cosine(centroid_a, centroid_b)` exceeds
/// `gap_threshold`. Gaps are sorted widest first (ties keep scan order) and
/// truncated to `max_gaps`. Pairs with a zero-magnitude centroid are skipped.
pub fn find_discourse_gaps(
    clusters: &[DiscourseCluster],
    config: &ClusterConfig,
) -> AnalysisResult<Vec<DiscourseGap>> {
    ensure_finite("gap_threshold", config.gap_threshold)?;

    let mut gaps = Vec::new();
    for i in 0..clusters.len() {
        for j in (i + 1)..clusters.len() {
            let (a, b) = (&clusters[i], &clusters[j]);
            let Some(sim) = cosine_similarity(&a.centroid, &b.centroid) else {
                continue;
            };
            let distance = 1.0 - sim;
            if distance > config.gap_threshold {
                gaps.push(DiscourseGap {
                    id: format!("hole-{}-{}", a.id, b.id),
                    cluster_a: a.id.clone(),
                    cluster_b: b.id.clone(),
                    distance: (distance * 1000.0).round() / 1000.0,
                });
            }
        }
    }

    gaps.sort_by(|x, y| y.distance.total_cmp(&x.distance));
    gaps.truncate(config.max_gaps);
    Ok(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(source: &str, theme: &str, embedding: Vec<f32>) -> ThemeObservation {
        ThemeObservation::new(source, theme, format!("quote about {}", theme), embedding)
    }

    // --- Scenario: cosine similarity edge cases ---

    #[test]
    fn identical_vectors_have_similarity_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), Some(0.0));
    }

    #[test]
    fn zero_magnitude_is_not_similar() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
    }

    // --- Scenario: merging ---

    #[test]
    fn identical_embeddings_merge_into_one_cluster() {
        let observations = vec![
            obs("doc-a", "data sovereignty", vec![1.0, 0.0]),
            obs("doc-b", "national data control", vec![1.0, 0.0]),
        ];
        let clusters = cluster(&observations).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size(), 2);
        assert_eq!(clusters[0].id, "cluster-0");
        assert_eq!(clusters[0].name, "data sovereignty");
        assert_eq!(
            clusters[0].source_ids.iter().cloned().collect::<Vec<_>>(),
            vec!["doc-a".to_string(), "doc-b".to_string()]
        );
    }

    #[test]
    fn orthogonal_embeddings_stay_apart() {
        let observations = vec![
            obs("doc-a", "innovation", vec![1.0, 0.0]),
            obs("doc-b", "human rights", vec![0.0, 1.0]),
        ];
        let clusters = cluster(&observations).unwrap();
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.size() == 1));
    }

    #[test]
    fn similarity_equal_to_threshold_does_not_merge() {
        let observations = vec![
            obs("a", "x", vec![1.0, 0.0]),
            obs("b", "y", vec![1.0, 0.0]),
        ];
        let clusters = cluster_with_threshold(&observations, 1.0).unwrap();
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn zero_vectors_never_merge_even_with_negative_threshold() {
        let observations = vec![
            obs("a", "x", vec![0.0, 0.0]),
            obs("b", "y", vec![0.0, 0.0]),
        ];
        let clusters = cluster_with_threshold(&observations, -1.0).unwrap();
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn merged_cluster_is_appended_after_survivors() {
        let observations = vec![
            obs("a", "outlier", vec![0.0, 1.0]),
            obs("b", "first", vec![1.0, 0.0]),
            obs("c", "second", vec![1.0, 0.01]),
        ];
        let clusters = cluster(&observations).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].name, "outlier");
        assert_eq!(clusters[1].theme_labels(), vec!["first", "second"]);
        assert_eq!(clusters[1].id, "cluster-1");
    }

    #[test]
    fn centroid_is_mean_of_centroids_not_of_members() {
        // a and b merge first (identical), then c joins.
        // Centroid of centroids: ((1,0) + (0.8,0.6)) / 2 = (0.9, 0.3)
        // True member mean would be (0.933.., 0.2)
        let observations = vec![
            obs("a", "a", vec![1.0, 0.0]),
            obs("b", "b", vec![1.0, 0.0]),
            obs("c", "c", vec![0.8, 0.6]),
        ];
        let clusters = cluster(&observations).unwrap();
        assert_eq!(clusters.len(), 1);
        let centroid = &clusters[0].centroid;
        assert_eq!(centroid.len(), 2);
        assert!((centroid[0] - 0.9).abs() < 1e-6, "got {:?}", centroid);
        assert!((centroid[1] - 0.3).abs() < 1e-6, "got {:?}", centroid);
    }

    #[test]
    fn ties_resolve_to_lowest_pair() {
        // (0,1) and (0,2) and (1,2) all have similarity 1.0: (0,1) merges first
        let observations = vec![
            obs("a", "zero", vec![1.0, 1.0]),
            obs("b", "one", vec![1.0, 1.0]),
            obs("c", "two", vec![1.0, 1.0]),
        ];
        let clusters = cluster(&observations).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].theme_labels(), vec!["two", "zero", "one"]);
    }

    #[test]
    fn input_order_decides_which_tied_pair_merges() {
        // cos(a, b) == cos(b, c) exactly; cos(a, c) == 0
        let a = obs("doc-a", "alpha", vec![1.0, 1.0, 0.0, 0.0]);
        let b = obs("doc-b", "beta", vec![1.0, 1.0, 1.0, 1.0]);
        let c = obs("doc-c", "gamma", vec![0.0, 0.0, 1.0, 1.0]);

        let forward = cluster(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let labels: Vec<Vec<&str>> = forward.iter().map(|k| k.theme_labels()).collect();
        assert_eq!(labels, vec![vec!["gamma"], vec!["alpha", "beta"]]);
        assert_eq!(forward[1].centroid, vec![1.0, 1.0, 0.5, 0.5]);

        let reversed = cluster(&[c, b, a]).unwrap();
        let labels: Vec<Vec<&str>> = reversed.iter().map(|k| k.theme_labels()).collect();
        assert_eq!(labels, vec![vec!["alpha"], vec!["gamma", "beta"]]);
        assert_eq!(reversed[1].name, "gamma");
        assert_eq!(reversed[1].centroid, vec![0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster(&[]).unwrap().is_empty());
    }

    // --- Scenario: validation ---

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let observations = vec![
            obs("a", "x", vec![1.0, 0.0]),
            obs("b", "y", vec![1.0, 0.0, 0.0]),
        ];
        let err = cluster(&observations).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn non_finite_embedding_is_rejected() {
        let observations = vec![obs("a", "x", vec![f32::NAN, 0.0])];
        assert!(matches!(cluster(&observations), Err(AnalysisError::NonFinite { .. })));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let observations = vec![obs("a", "x", vec![1.0])];
        assert!(matches!(
            cluster_with_threshold(&observations, f64::NAN),
            Err(AnalysisError::InvalidThreshold(_))
        ));
    }

    // --- Scenario: discourse gaps ---

    #[test]
    fn distant_clusters_form_gaps_sorted_widest_first() {
        let observations = vec![
            obs("a", "innovation", vec![1.0, 0.0]),
            obs("b", "rights", vec![0.0, 1.0]),
            obs("c", "opposition", vec![-1.0, 0.0]),
        ];
        let config = ClusterConfig::default();
        let clusters = cluster_with_config(&observations, &config).unwrap();
        assert_eq!(clusters.len(), 3);

        let gaps = find_discourse_gaps(&clusters, &config).unwrap();
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0].id, "hole-cluster-0-cluster-2");
        assert_eq!(gaps[0].distance, 2.0);
        assert_eq!(gaps[1].distance, 1.0);
        assert_eq!(gaps[1].id, "hole-cluster-0-cluster-1");
    }

    #[test]
    fn gaps_are_truncated_to_max() {
        let observations = vec![
            obs("a", "a", vec![1.0, 0.0]),
            obs("b", "b", vec![0.0, 1.0]),
            obs("c", "c", vec![-1.0, 0.0]),
        ];
        let config = ClusterConfig {
            max_gaps: 1,
            ..ClusterConfig::default()
        };
        let clusters = cluster_with_config(&observations, &config).unwrap();
        let gaps = find_discourse_gaps(&clusters, &config).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].distance, 2.0);
    }

    #[test]
    fn close_clusters_are_not_gaps() {
        let observations = vec![
            obs("a", "a", vec![1.0, 0.0]),
            obs("b", "b", vec![0.9, 0.5]),
        ];
        // Threshold 0.95 keeps them apart; distance ~0.126 is below 0.4
        let config = ClusterConfig {
            similarity_threshold: 0.95,
            ..ClusterConfig::default()
        };
        let clusters = cluster_with_config(&observations, &config).unwrap();
        assert_eq!(clusters.len(), 2);
        assert!(find_discourse_gaps(&clusters, &config).unwrap().is_empty());
    }
}
