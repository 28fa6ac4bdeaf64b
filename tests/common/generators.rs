//! Seeded random inputs for property-style tests

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata::model::{Durability, EvidenceTrace, GraphLink, ThemeObservation, TraceType};

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `count` links between `node-0..node-{nodes}`, self-loops included.
pub fn random_links(rng: &mut StdRng, nodes: usize, count: usize) -> Vec<GraphLink> {
    (0..count)
        .map(|_| {
            let s = rng.gen_range(0..nodes);
            let t = rng.gen_range(0..nodes);
            GraphLink::new(format!("node-{}", s), format!("node-{}", t), "Relates")
        })
        .collect()
}

/// Observations with `dim`-dimensional embeddings in [-1, 1].
///
/// Every fifth vector is a copy of the previous one so that merges happen.
pub fn random_observations(rng: &mut StdRng, count: usize, dim: usize) -> Vec<ThemeObservation> {
    let mut out: Vec<ThemeObservation> = Vec::with_capacity(count);
    for i in 0..count {
        let embedding = match out.last() {
            Some(prev) if i % 5 == 4 => prev.embedding.clone(),
            _ => (0..dim).map(|_| rng.gen_range(-1.0f32..1.0)).collect(),
        };
        out.push(ThemeObservation::new(
            format!("doc-{}", rng.gen_range(0..4)),
            format!("theme-{}", i),
            "",
            embedding,
        ));
    }
    out
}

pub fn random_traces(rng: &mut StdRng, count: usize) -> Vec<EvidenceTrace> {
    const TYPES: [TraceType; 4] = [
        TraceType::Rule,
        TraceType::Enforcement,
        TraceType::Narrative,
        TraceType::Resource,
    ];
    const DURABILITIES: [Durability; 3] = [Durability::High, Durability::Medium, Durability::Low];

    (0..count)
        .map(|i| {
            EvidenceTrace::new(
                format!("t{}", i),
                "actor",
                format!("evidence {}", i),
                TYPES[rng.gen_range(0..TYPES.len())],
                DURABILITIES[rng.gen_range(0..DURABILITIES.len())],
            )
        })
        .collect()
}
