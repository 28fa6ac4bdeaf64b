//! Group-boundary porosity over an actor/link graph
//!
//! A link is internal when both endpoints are members, external when exactly
//! one is, and ignored otherwise. Porosity is the external share of the links
//! incident to the group and stability the internal share.

use crate::model::{EntityId, GraphLink};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Link counts and porosity for one member set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PorosityReport {
    pub internal: usize,
    pub external: usize,
    /// Links touching the group: `internal + external`
    pub total: usize,
    /// Links with no member endpoint
    pub ignored: usize,
    /// `external / total`, or 0.0 when no link touches the group
    pub porosity: f64,
    /// `internal / total`, or 0.0 when no link touches the group
    pub stability: f64,
}

/// Compute porosity of `member_ids` over `links`.
pub fn compute_porosity(member_ids: &HashSet<EntityId>, links: &[GraphLink]) -> PorosityReport {
    let mut internal = 0;
    let mut external = 0;
    let mut ignored = 0;

    for link in links {
        match (member_ids.contains(&link.source), member_ids.contains(&link.target)) {
            (true, true) => internal += 1,
            (true, false) | (false, true) => external += 1,
            (false, false) => ignored += 1,
        }
    }

    let total = internal + external;
    let share = |count: usize| if total > 0 { count as f64 / total as f64 } else { 0.0 };
    let porosity = share(external);
    let stability = share(internal);

    debug!(members = member_ids.len(), internal, external, ignored, porosity, stability, "porosity computed");

    PorosityReport {
        internal,
        external,
        total,
        ignored,
        porosity,
        stability,
    }
}
