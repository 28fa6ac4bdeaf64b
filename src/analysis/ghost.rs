//! Ghost entity identity and merging
//!
//! Two identity schemes coexist here and are deliberately kept apart:
//!
//! - [`fingerprint`]: SHA-256 over `(context, normalized name, sorted
//!   normalized themes)`. Storage layers key ghosts by this, so repeated
//!   extraction runs asserting the same absence collapse to one record.
//! - [`ghost_id`]: a `ghost-` slug of the name used by [`merge_ghosts`].
//!   It ignores context and themes and folds punctuation, so distinct
//!   assertions can share an id.
//!
//! Until one canonical identity is chosen, both behaviors are preserved.

use crate::config::GhostConfig;
use crate::model::{AbsentAssertion, Entity, EntityId};
use regex_lite::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

fn non_alphanumeric_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"))
}

fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Content fingerprint for a ghost assertion.
///
/// Case and surrounding whitespace of the name and themes are ignored, and
/// theme order does not matter. Interior punctuation is kept.
pub fn fingerprint(name: &str, context_key: &str, themes: Option<&[String]>) -> String {
    let normalized_name = normalize_label(name);
    let themes_joined = themes
        .map(|ts| {
            let mut normalized: Vec<String> = ts.iter().map(|t| normalize_label(t)).collect();
            normalized.sort();
            normalized.join("|")
        })
        .unwrap_or_default();
    let raw = format!("{}:{}:{}", context_key, normalized_name, themes_joined);

    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Name-derived id used by the merge path: `ghost-` plus a lowercase slug.
pub fn ghost_id(name: &str) -> EntityId {
    let lowered = name.trim().to_lowercase();
    let slug = non_alphanumeric_runs().replace_all(&lowered, "-");
    EntityId::from_string(format!("ghost-{}", slug.trim_matches('-')))
}

/// Lowercase alphanumeric-only form used to match ghosts against physical names.
fn compact_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

const PLACEHOLDER_TYPE_PREFIX: &str = "Missing Voice";

/// Explicit type, else keyword-mapped role or category, else the raw label, else the default.
fn resolve_type(absence: &AbsentAssertion, config: &GhostConfig) -> String {
    if let Some(explicit) =
        non_empty(&absence.entity_type).filter(|t| !t.starts_with(PLACEHOLDER_TYPE_PREFIX))
    {
        return explicit.to_string();
    }

    let Some(label) = non_empty(&absence.role).or_else(|| non_empty(&absence.category)) else {
        return config.default_type.clone();
    };
    let lowered = label.to_lowercase();
    config
        .type_keywords
        .iter()
        .find(|entry| entry.matches(&lowered))
        .map(|entry| entry.actor_type.clone())
        .unwrap_or_else(|| label.to_string())
}

/// Upstream id if given (with the `ghost-` prefix enforced), else the name slug.
fn resolve_id(absence: &AbsentAssertion, name: &str) -> EntityId {
    match non_empty(&absence.id) {
        Some(id) if id.starts_with("ghost-") => EntityId::from_string(id),
        Some(id) => EntityId::from_string(format!("ghost-{}", id)),
        None => ghost_id(name),
    }
}

/// Merge ghost assertions into the physical entity list.
///
/// Physical entities come first, unchanged apart from `is_ghost = false`.
/// Each assertion with a non-empty name becomes a ghost appended after them,
/// unless its compact name matches a physical entity. Inputs are not mutated.
pub fn merge_ghosts(
    physical: &[Entity],
    absences: &[AbsentAssertion],
    config: &GhostConfig,
) -> Vec<Entity> {
    let mut merged: Vec<Entity> = physical
        .iter()
        .map(|e| Entity {
            is_ghost: false,
            ..e.clone()
        })
        .collect();

    let existing: HashSet<String> = physical.iter().map(|e| compact_name(&e.name)).collect();
    let mut skipped_unnamed = 0usize;
    let mut skipped_present = 0usize;

    for absence in absences {
        let Some(name) = non_empty(&absence.name) else {
            skipped_unnamed += 1;
            continue;
        };
        if existing.contains(&compact_name(name)) {
            skipped_present += 1;
            continue;
        }

        let description = non_empty(&absence.reason).unwrap_or(config.default_description.as_str());

        merged.push(Entity {
            id: resolve_id(absence, name),
            name: name.to_string(),
            entity_type: resolve_type(absence, config),
            description: description.to_string(),
            is_ghost: true,
            metrics: config.default_metrics.clone(),
        });
    }

    debug!(
        physical = physical.len(),
        ghosts = merged.len() - physical.len(),
        skipped_unnamed,
        skipped_present,
        "ghost merge complete"
    );
    merged
}
