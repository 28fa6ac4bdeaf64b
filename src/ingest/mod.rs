//! Boundary parsing of raw model output
//!
//! Upstream extraction produces loosely shaped JSON: fields may be missing,
//! spelled in camelCase or snake_case, or carry numbers where strings are
//! expected. The parsers here turn a `serde_json::Value` into the typed
//! inputs of [`crate::analysis`], treating every field as optional and
//! logging what they drop.
//!
//! Each parser accepts either a bare array or an object that wraps the array
//! under a conventional key (`themes`, `traces`, `actors`, `absences`,
//! `links`, `relationships`, `members`).

mod parse;

pub use parse::{
    parse_absent_assertions, parse_entities, parse_evidence_traces, parse_links, parse_member_ids,
    parse_relationship, parse_relationships, parse_theme_observations,
};
