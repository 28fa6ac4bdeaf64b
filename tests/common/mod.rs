//! Common test utilities for strata integration tests
//!
//! This module provides a shared policy fixture and seeded generators for
//! property-style checks.

#![allow(dead_code)]

pub mod fixtures;
pub mod generators;

pub use fixtures::{policy_document, POLICY_TEXT};
pub use generators::{random_links, random_observations, random_traces, seeded};
