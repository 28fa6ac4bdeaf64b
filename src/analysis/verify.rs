//! Evidence verification: is a claimed quotation really in the source text?
//!
//! Matching runs in three stages, first hit wins:
//!
//! 1. Both strings are normalized (lowercase, single spaces, no punctuation)
//!    and the quote is searched as a substring.
//! 2. Both strings are compacted to ASCII letters and digits only and
//!    searched again. This absorbs hyphenation and spacing drift, so
//!    "risk-based" and "risk based" verify as equal. Words can also match
//!    across a boundary in the reference; that false positive is accepted.
//! 3. Quotes elided with `...` or `…` are split into fragments that must
//!    appear in the normalized reference in order.
//!
//! Whitespace is collapsed with Unicode semantics, so a non-breaking space
//! in a PDF extract separates words like any other space.

use crate::config::VerifierConfig;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

fn non_word_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w ]").expect("non-word pattern is valid"))
}

fn ellipsis() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\.\.|…").expect("ellipsis pattern is valid"))
}

fn embedded_quote() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]{20,})""#).expect("embedded quote pattern is valid"))
}

/// Lowercase, collapse whitespace, strip everything but word characters and spaces.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    // split_whitespace follows Unicode White_Space, NBSP included
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    non_word_chars().replace_all(&collapsed, "").trim().to_string()
}

/// Lowercase ASCII letters and digits only.
fn compact_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// A reference text prepared once for many lookups
struct Reference {
    normalized: String,
    compact: String,
}

impl Reference {
    fn new(text: &str) -> Self {
        Self {
            normalized: normalize_text(text),
            compact: compact_text(text),
        }
    }

    fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Verify a quote against a reference text with default settings.
pub fn verify_quote(quote: &str, reference: &str) -> bool {
    verify_quote_with(quote, reference, &VerifierConfig::default())
}

/// Verify a quote against a reference text.
///
/// A quote or reference that normalizes to nothing never verifies.
pub fn verify_quote_with(quote: &str, reference: &str, config: &VerifierConfig) -> bool {
    verify_against(quote, &Reference::new(reference), config)
}

fn verify_against(quote: &str, reference: &Reference, config: &VerifierConfig) -> bool {
    let normalized_quote = normalize_text(quote);
    if normalized_quote.is_empty() || reference.is_empty() {
        return false;
    }

    if reference.normalized.contains(&normalized_quote) {
        return true;
    }

    let compact_quote = compact_text(quote);
    if !compact_quote.is_empty() && reference.compact.contains(&compact_quote) {
        return true;
    }

    let fragments: Vec<&str> = ellipsis().split(quote).collect();
    if fragments.len() < 2 {
        return false;
    }

    // Each fragment must start after the previous match ends
    let mut cursor = 0;
    for fragment in fragments {
        let normalized = normalize_text(fragment);
        if normalized.len() < config.min_fragment_len {
            continue;
        }
        match reference.normalized[cursor..].find(&normalized) {
            Some(offset) => cursor += offset + normalized.len(),
            None => {
                debug!(fragment = %normalized, cursor, "elided fragment not found in order");
                return false;
            }
        }
    }
    true
}

/// One quotation found while auditing an analysis document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedQuote {
    pub text: String,
    pub verified: bool,
    /// 1.0 when verified, 0.0 otherwise
    pub confidence: f64,
    /// Dotted JSON path of the quote, rooted at `analysis`
    pub path: String,
}

impl VerifiedQuote {
    fn new(text: &str, verified: bool, path: String) -> Self {
        Self {
            text: text.to_string(),
            verified,
            confidence: if verified { 1.0 } else { 0.0 },
            path,
        }
    }
}

/// Walk an analysis document and verify every quotation in it.
///
/// Explicit `quote` and `evidence_quote` string fields are always reported.
/// Free strings containing a double-quoted passage of 20+ characters are
/// reported only when the passage verifies, or when the reference is empty
/// (so the caller sees what could not be checked).
pub fn verify_quotes(reference: &str, analysis: &Value, config: &VerifierConfig) -> Vec<VerifiedQuote> {
    let reference = Reference::new(reference);
    let mut quotes = Vec::new();
    walk(analysis, "analysis".to_string(), &reference, config, &mut quotes);
    debug!(
        total = quotes.len(),
        verified = quotes.iter().filter(|q| q.verified).count(),
        "quote audit complete"
    );
    quotes
}

fn walk(
    value: &Value,
    path: String,
    reference: &Reference,
    config: &VerifierConfig,
    out: &mut Vec<VerifiedQuote>,
) {
    match value {
        Value::String(s) => {
            if let Some(captured) = embedded_quote().captures(s).and_then(|c| c.get(1)) {
                let text = captured.as_str();
                let verified = verify_against(text, reference, config);
                if verified || reference.is_empty() {
                    out.push(VerifiedQuote::new(text, verified, path));
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, format!("{}.{}", path, i), reference, config, out);
            }
        }
        Value::Object(map) => {
            for field in ["quote", "evidence_quote"] {
                if let Some(Value::String(text)) = map.get(field) {
                    let verified = verify_against(text, reference, config);
                    out.push(VerifiedQuote::new(text, verified, format!("{}.{}", path, field)));
                }
            }
            for (key, child) in map {
                if key == "quote" || key == "evidence_quote" || key == "verified_quotes" {
                    continue;
                }
                walk(child, format!("{}.{}", path, key), reference, config, out);
            }
        }
        _ => {}
    }
}
