use crate::analysis::score_relationship;
use crate::model::{
    AbsentAssertion, AnalysisError, AnalysisResult, ConfidenceLevel, DimensionScore, Durability,
    Entity, EntityId, EvidenceTrace, GraphLink, MediatorDimensions, MetricValue, Metrics,
    Relationship, ThemeObservation, TraceType,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

// UUID v5 namespace for content-derived trace ids
const TRACE_NS: uuid::Uuid = uuid::Uuid::from_bytes([
    0x3f, 0x2a, 0x91, 0x5e, 0x4c, 0x7d, 0x4b, 0x1a,
    0x9e, 0x63, 0x0d, 0x52, 0xb8, 0xe4, 0x17, 0xc6,
]);

/// The records in `value`: the value itself when it is an array, or the
/// array under the first matching wrapper key.
fn records<'a>(value: &'a Value, wrapper_keys: &[&str], what: &str) -> &'a [Value] {
    if let Some(items) = value.as_array() {
        return items;
    }
    if let Some(obj) = value.as_object() {
        for key in wrapper_keys {
            if let Some(items) = obj.get(*key).and_then(|v| v.as_array()) {
                return items;
            }
        }
    }
    if !value.is_null() {
        warn!(kind = what, "expected an array of records, found none");
    }
    &[]
}

/// First non-empty string under any of `keys`. Numbers and booleans are
/// coerced to their text form.
fn text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// A reference to an entity: a bare id string or an object carrying `id`.
fn entity_ref(record: &Value, keys: &[&str]) -> Option<EntityId> {
    keys.iter().find_map(|key| {
        let v = record.get(*key)?;
        let id = match v {
            Value::Object(_) => text(v, &["id"]),
            _ => text(record, &[*key]),
        }?;
        Some(EntityId::from_string(id))
    })
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn embedding(value: &Value) -> Option<Vec<f32>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_f64().map(|f| f as f32))
        .collect()
}

fn metric_value(value: &Value) -> Option<MetricValue> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(MetricValue::Int(i))
            } else {
                n.as_f64().map(MetricValue::Float)
            }
        }
        Value::String(s) => Some(MetricValue::Text(s.clone())),
        Value::Bool(b) => Some(MetricValue::Bool(*b)),
        _ => None,
    }
}

/// Parse theme observations.
///
/// Records without a theme, or whose embedding is missing or not all numbers,
/// are dropped.
pub fn parse_theme_observations(value: &Value) -> Vec<ThemeObservation> {
    let mut observations = Vec::new();
    for (index, record) in records(value, &["themes", "observations"], "themes").iter().enumerate() {
        let Some(theme) = text(record, &["theme", "name"]) else {
            warn!(index, "dropping theme observation without a theme");
            continue;
        };
        let Some(vector) = record.get("embedding").and_then(embedding) else {
            warn!(index, theme = %theme, "dropping theme observation without a numeric embedding");
            continue;
        };
        observations.push(ThemeObservation::new(
            text(record, &["sourceId", "source_id", "source"]).unwrap_or_default(),
            theme,
            text(record, &["quote", "evidence_quote"]).unwrap_or_default(),
            vector,
        ));
    }
    observations
}

/// Parse evidence traces.
///
/// The type label is case-insensitive and unknown types drop the record.
/// Unknown or missing durability falls back to `Low`. A missing id is
/// replaced with a UUID v5 of the trace content, so re-parsing the same
/// document yields the same ids.
pub fn parse_evidence_traces(value: &Value) -> Vec<EvidenceTrace> {
    let mut traces = Vec::new();
    for (index, record) in records(value, &["traces", "evidence"], "traces").iter().enumerate() {
        let label = text(record, &["type", "traceType", "trace_type"]).unwrap_or_default();
        let Some(trace_type) = TraceType::parse(&label) else {
            warn!(index, label = %label, "dropping trace with unknown type");
            continue;
        };

        let durability_label = text(record, &["durability"]).unwrap_or_default();
        let durability = Durability::parse(&durability_label).unwrap_or_else(|| {
            warn!(index, label = %durability_label, "unknown durability, using Low");
            Durability::Low
        });

        let source_actor = text(record, &["sourceActor", "source_actor", "source", "actor"]).unwrap_or_default();
        let content = text(record, &["content", "quote", "text"]).unwrap_or_default();
        let id = text(record, &["id"]).unwrap_or_else(|| {
            let hash_input = format!("{}:{}:{}", source_actor, trace_type, content);
            uuid::Uuid::new_v5(&TRACE_NS, hash_input.as_bytes()).to_string()
        });

        let mut trace = EvidenceTrace::new(id, source_actor, content, trace_type, durability);
        if let Some(target) = text(record, &["targetActor", "target_actor", "target"]) {
            trace = trace.with_target(target);
        }
        if let Some(description) = text(record, &["description"]) {
            trace = trace.with_description(description);
        }
        traces.push(trace);
    }
    traces
}

/// Parse physical entities. Records without a name are dropped; a missing
/// id falls back to the name.
pub fn parse_entities(value: &Value) -> Vec<Entity> {
    let mut entities = Vec::new();
    for (index, record) in records(value, &["actors", "entities", "nodes"], "actors").iter().enumerate() {
        let Some(name) = text(record, &["name", "label"]) else {
            warn!(index, "dropping entity without a name");
            continue;
        };
        let id = text(record, &["id"]).unwrap_or_else(|| name.clone());
        let entity_type = text(record, &["type", "role", "category"]).unwrap_or_default();

        let mut entity = Entity::new(id, name, entity_type);
        if let Some(description) = text(record, &["description"]) {
            entity = entity.with_description(description);
        }
        entity.is_ghost = record
            .get("isGhost")
            .or_else(|| record.get("is_ghost"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if let Some(obj) = record.get("metrics").and_then(Value::as_object) {
            entity.metrics = obj
                .iter()
                .filter_map(|(k, v)| metric_value(v).map(|mv| (k.clone(), mv)))
                .collect::<Metrics>();
        }
        entities.push(entity);
    }
    entities
}

/// Parse absent-actor assertions. Nothing is dropped here; unnamed
/// assertions are skipped later by the merge.
pub fn parse_absent_assertions(value: &Value) -> Vec<AbsentAssertion> {
    records(value, &["absences", "absent_actors", "absentActors", "ghosts"], "absences")
        .iter()
        .map(|record| AbsentAssertion {
            name: text(record, &["name", "actor", "label"]),
            reason: text(record, &["reason", "description"]),
            category: text(record, &["category"]),
            role: text(record, &["role"]),
            entity_type: text(record, &["type", "actor_type", "actorType"]),
            id: text(record, &["id"]),
        })
        .collect()
}

/// Parse links. Endpoints may be id strings or objects with an `id` field.
pub fn parse_links(value: &Value) -> Vec<GraphLink> {
    let mut links = Vec::new();
    for (index, record) in records(value, &["links", "edges"], "links").iter().enumerate() {
        let source = entity_ref(record, &["source", "from"]);
        let target = entity_ref(record, &["target", "to"]);
        let (Some(source), Some(target)) = (source, target) else {
            warn!(index, "dropping link without both endpoints");
            continue;
        };
        let label = text(record, &["label", "type", "relationship"]).unwrap_or_default();
        links.push(GraphLink::new(source, target, label));
    }
    links
}

/// Parse a set of member ids for porosity.
pub fn parse_member_ids(value: &Value) -> HashSet<EntityId> {
    records(value, &["members", "memberIds", "member_ids"], "members")
        .iter()
        .filter_map(|v| match v {
            Value::Object(_) => text(v, &["id"]),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
        .map(EntityId::from_string)
        .collect()
}

fn dimension_score(name: &str, value: Option<&Value>) -> AnalysisResult<DimensionScore> {
    let value = value.ok_or_else(|| AnalysisError::InvalidInput(format!("missing dimension {}", name)))?;
    if let Some(score) = number(value) {
        return Ok(DimensionScore::new(score, ""));
    }
    let score = value
        .get("score")
        .and_then(number)
        .ok_or_else(|| AnalysisError::InvalidInput(format!("dimension {} has no numeric score", name)))?;
    let mut dim = DimensionScore::new(score, text(value, &["justification", "reason"]).unwrap_or_default());
    if let Some(confidence) = text(value, &["confidence"]).and_then(|c| ConfidenceLevel::parse(&c)) {
        dim.confidence = confidence;
    }
    Ok(dim)
}

/// Parse one scored relationship.
///
/// Accepts the full form, with `dimensions` holding `{score, justification}`
/// objects, or the lite form, with `scores` holding plain numbers or the
/// same objects. All five dimensions are required. An explicit
/// `mediatorScore` overrides the mean.
pub fn parse_relationship(record: &Value) -> AnalysisResult<Relationship> {
    let scores = record
        .get("dimensions")
        .or_else(|| record.get("scores"))
        .filter(|v| v.is_object())
        .ok_or_else(|| AnalysisError::InvalidInput("relationship has no dimensions or scores".into()))?;

    let dimensions = MediatorDimensions {
        transformation: dimension_score("transformation", scores.get("transformation"))?,
        stability: dimension_score("stability", scores.get("stability"))?,
        multiplicity: dimension_score("multiplicity", scores.get("multiplicity"))?,
        generativity: dimension_score("generativity", scores.get("generativity"))?,
        contestation: dimension_score("contestation", scores.get("contestation"))?,
    };

    let source = entity_ref(record, &["source", "from"]).unwrap_or_else(|| EntityId::from_string(""));
    let target = entity_ref(record, &["target", "to"]).unwrap_or_else(|| EntityId::from_string(""));
    let id = text(record, &["id"]).unwrap_or_else(|| format!("{}->{}", source, target));
    let relationship_type = text(record, &["type", "label"]).unwrap_or_default();
    let explicit = record
        .get("mediatorScore")
        .or_else(|| record.get("mediator_score"))
        .and_then(number);

    score_relationship(id, source, target, relationship_type, dimensions, explicit)
}

/// Parse a list of relationships, dropping the ones that fail to parse.
pub fn parse_relationships(value: &Value) -> Vec<Relationship> {
    records(value, &["relationships"], "relationships")
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match parse_relationship(record) {
            Ok(rel) => Some(rel),
            Err(e) => {
                warn!(index, error = %e, "dropping relationship");
                None
            }
        })
        .collect()
}
