//! Serialization tests with wire-compatible fixtures

use serde_json::{json, Value};

/// Fixture: an actor as the extraction layer emits it
fn actor_fixture() -> Value {
    json!({
        "id": "actor:anpd",
        "name": "National Data Protection Authority",
        "type": "Policymaker",
        "description": "Supervisory authority named in Article 12",
        "metrics": {
            "territorialization": "Strong",
            "influence": 8
        }
    })
}

/// Fixture: an evidence trace with camelCase fields
fn trace_fixture() -> Value {
    json!({
        "id": "trace-7",
        "sourceActor": "actor:anpd",
        "targetActor": "actor:providers",
        "content": "The authority may suspend high-risk systems.",
        "type": "Enforcement",
        "durability": "High",
        "description": "Suspension power"
    })
}

/// Fixture: a fully scored relationship
fn relationship_fixture() -> Value {
    let dim = |score: f64| json!({ "score": score, "justification": "from traces", "confidence": "high" });
    json!({
        "id": "rel-1",
        "source": "actor:anpd",
        "target": "actor:providers",
        "type": "regulates",
        "dimensions": {
            "transformation": dim(0.8),
            "stability": dim(0.6),
            "multiplicity": dim(0.4),
            "generativity": dim(0.7),
            "contestation": dim(0.5)
        },
        "mediatorScore": 0.6,
        "classification": "weak_mediator"
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::model::{
        ConfidenceLevel, Durability, Entity, EntityId, EvidenceTrace, GraphLink,
        MediatorClassification, MetricValue, Relationship, ThemeObservation, TraceType,
    };

    #[test]
    fn entity_id_serializes_as_string() {
        let id = EntityId::from_string("actor:anpd");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"actor:anpd\"");
    }

    #[test]
    fn can_deserialize_actor_fixture() {
        let entity: Entity = serde_json::from_value(actor_fixture()).unwrap();
        assert_eq!(entity.id.as_str(), "actor:anpd");
        assert_eq!(entity.entity_type, "Policymaker");
        assert!(!entity.is_ghost, "isGhost defaults to false");
        assert_eq!(
            entity.metrics.get("territorialization"),
            Some(&MetricValue::Text("Strong".to_string()))
        );
        assert_eq!(entity.metrics.get("influence"), Some(&MetricValue::Int(8)));
    }

    #[test]
    fn serialized_entity_uses_type_and_camel_case() {
        let entity = Entity::new("actor:a", "A", "Academic");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "Academic");
        assert_eq!(json["isGhost"], false);
        assert!(json.get("entity_type").is_none());
    }

    #[test]
    fn can_deserialize_trace_fixture() {
        let trace: EvidenceTrace = serde_json::from_value(trace_fixture()).unwrap();
        assert_eq!(trace.trace_type, TraceType::Enforcement);
        assert_eq!(trace.durability, Durability::High);
        assert_eq!(trace.target_actor.as_deref(), Some("actor:providers"));
        assert_eq!(trace.summary(), "Suspension power");
    }

    #[test]
    fn trace_optional_fields_skipped_when_none() {
        let trace = EvidenceTrace::new("t", "a", "c", TraceType::Rule, Durability::Low);
        let json = serde_json::to_value(&trace).unwrap();
        assert!(json.get("targetActor").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["type"], "Rule");
    }

    #[test]
    fn can_deserialize_relationship_fixture() {
        let rel: Relationship = serde_json::from_value(relationship_fixture()).unwrap();
        assert_eq!(rel.classification, MediatorClassification::WeakMediator);
        assert_eq!(rel.dimensions.transformation.confidence, ConfidenceLevel::High);
        assert!((rel.dimensions.mean_score() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn classification_serializes_snake_case() {
        let json = serde_json::to_string(&MediatorClassification::StrongIntermediary).unwrap();
        assert_eq!(json, "\"strong_intermediary\"");
    }

    #[test]
    fn theme_observation_reads_camel_case_source_id() {
        let obs: ThemeObservation = serde_json::from_value(json!({
            "sourceId": "doc-1",
            "theme": "risk-based regulation",
            "quote": "a risk-based approach",
            "embedding": [0.1, 0.2]
        }))
        .unwrap();
        assert_eq!(obs.source_id, "doc-1");
        assert_eq!(obs.embedding.len(), 2);
    }

    #[test]
    fn link_label_is_optional() {
        let link: GraphLink = serde_json::from_value(json!({"source": "a", "target": "b"})).unwrap();
        assert_eq!(link.label, "");
        assert_eq!(link.source, EntityId::from("a"));
    }
}
