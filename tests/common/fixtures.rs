//! A small policy document as upstream extraction would emit it

use serde_json::{json, Value};

pub const POLICY_TEXT: &str = "Article 5. The National Data Protection Authority (ANPD) shall \
supervise compliance and may impose fines of up to 2% of annual revenue. Companies must \
publish transparency reports annually. Civil society organizations may be consulted at the \
discretion of the Authority.";

/// Raw extraction output for [`POLICY_TEXT`].
///
/// Field spellings are deliberately mixed to exercise the ingest aliases,
/// and a few records are malformed on purpose.
pub fn policy_document() -> Value {
    json!({
        "reference": POLICY_TEXT,
        "themes": [
            {"sourceId": "doc-1", "theme": "Regulatory oversight", "quote": "shall supervise compliance",
             "embedding": [1.0, 0.0, 0.0]},
            {"source_id": "doc-2", "theme": "Supervisory authority", "embedding": [0.95, 0.05, 0.0]},
            {"sourceId": "doc-1", "theme": "Innovation incentives", "embedding": [0.0, 1.0, 0.0]},
            {"source": "doc-3", "theme": "Market competitiveness", "embedding": [0.1, 0.9, 0.0]},
            {"sourceId": "doc-2", "theme": "Public participation", "embedding": [0.0, 0.0, 1.0]},
            {"sourceId": "doc-4", "theme": "Broken vector", "embedding": "n/a"}
        ],
        "traces": [
            {"id": "t1", "sourceActor": "anpd", "content": "Article 5 establishes the ANPD",
             "type": "Rule", "durability": "High"},
            {"id": "t2", "sourceActor": "anpd", "targetActor": "big-tech",
             "content": "may impose fines of up to 2% of annual revenue",
             "type": "enforcement", "durability": "HIGH"},
            {"id": "t3", "source_actor": "anpd", "content": "Data protection as a fundamental right",
             "type": "Narrative", "durability": "Medium", "description": "Rights framing"},
            {"id": "t4", "sourceActor": "treasury", "content": "Budget line for the Authority",
             "type": "Resource", "durability": "Low"},
            {"id": "t5", "sourceActor": "press", "content": "Rumored delay", "type": "Rumor", "durability": "Low"}
        ],
        "actors": [
            {"id": "anpd", "name": "ANPD", "type": "Policymaker"},
            {"id": "big-tech", "name": "Big Tech", "type": "PrivateTech",
             "metrics": {"territorialization": "Strong", "coding": 8}},
            {"id": "civil-society", "name": "Civil Society Orgs", "type": "Civil Society"},
            {"id": "academia", "name": "Academia", "type": "Academic"}
        ],
        "absences": [
            {"name": "Indigenous Communities", "reason": "Not mentioned in any consultation clause"},
            {"name": "civil-society orgs", "reason": "Duplicate of a physical actor"},
            {"reason": "Model forgot the name"},
            {"name": "Gig Workers", "role": "Labor"}
        ],
        "links": [
            {"source": "anpd", "target": "big-tech", "label": "regulates"},
            {"source": "anpd", "target": {"id": "civil-society"}, "label": "consults"},
            {"source": "big-tech", "target": "academia", "label": "funds"},
            {"source": "academia", "target": "civil-society", "label": "advises"},
            {"source": {"id": "big-tech"}, "target": "anpd", "label": "lobbies"}
        ],
        "members": ["anpd", "big-tech"],
        "relationships": [
            {"id": "r1", "source": "anpd", "target": "big-tech", "type": "regulates",
             "dimensions": {
                 "transformation": {"score": 0.8, "justification": "Rewrites disclosure duties"},
                 "stability": {"score": 0.6},
                 "multiplicity": {"score": 0.4},
                 "generativity": {"score": 0.7},
                 "contestation": {"score": 0.5}
             }},
            {"id": "r2", "source": "academia", "target": "civil-society", "type": "advises",
             "scores": {"transformation": 0.1, "stability": 0.2, "multiplicity": 0.1,
                        "generativity": 0.2, "contestation": 0.1}},
            {"id": "r3", "source": "press", "target": "anpd", "scores": {"transformation": 0.5}}
        ],
        "analysis": {
            "themes": [
                {"theme": "Oversight",
                 "quote": "The National Data Protection Authority (ANPD) shall supervise compliance"}
            ],
            "summary": "The text says \"Companies must publish transparency reports annually\" with no sanction.",
            "claims": [
                {"claim": "Cloud ban", "evidence_quote": "The Authority shall ban all cloud providers"}
            ],
            "verified_quotes": [{"quote": "Never audited again"}]
        }
    })
}
