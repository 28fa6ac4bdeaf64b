//! Strata CLI: JSON in, JSON out.
//!
//! Usage:
//!   strata [--config path] [--input path] [--log-json] <command>
//!
//! Every command except `classify` and `fingerprint` reads one JSON document
//! from `--input` (or stdin) and prints its result as JSON on stdout.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use strata::{ingest, AnalyticsEngine, EngineConfig};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "strata",
    version,
    about = "Deterministic analytics for extracted policy assemblages"
)]
struct Cli {
    /// Path to a YAML config file (default: <config_dir>/strata/config.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Read the input document from this file instead of stdin
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    /// Emit logs to stderr as JSON
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify quotes against a reference text: {"reference", "quote" | "quotes"}
    Verify,
    /// Find and verify every quote in an analysis document: {"reference", "analysis"}
    AuditQuotes,
    /// Cluster theme observations and report discourse gaps: {"themes"}
    Cluster,
    /// Territorialization and coding scores: {"traces"}
    Metrics,
    /// Boundary porosity of a member set: {"members", "links"}
    Porosity,
    /// Score and classify relationships: {"relationships"}
    Relationships,
    /// Classify a single mediator score
    Classify {
        /// Mediator score in [0, 1]
        score: f64,
    },
    /// Merge absent-actor assertions into the actor list: {"actors", "absences"}
    Ghosts,
    /// Content fingerprint of a ghost assertion
    Fingerprint {
        /// Actor name
        #[arg(long)]
        name: String,
        /// Context key, e.g. a policy id
        #[arg(long)]
        context: String,
        /// Theme labels (repeatable)
        #[arg(long = "theme")]
        themes: Vec<String>,
    },
}

/// Install the global subscriber: text or JSON lines on stderr, filtered by `RUST_LOG`.
fn init_logging(json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| fmt::layer().with_target(true).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
}

fn read_input(path: Option<&Path>) -> Result<Value, String> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| format!("Failed to read {}: {}", p.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buf
        }
    };
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON input: {}", e))
}

fn with_input(path: Option<&Path>, run: impl FnOnce(&Value) -> i32) -> i32 {
    match read_input(path) {
        Ok(doc) => run(&doc),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn reference_text(doc: &Value) -> &str {
    doc.get("reference").and_then(Value::as_str).unwrap_or_default()
}

fn cmd_verify(engine: &AnalyticsEngine, doc: &Value) -> i32 {
    let reference = reference_text(doc);
    let quotes: Vec<&str> = match (doc.get("quote"), doc.get("quotes")) {
        (Some(Value::String(q)), _) => vec![q.as_str()],
        (_, Some(Value::Array(qs))) => qs.iter().filter_map(Value::as_str).collect(),
        _ => {
            eprintln!("Error: input needs a \"quote\" string or a \"quotes\" array");
            return 1;
        }
    };
    let results: Vec<Value> = quotes
        .into_iter()
        .map(|q| json!({"quote": q, "verified": engine.verify_quote(q, reference)}))
        .collect();
    print_json(&results)
}

fn cmd_audit_quotes(engine: &AnalyticsEngine, doc: &Value) -> i32 {
    let analysis = doc.get("analysis").unwrap_or(&Value::Null);
    print_json(&engine.audit_quotes(reference_text(doc), analysis))
}

fn cmd_cluster(engine: &AnalyticsEngine, doc: &Value) -> i32 {
    let observations = ingest::parse_theme_observations(doc);
    let result = engine
        .cluster(&observations)
        .and_then(|clusters| engine.discourse_gaps(&clusters).map(|gaps| (clusters, gaps)));
    match result {
        Ok((clusters, gaps)) => print_json(&json!({"clusters": clusters, "gaps": gaps})),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_metrics(engine: &AnalyticsEngine, doc: &Value) -> i32 {
    let traces = ingest::parse_evidence_traces(doc);
    print_json(&engine.structural_metrics(&traces))
}

fn cmd_porosity(engine: &AnalyticsEngine, doc: &Value) -> i32 {
    let members = ingest::parse_member_ids(doc);
    let links = ingest::parse_links(doc);
    print_json(&engine.porosity(&members, &links))
}

fn cmd_relationships(doc: &Value) -> i32 {
    print_json(&ingest::parse_relationships(doc))
}

fn cmd_classify(engine: &AnalyticsEngine, score: f64) -> i32 {
    match engine.classify(score) {
        Ok(classification) => print_json(&json!({"score": score, "classification": classification})),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_ghosts(engine: &AnalyticsEngine, doc: &Value) -> i32 {
    let actors = ingest::parse_entities(doc);
    let absences = ingest::parse_absent_assertions(doc);
    print_json(&engine.merge_ghosts(&actors, &absences))
}

fn cmd_fingerprint(engine: &AnalyticsEngine, name: &str, context: &str, themes: &[String]) -> i32 {
    let themes = (!themes.is_empty()).then_some(themes);
    println!("{}", engine.fingerprint(name, context, themes));
    0
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_json) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = match EngineConfig::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let engine = AnalyticsEngine::with_config(config);

    let code = match cli.command {
        Commands::Classify { score } => cmd_classify(&engine, score),
        Commands::Fingerprint { name, context, themes } => {
            cmd_fingerprint(&engine, &name, &context, &themes)
        }
        Commands::Verify => with_input(cli.input.as_deref(), |doc| cmd_verify(&engine, doc)),
        Commands::AuditQuotes => with_input(cli.input.as_deref(), |doc| cmd_audit_quotes(&engine, doc)),
        Commands::Cluster => with_input(cli.input.as_deref(), |doc| cmd_cluster(&engine, doc)),
        Commands::Metrics => with_input(cli.input.as_deref(), |doc| cmd_metrics(&engine, doc)),
        Commands::Porosity => with_input(cli.input.as_deref(), |doc| cmd_porosity(&engine, doc)),
        Commands::Relationships => with_input(cli.input.as_deref(), cmd_relationships),
        Commands::Ghosts => with_input(cli.input.as_deref(), |doc| cmd_ghosts(&engine, doc)),
    };
    std::process::exit(code);
}
