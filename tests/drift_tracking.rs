//! Drift tracking tests
//!
//! Snapshot and diff behavior through the full pipeline and through files:
//! - the run's snapshot reflects the raw data, not the canonical output
//! - a baseline supplied to a second run yields a persisted diff
//! - diff is empty under identity and asymmetric under swapping

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

use driftline::config::Config;
use driftline::drift::{diff, StructureSnapshot, StructureTracker};
use driftline::observability::{Logger, Severity};
use driftline::pipeline::{Pipeline, RunReport};
use driftline::schema::SchemaSelector;

// =============================================================================
// Helper Functions
// =============================================================================

fn quiet_logger() -> Logger {
    Logger::new(Severity::Error)
}

fn test_config(root: &Path) -> Config {
    Config {
        raw_dir: root.join("raw"),
        schemas_dir: root.join("schemas"),
        out_dir: root.join("out"),
        bad_dir: root.join("bad"),
        ..Config::default()
    }
}

fn setup(root: &Path, raw_body: &str) {
    fs::create_dir_all(root.join("raw")).unwrap();
    fs::create_dir_all(root.join("schemas")).unwrap();
    fs::write(
        root.join("schemas").join("feed.json"),
        r#"{
            "schema_name": "feed",
            "field_map": { "id": "user_id", "email": "email", "signup_date": "signup_date" }
        }"#,
    )
    .unwrap();
    fs::write(root.join("raw").join("feed_data.json"), raw_body).unwrap();
}

fn run_feed(root: &Path, baseline: Option<StructureSnapshot>) -> RunReport {
    let logger = quiet_logger();
    let mut pipeline = Pipeline::new(
        test_config(root),
        SchemaSelector::Fixed("feed".to_string()),
        &logger,
    );
    if let Some(baseline) = baseline {
        pipeline = pipeline.with_baseline(baseline);
    }
    pipeline.run().unwrap()
}

fn load_snapshot(path: &Path) -> StructureSnapshot {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Snapshot Content
// =============================================================================

#[test]
fn test_snapshot_reflects_raw_structure() {
    let tmp = TempDir::new().unwrap();
    setup(
        tmp.path(),
        r#"[
            { "id": "u1", "email": "a@b.com", "signup_date": "2026-01-10",
              "address": { "city": "Porto" }, "orders": [{ "amount": 3 }] }
        ]"#,
    );
    let report = run_feed(tmp.path(), None);

    let snapshot = load_snapshot(&report.snapshot_path);
    assert_eq!(snapshot.get("$"), Some(&vec!["object".to_string()]));
    assert_eq!(snapshot.get("address.city"), Some(&vec!["str".to_string()]));
    assert_eq!(
        snapshot.get("orders[]"),
        Some(&vec!["array".to_string(), "object".to_string()])
    );
    assert_eq!(
        snapshot.get("orders[].amount"),
        Some(&vec!["int".to_string()])
    );
    // Canonical-only keys never show up in the raw snapshot.
    assert!(!snapshot.contains_key("total_order_value"));
}

#[test]
fn test_type_drift_accumulates_within_a_run() {
    let tmp = TempDir::new().unwrap();
    setup(
        tmp.path(),
        r#"[
            { "a": { "b": 1 } },
            { "a": { "b": "x" } }
        ]"#,
    );
    let report = run_feed(tmp.path(), None);

    let snapshot = load_snapshot(&report.snapshot_path);
    assert_eq!(
        snapshot.get("a.b"),
        Some(&vec!["int".to_string(), "str".to_string()])
    );
}

// =============================================================================
// Baseline Diff Through Files
// =============================================================================

#[test]
fn test_baseline_diff_is_written_and_summarized() {
    let first_tmp = TempDir::new().unwrap();
    setup(
        first_tmp.path(),
        r#"[{ "id": "u1", "email": "a@b.com", "signup_date": "2026-01-10", "score": 7 }]"#,
    );
    let first = run_feed(first_tmp.path(), None);
    let baseline = load_snapshot(&first.snapshot_path);

    let second_tmp = TempDir::new().unwrap();
    setup(
        second_tmp.path(),
        r#"[{ "id": "u1", "email": "a@b.com", "signup_date": "2026-01-10",
             "score": "seven", "badge": true }]"#,
    );
    let second = run_feed(second_tmp.path(), Some(baseline));

    let drift = second.drift.expect("baseline run must report drift");
    assert_eq!(drift.new_paths, 1);
    assert_eq!(drift.missing_paths, 0);
    assert_eq!(drift.type_changes, 1);

    let written: Value =
        serde_json::from_str(&fs::read_to_string(&drift.diff_path).unwrap()).unwrap();
    assert_eq!(written["new_paths"], json!(["badge"]));
    assert_eq!(written["missing_paths"], json!([]));
    assert_eq!(written["type_changes"][0]["path"], "score");
    assert_eq!(written["type_changes"][0]["baseline_types"], json!(["int"]));
    assert_eq!(written["type_changes"][0]["current_types"], json!(["str"]));
}

#[test]
fn test_run_without_baseline_reports_no_drift() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path(), "[]");
    let report = run_feed(tmp.path(), None);
    assert!(report.drift.is_none());
}

// =============================================================================
// Diff Invariants
// =============================================================================

#[test]
fn test_diff_identity_is_empty() {
    let mut tracker = StructureTracker::new();
    tracker.observe(
        &json!({ "id": "u1", "orders": [{ "amount": 1.5 }], "tags": [] }),
        "f.json",
    );
    let snapshot = tracker.snapshot();
    assert!(diff(&snapshot, &snapshot).is_empty());
}

#[test]
fn test_diff_is_asymmetric() {
    let mut before = StructureTracker::new();
    before.observe(&json!({ "a": 1 }), "f.json");
    let mut after = StructureTracker::new();
    after.observe(&json!({ "b": 1 }), "f.json");

    let forward = diff(&before.snapshot(), &after.snapshot());
    let backward = diff(&after.snapshot(), &before.snapshot());
    assert_eq!(forward.new_paths, vec!["b"]);
    assert_eq!(forward.missing_paths, vec!["a"]);
    assert_eq!(backward.new_paths, vec!["a"]);
    assert_eq!(backward.missing_paths, vec!["b"]);
}

#[test]
fn test_snapshot_survives_a_file_round_trip() {
    let mut tracker = StructureTracker::new();
    tracker.observe(
        &json!({ "nested": { "deep": { "value": null } }, "list": [[1]] }),
        "f.json",
    );
    let snapshot = tracker.snapshot();

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.json");
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

    let loaded = load_snapshot(&path);
    assert_eq!(loaded, snapshot);
    assert!(diff(&snapshot, &loaded).is_empty());
}
