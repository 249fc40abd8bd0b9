mod common;

use common::{path_arg, qbank, read_json, stdout_of, write_json};
use serde_json::json;

#[test]
fn appends_canonical_tags_in_mapping_rule_order() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let bank = temp.path().join("ARF-02-01.json");
    write_json(
        &bank,
        &json!([
            {"id": "Q-01", "tags": ["Error", "StatutoryAudit"]},
            {"id": "Q-02", "tags": ["Fraud", "Fraud_vs_Error"]}
        ]),
    );
    let mapping = temp.path().join("mapping.json");
    std::fs::write(
        &mapping,
        r#"{
            "Fraud": "Fraud_vs_Error",
            "Error": "Fraud_vs_Error",
            "StatutoryAudit": "Statutory_Audit_Exemptions"
        }"#,
    )
    .expect("write mapping");
    let pattern = format!("{}/ARF-02-*.json", temp.path().display());

    let output = qbank(&["tags", "--mapping", path_arg(&mapping), &pattern]);
    assert!(output.status.success(), "{}", stdout_of(&output));
    assert!(stdout_of(&output).contains("Updated 1 entries across 1 of 1 files"));

    let doc = read_json(&bank);
    // Additions follow the order rules appear in the mapping file.
    assert_eq!(
        doc[0]["tags"],
        json!([
            "Error",
            "StatutoryAudit",
            "Fraud_vs_Error",
            "Statutory_Audit_Exemptions"
        ])
    );
    // Q-02 already carries the canonical tag; nothing is re-added.
    assert_eq!(doc[1]["tags"], json!(["Fraud", "Fraud_vs_Error"]));
}

#[test]
fn second_run_changes_nothing() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let bank = temp.path().join("bank.json");
    write_json(&bank, &json!([{"id": "Q-01", "tags": ["OldA"]}]));
    let mapping = temp.path().join("mapping.json");
    std::fs::write(&mapping, r#"{"OldA": "NewA"}"#).expect("write mapping");
    let pattern = format!("{}/bank.json", temp.path().display());

    assert!(qbank(&["tags", "--mapping", path_arg(&mapping), &pattern])
        .status
        .success());
    let first = std::fs::read(&bank).expect("read after first run");

    let output = qbank(&["tags", "--mapping", path_arg(&mapping), &pattern]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("no tags updated"));
    assert!(stdout_of(&output).contains("Updated 0 entries across 0 of 1 files"));
    assert_eq!(std::fs::read(&bank).expect("read after second run"), first);
}

#[test]
fn untouched_files_are_not_rewritten() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let clean = temp.path().join("clean.json");
    // Compact on disk; a rewrite would pretty-print it.
    std::fs::write(&clean, r#"[{"id":"Q-01","tags":["Unmapped"]}]"#).expect("write clean");
    let dirty = temp.path().join("dirty.json");
    write_json(&dirty, &json!([{"id": "Q-02", "tags": ["OldA"]}]));
    let mapping = temp.path().join("mapping.json");
    std::fs::write(&mapping, r#"{"OldA": "NewA"}"#).expect("write mapping");
    let pattern = format!("{}/*.json", temp.path().display());

    let output = qbank(&["tags", "--mapping", path_arg(&mapping), &pattern]);
    assert!(output.status.success(), "{}", stdout_of(&output));

    let clean_after = std::fs::read_to_string(&clean).expect("read clean");
    assert_eq!(clean_after, r#"[{"id":"Q-01","tags":["Unmapped"]}]"#);
    assert_eq!(read_json(&dirty)[0]["tags"], json!(["OldA", "NewA"]));
}

#[test]
fn broken_files_are_skipped_while_the_batch_continues() {
    let temp = tempfile::tempdir().expect("create temp dir");
    std::fs::write(temp.path().join("a-broken.json"), "{not-json").expect("write broken");
    let good = temp.path().join("b-good.json");
    write_json(&good, &json!([{"id": "Q-01", "tags": ["OldA"]}]));
    let mapping = temp.path().join("mapping.json");
    std::fs::write(&mapping, r#"{"OldA": "NewA"}"#).expect("write mapping");
    let pattern = format!("{}/*-*.json", temp.path().display());

    let output = qbank(&["tags", "--mapping", path_arg(&mapping), &pattern]);
    assert!(output.status.success(), "{}", stdout_of(&output));
    assert_eq!(read_json(&good)[0]["tags"], json!(["OldA", "NewA"]));
}

#[test]
fn empty_match_set_is_informational() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mapping = temp.path().join("mapping.json");
    std::fs::write(&mapping, r#"{"OldA": "NewA"}"#).expect("write mapping");
    let pattern = format!("{}/none-*.json", temp.path().display());

    let output = qbank(&["tags", "--mapping", path_arg(&mapping), &pattern]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("no files found matching"));
}

#[test]
fn non_string_mapping_values_are_rejected() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mapping = temp.path().join("mapping.json");
    std::fs::write(&mapping, r#"{"OldA": 7}"#).expect("write mapping");
    let pattern = format!("{}/*.json", temp.path().display());

    let output = qbank(&["tags", "--mapping", path_arg(&mapping), &pattern]);
    assert!(!output.status.success());
}
