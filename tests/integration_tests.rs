//! Integration tests for aurorax-search
//!
//! Exercise the public library API end to end and the compiled CLI binary.
//! Nothing here touches the network: the crate only builds request bodies.

use std::process::{Command, Output};

use aurorax_search::{
    build_distance_matrix, build_search_request, CriteriaBlock, CriteriaBlockSet, DistanceValue,
    EpochPrecision, Error, MaxDistances, SearchOptions,
};
use serde_json::{json, Value};

const START: &str = "2019-01-01T00:00:00";
const END: &str = "2019-01-01T23:59:59";

fn ground_block(i: usize) -> CriteriaBlock {
    CriteriaBlock::new()
        .with("programs", json!(["themis-asi"]))
        .with("platforms", json!([format!("site-{i}")]))
}

fn space_block(i: usize) -> CriteriaBlock {
    CriteriaBlock::new()
        .with("programs", json!(["swarm"]))
        .with("platforms", json!([format!("swarm{i}")]))
        .with("hemisphere", json!(["northern"]))
}

fn block_set(ground: usize, space: usize) -> CriteriaBlockSet {
    CriteriaBlockSet::new(
        (1..=ground).map(ground_block).collect(),
        (1..=space).map(space_block).collect(),
    )
    .unwrap()
}

fn overrides(entries: &[(&str, DistanceValue)]) -> MaxDistances {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aurorax-search"))
        .args(args)
        .output()
        .expect("Failed to run aurorax-search binary")
}

#[test]
fn test_scenario_standard_default() {
    let matrix = build_distance_matrix(&block_set(1, 2), None, None).unwrap();
    assert_eq!(
        serde_json::to_value(&matrix).unwrap(),
        json!({"ground1-space1": 300, "ground1-space2": 300, "space1-space2": 300})
    );
}

#[test]
fn test_scenario_custom_default() {
    let matrix = build_distance_matrix(&block_set(1, 2), Some(1000.0), None).unwrap();
    assert_eq!(
        serde_json::to_value(&matrix).unwrap(),
        json!({"ground1-space1": 1000, "ground1-space2": 1000, "space1-space2": 1000})
    );
}

#[test]
fn test_scenario_override_beyond_ground_count() {
    let overrides = overrides(&[
        ("ground2-space2", DistanceValue::Unconstrained),
        ("space1-space2", DistanceValue::Kilometers(700.0)),
    ]);

    let err = build_distance_matrix(&block_set(1, 2), Some(400.0), Some(&overrides)).unwrap_err();
    match &err {
        Error::UnknownPairKey { key, .. } => assert_eq!(key, "ground2-space2"),
        other => panic!("Expected UnknownPairKey, got {other:?}"),
    }
    assert!(err.to_string().contains("ground2-space2"));
}

#[test]
fn test_scenario_overrides_and_unconstrained() {
    let overrides = overrides(&[
        ("ground2-space2", DistanceValue::Unconstrained),
        ("space1-space2", DistanceValue::Kilometers(700.0)),
    ]);

    let matrix = build_distance_matrix(&block_set(2, 2), Some(400.0), Some(&overrides)).unwrap();
    assert_eq!(
        serde_json::to_value(&matrix).unwrap(),
        json!({
            "ground1-space1": 400,
            "ground1-space2": 400,
            "ground2-space1": 400,
            "ground2-space2": null,
            "space1-space2": 700,
        })
    );
}

#[test]
fn test_full_request_body() {
    let options = SearchOptions {
        default_distance: Some(500.0),
        max_distances: Some(overrides(&[("space1-space2", DistanceValue::Unconstrained)])),
        epoch_search_precision: EpochPrecision::ThirtySeconds,
        ..Default::default()
    };

    let request = build_search_request(
        START,
        END,
        vec![ground_block(1)],
        vec![space_block(1), space_block(2)],
        &options,
    )
    .unwrap();

    let body: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
    assert_eq!(body["start"], "2019-01-01T00:00:00");
    assert_eq!(body["end"], "2019-01-01T23:59:59");
    assert_eq!(body["ground"], json!([ground_block(1)]));
    assert_eq!(body["space"][1]["platforms"], json!(["swarm2"]));
    assert_eq!(body["conjunction_types"], json!(["nbtrace"]));
    assert_eq!(body["epoch_search_precision"], 30);
    assert_eq!(
        body["max_distances"],
        json!({"ground1-space1": 500, "ground1-space2": 500, "space1-space2": null})
    );
}

#[test]
fn test_eleven_blocks_rejected() {
    let result = build_search_request(
        START,
        END,
        (1..=3).map(ground_block).collect(),
        (1..=8).map(space_block).collect(),
        &SearchOptions::default(),
    );
    assert!(matches!(result, Err(Error::TooManyCriteriaBlocks { count: 11 })));
}

#[test]
fn test_ten_space_blocks_accepted() {
    let request = build_search_request(
        START,
        END,
        Vec::new(),
        (1..=10).map(space_block).collect(),
        &SearchOptions::default(),
    )
    .unwrap();
    assert_eq!(request.max_distances().len(), 45);
}

#[test]
fn test_cli_prints_request() {
    let output = run_cli(&[
        "--start",
        START,
        "--end",
        END,
        "--ground",
        r#"{"programs":["themis-asi"]}"#,
        "--ground",
        r#"{"programs":["rego"]}"#,
        "--space",
        r#"{"programs":["swarm"]}"#,
        "--space",
        r#"{"programs":["themis"]}"#,
        "--distance",
        "400",
        "--max-distance",
        "ground2-space2=none",
        "--max-distance",
        "space1-space2=700",
    ]);

    assert!(output.status.success(), "CLI should succeed: {output:?}");

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        body["max_distances"],
        json!({
            "ground1-space1": 400,
            "ground1-space2": 400,
            "ground2-space1": 400,
            "ground2-space2": null,
            "space1-space2": 700,
        })
    );
    assert_eq!(body["epoch_search_precision"], 60);
}

#[test]
fn test_cli_unknown_pair_key_fails() {
    let output = run_cli(&[
        "--start",
        START,
        "--end",
        END,
        "--ground",
        r#"{"programs":["themis-asi"]}"#,
        "--space",
        r#"{"programs":["swarm"]}"#,
        "--space",
        r#"{"programs":["themis"]}"#,
        "--max-distance",
        "space2-space1=100",
    ]);

    assert!(!output.status.success(), "CLI should fail for a reversed pair key");
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("space2-space1"), "stderr: {stderr}");
    assert!(stderr.contains("space1-space2"), "stderr: {stderr}");
}

#[test]
fn test_cli_invalid_precision_fails() {
    let output = run_cli(&[
        "--start",
        START,
        "--end",
        END,
        "--space",
        r#"{"programs":["swarm"]}"#,
        "--precision",
        "15",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("15"));
}

#[test]
fn test_cli_pretty_output() {
    let output = run_cli(&[
        "--start",
        START,
        "--end",
        END,
        "--space",
        r#"{"programs":["swarm"]}"#,
        "--conjunction-type",
        "sbtrace",
        "--pretty",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().count() > 1);

    let body: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["conjunction_types"], json!(["sbtrace"]));
    assert_eq!(body["max_distances"], json!({}));
}
