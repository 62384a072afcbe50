use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::{tempdir, TempDir};

const LISTING: &str = r#"{
  "meta": {
    "url": "http://google.com",
    "listItems": [
      {"title": "Best Rust web frameworks"},
      {"title": "Chocolate cake recipes"},
      {"title": "Top 10 search engines"},
      {"description": "an entry without a title"},
      {"title": "Learning Rust in 2024"}
    ]
  }
}"#;

fn setup_listing(body: &str) -> (TempDir, std::path::PathBuf) {
    let temp = tempdir().unwrap();
    let path = temp.path().join("listing.json");
    fs::write(&path, body).unwrap();
    (temp, path)
}

#[allow(deprecated)]
fn cli(mode: &str) -> Command {
    let mut cmd = Command::cargo_bin("catalog-finder").expect("binary");
    cmd.env("CATALOG_FINDER_EMBEDDING_MODE", mode)
        .env_remove("CATALOG_FINDER_EMBEDDING_DIM")
        .env_remove("CATALOG_FINDER_TOP_K")
        .env_remove("CATALOG_FINDER_LISTING_URL");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn search_prints_ranked_titles() {
    let (_temp, path) = setup_listing(LISTING);

    cli("stub")
        .arg("search")
        .arg("top search engines")
        .arg("--file")
        .arg(&path)
        .args(["-k", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Rank 1: (Distance: 0)\nTop 10 search engines\n",
        ))
        .stdout(predicate::str::contains("Rank 2: "))
        .stdout(predicate::str::contains("Rank 3: ").not());
}

#[test]
fn search_json_reports_rank_id_title_distance() {
    let (_temp, path) = setup_listing(LISTING);

    let body = run_json(
        cli("tokens")
            .arg("search")
            .arg("rust web frameworks")
            .arg("--file")
            .arg(&path)
            .arg("--json"),
    );

    let hits = body.as_array().expect("array");
    assert_eq!(hits.len(), 4, "k defaults to 10 and never pads");
    assert_eq!(hits[0]["rank"], 1);
    assert_eq!(hits[0]["id"], 0);
    assert_eq!(hits[0]["title"], "Best Rust web frameworks");

    let distances: Vec<f64> = hits
        .iter()
        .map(|h| h["distance"].as_f64().expect("distance"))
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn search_is_deterministic() {
    let (_temp, path) = setup_listing(LISTING);
    let run = || {
        run_json(
            cli("stub")
                .arg("search")
                .arg("cake")
                .arg("--file")
                .arg(&path)
                .arg("--json"),
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn config_file_sets_default_k() {
    let (temp, path) = setup_listing(LISTING);
    let config = temp.path().join("catalog-finder.toml");
    fs::write(&config, "embedding_mode = \"stub\"\ntop_k = 2\ndimension = 16\n").unwrap();

    let body = run_json(
        cli("stub")
            .arg("--config")
            .arg(&config)
            .arg("search")
            .arg("rust")
            .arg("--file")
            .arg(&path)
            .arg("--json"),
    );
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[test]
fn zero_k_is_rejected() {
    let (_temp, path) = setup_listing(LISTING);

    cli("stub")
        .arg("search")
        .arg("rust")
        .arg("--file")
        .arg(&path)
        .args(["-k", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid k"));
}

#[test]
fn listing_without_items_is_rejected() {
    let (_temp, path) = setup_listing(r#"{"meta": {"url": "http://google.com"}}"#);

    cli("stub")
        .arg("search")
        .arg("rust")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("listItems"));
}

#[test]
fn empty_listing_prints_nothing() {
    let (_temp, path) = setup_listing(r#"{"meta": {"listItems": []}}"#);

    cli("stub")
        .arg("search")
        .arg("rust")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn unsupported_embedding_mode_fails() {
    let (_temp, path) = setup_listing(LISTING);

    cli("onnx")
        .arg("search")
        .arg("rust")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported embedding mode"));
}

#[test]
fn titles_lists_extracted_titles() {
    let (_temp, path) = setup_listing(LISTING);

    let body = run_json(cli("stub").arg("titles").arg("--file").arg(&path).arg("--json"));
    assert_eq!(
        body,
        serde_json::json!([
            "Best Rust web frameworks",
            "Chocolate cake recipes",
            "Top 10 search engines",
            "Learning Rust in 2024"
        ])
    );
}
