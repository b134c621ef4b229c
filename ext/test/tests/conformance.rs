//! Conformance tests that run YAML fixtures against jsoncontain
//!
//! Run with: cargo test -p jsoncontain-test --test conformance --features fixtures

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsoncontain::{MatcherRegistry, MatcherRegistryBuilder};
use jsoncontain_test::fixture::Fixture;

/// The `fixtures/` directory at the workspace root
fn fixtures_dir() -> PathBuf {
    // ext/test -> ext -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("Could not find workspace root")
        .join("fixtures")
}

fn registry() -> Arc<MatcherRegistry> {
    Arc::new(
        jsoncontain_test::register(MatcherRegistryBuilder::new())
            .expect("register test matchers")
            .build(),
    )
}

/// Load and run all fixtures in a file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    let fixtures = Fixture::from_yaml_multi(&yaml)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()));
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    let registry = registry();
    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert(Arc::clone(&registry));
    }
}

#[test]
fn test_objects() {
    run_fixture_file("01_objects.yaml");
}

#[test]
fn test_arrays() {
    run_fixture_file("02_arrays.yaml");
}

#[test]
fn test_matchers() {
    run_fixture_file("03_matchers.yaml");
}

#[test]
fn test_invariants() {
    run_fixture_file("04_invariants.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let mut names: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".yaml") || n.ends_with(".yml"))
        .collect();
    names.sort();
    assert_eq!(
        names,
        ["01_objects.yaml", "02_arrays.yaml", "03_matchers.yaml", "04_invariants.yaml"]
    );
}
