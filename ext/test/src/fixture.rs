//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs each case through a [`Comparator`].
//!
//! ```yaml
//! name: partial_objects
//! description: Extra actual keys are ignored
//! array_policy: ordered        # optional
//! cases:
//!   - name: subset
//!     expected: { a: 1 }
//!     actual: { a: 1, b: 2 }
//!     matches: true
//!   - name: missing
//!     expected: { c: 1 }
//!     actual: { a: 1 }
//!     matches: false
//!     kind: missing_key        # optional
//!     path: c                  # optional
//! ```

use std::sync::Arc;

use jsoncontain::{ArrayPolicy, Comparator, ComparatorConfig, MatcherRegistry, Mismatch, MismatchKind};
use serde::Deserialize;
use serde_json::Value;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub array_policy: ArrayPolicy,
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub expected: Value,
    pub actual: Value,
    pub matches: bool,
    /// Expected mismatch kind, checked only when `matches` is false.
    #[serde(default)]
    pub kind: Option<MismatchKind>,
    /// Expected rendered path, checked only when `matches` is false.
    #[serde(default)]
    pub path: Option<String>,
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub outcome: Result<(), Mismatch>,
}

impl TestCase {
    fn passes(&self, outcome: &Result<(), Mismatch>) -> bool {
        match (self.matches, outcome) {
            (true, Ok(())) => true,
            (false, Err(m)) => {
                self.kind.map_or(true, |k| k == m.kind())
                    && self
                        .path
                        .as_deref()
                        .map_or(true, |p| p == m.path().to_string())
            }
            _ => false,
        }
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the comparator this fixture runs under.
    pub fn comparator(&self, registry: Arc<MatcherRegistry>) -> Comparator {
        Comparator::new(registry)
            .with_config(ComparatorConfig::default().with_array_policy(self.array_policy))
    }

    /// Run all test cases and return results
    pub fn run(&self, registry: Arc<MatcherRegistry>) -> Vec<CaseResult> {
        let comparator = self.comparator(registry);
        self.cases
            .iter()
            .map(|case| {
                let outcome = comparator.compare(&case.expected, &case.actual);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: case.passes(&outcome),
                    outcome,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self, registry: Arc<MatcherRegistry>) {
        let results = self.run(registry);
        for (case, result) in self.cases.iter().zip(results) {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected matches={} kind={:?} path={:?}, got {:?}",
                self.name,
                result.case_name,
                case.matches,
                case.kind,
                case.path,
                result.outcome.as_ref().map_err(ToString::to_string),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsoncontain::MatcherRegistryBuilder;

    fn registry() -> Arc<MatcherRegistry> {
        Arc::new(crate::register(MatcherRegistryBuilder::new()).unwrap().build())
    }

    const YAML: &str = r#"
name: sample
description: two cases
cases:
  - name: subset
    expected: { a: 1 }
    actual: { a: 1, b: 2 }
    matches: true
  - name: missing
    expected: { c: "%isEven()%" }
    actual: { a: 1 }
    matches: false
    kind: missing_key
    path: c
---
name: unordered
description: policy from fixture
array_policy: unordered
cases:
  - name: any order
    expected: [2, 1]
    actual: [1, 2, 3]
    matches: true
"#;

    #[test]
    fn parses_multi_document() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].array_policy, ArrayPolicy::Ordered);
        assert_eq!(fixtures[1].array_policy, ArrayPolicy::Unordered);
        assert_eq!(fixtures[0].cases[1].kind, Some(MismatchKind::MissingKey));
    }

    #[test]
    fn runs_cases() {
        for fixture in Fixture::from_yaml_multi(YAML).unwrap() {
            fixture.run_and_assert(registry());
        }
    }

    #[test]
    fn wrong_expectation_fails_case() {
        let fixture = Fixture::from_yaml(
            r#"
name: wrong
description: expects the wrong path
cases:
  - name: bad path
    expected: { a: { b: 1 } }
    actual: { a: { b: 2 } }
    matches: false
    path: a
"#,
        )
        .unwrap();
        let results = fixture.run(registry());
        assert!(!results[0].passed);
        assert_eq!(results[0].outcome.as_ref().unwrap_err().path().to_string(), "a.b");
    }
}
