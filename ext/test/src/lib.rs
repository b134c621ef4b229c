//! jsoncontain-test: Test matchers and conformance fixtures
//!
//! Provides a pair of small matchers used throughout the conformance suite,
//! and (with the `fixtures` feature) a YAML fixture runner.
//!
//! # Example
//!
//! ```
//! use jsoncontain::prelude::*;
//! use serde_json::json;
//!
//! let registry = jsoncontain_test::register(MatcherRegistryBuilder::new())?.build();
//! let comparator = Comparator::new(registry);
//!
//! assert!(comparator.matches(&json!({ "n": "%isEven()%" }), &json!({ "n": 4 })));
//! assert!(comparator.matches(&json!("%oneOf(red, green)%"), &json!("green")));
//! # Ok::<(), RegistryError>(())
//! ```

use jsoncontain::{register_builtin_matchers, MatcherRegistryBuilder, RegistryError};
use serde_json::Value;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// `isEven()`: actual is an even integer.
#[must_use]
pub fn is_even(actual: &Value, _args: &[String]) -> bool {
    match actual {
        Value::Number(n) => n
            .as_i64()
            .map(|i| i % 2 == 0)
            .or_else(|| n.as_u64().map(|u| u % 2 == 0))
            .unwrap_or(false),
        _ => false,
    }
}

/// `oneOf(a, b, ...)`: actual is a string or number whose text equals one of
/// the arguments.
#[must_use]
pub fn one_of(actual: &Value, args: &[String]) -> bool {
    let text = match actual {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    args.iter().any(|a| *a == text)
}

/// Register the test-only matchers (`isEven`, `oneOf`).
///
/// # Errors
///
/// Fails if either name is already registered on `builder`.
pub fn register_test_matchers(
    builder: MatcherRegistryBuilder,
) -> Result<MatcherRegistryBuilder, RegistryError> {
    builder
        .register_fn("isEven", is_even)?
        .register_fn("oneOf", one_of)
}

/// Register the built-in matchers plus the test-only ones.
///
/// # Errors
///
/// Fails on a name collision with something already on `builder`.
pub fn register(builder: MatcherRegistryBuilder) -> Result<MatcherRegistryBuilder, RegistryError> {
    register_test_matchers(register_builtin_matchers(builder)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn is_even_only_for_even_integers() {
        assert!(is_even(&json!(0), &[]));
        assert!(is_even(&json!(-4), &[]));
        assert!(is_even(&json!(u64::MAX - 1), &[]));
        assert!(!is_even(&json!(3), &[]));
        assert!(!is_even(&json!(2.0), &[]));
        assert!(!is_even(&json!("2"), &[]));
    }

    #[test]
    fn one_of_compares_text() {
        let args = vec!["red".to_owned(), "42".to_owned()];
        assert!(one_of(&json!("red"), &args));
        assert!(one_of(&json!(42), &args));
        assert!(!one_of(&json!("blue"), &args));
        assert!(!one_of(&json!(null), &args));
        assert!(!one_of(&json!("red"), &[]));
    }

    #[test]
    fn register_includes_builtins() {
        let registry = register(MatcherRegistryBuilder::new()).unwrap().build();
        for name in ["isEven", "oneOf", "jwt", "arrayLength", "regExp"] {
            assert!(registry.contains(name), "{name} missing");
        }
    }

    #[test]
    fn register_twice_collides() {
        let builder = register_test_matchers(MatcherRegistryBuilder::new()).unwrap();
        assert!(register_test_matchers(builder).is_err());
    }
}
