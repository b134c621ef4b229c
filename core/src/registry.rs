//! Matcher registry: name → [`ValueMatcher`] lookup for placeholder dispatch.
//!
//! # Architecture (build, then freeze)
//!
//! Registration happens on a [`MatcherRegistryBuilder`]. Each registered
//! matcher is erased behind `Box<dyn ValueMatcher>` at registration time, and
//! [`build()`](MatcherRegistryBuilder::build) produces an immutable
//! [`MatcherRegistry`]. A built registry has no mutating methods, so no
//! registration can race with an in-flight comparison.
//!
//! # Duplicate names
//!
//! Registering a name twice is an error ([`RegistryError::DuplicateMatcher`]).
//! A silently shadowed matcher would change the meaning of every placeholder
//! using that name across the whole suite.
//!
//! # Example
//!
//! ```
//! use jsoncontain::{MatcherRegistryBuilder, RegistryError};
//! use serde_json::{json, Value};
//!
//! let registry = MatcherRegistryBuilder::new()
//!     .register_fn("isEven", |v: &Value, _: &[String]| {
//!         v.as_i64().is_some_and(|n| n % 2 == 0)
//!     })?
//!     .build();
//!
//! assert_eq!(registry.apply("isEven", &[], &json!(4)), Ok(true));
//! assert!(registry.apply("isOdd", &[], &json!(3)).is_err());
//! # Ok::<(), RegistryError>(())
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::{FnMatcher, InvocationError, MatcherInvocation, ValueMatcher};

/// Type-erased matcher.
type BoxedMatcher = Box<dyn ValueMatcher>;

/// Errors raised while registering matchers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The name is already taken.
    #[error("matcher \"{name}\" is already registered")]
    DuplicateMatcher {
        /// The name registered twice.
        name: String,
    },
    /// The name cannot appear in a `%name(...)%` placeholder.
    #[error("invalid matcher name \"{name}\": expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

/// A placeholder named a matcher that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown matcher \"{name}\"{}", available_suffix(.available))]
pub struct UnknownMatcher {
    /// The unresolved name.
    pub name: String,
    /// Registered names (sorted) for self-correcting error messages.
    pub available: Vec<String>,
}

fn available_suffix(available: &[String]) -> String {
    if available.is_empty() {
        " (no matchers are registered)".to_owned()
    } else {
        format!(" (registered: {})", available.join(", "))
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for constructing a [`MatcherRegistry`].
///
/// Register matchers by name, then call [`build()`](Self::build) to produce an
/// immutable registry.
#[derive(Default)]
pub struct MatcherRegistryBuilder {
    matchers: HashMap<String, BoxedMatcher>,
}

impl MatcherRegistryBuilder {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a [`ValueMatcher`] under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidName`] if `name` is not an identifier
    /// - [`RegistryError::DuplicateMatcher`] if `name` is already registered
    pub fn matcher<M: ValueMatcher + 'static>(
        mut self,
        name: &str,
        matcher: M,
    ) -> Result<Self, RegistryError> {
        if !is_valid_name(name) {
            return Err(RegistryError::InvalidName {
                name: name.to_owned(),
            });
        }
        if self.matchers.contains_key(name) {
            return Err(RegistryError::DuplicateMatcher {
                name: name.to_owned(),
            });
        }
        tracing::trace!(matcher = name, "registered matcher");
        self.matchers.insert(name.to_owned(), Box::new(matcher));
        Ok(self)
    }

    /// Register a closure under `name`.
    ///
    /// # Errors
    ///
    /// Same as [`matcher()`](Self::matcher).
    pub fn register_fn<F>(self, name: &str, f: F) -> Result<Self, RegistryError>
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.matcher(name, FnMatcher::new(name, f))
    }

    /// Returns `true` if `name` is already registered on this builder.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.matchers.contains_key(name)
    }

    /// Freeze the registry. No further registration is possible.
    #[must_use]
    pub fn build(self) -> MatcherRegistry {
        MatcherRegistry {
            matchers: self.matchers,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable map from matcher name to [`ValueMatcher`].
///
/// Constructed via [`MatcherRegistryBuilder`]. Share it behind `Arc` between
/// comparators and threads.
pub struct MatcherRegistry {
    matchers: HashMap<String, BoxedMatcher>,
}

impl MatcherRegistry {
    /// An empty registry. Every placeholder resolves to
    /// [`UnknownMatcher`].
    #[must_use]
    pub fn empty() -> Self {
        MatcherRegistryBuilder::new().build()
    }

    /// Parse a `%name(args)%` placeholder.
    ///
    /// Parsing does not consult the registered names; an unknown name is only
    /// reported by [`apply()`](Self::apply).
    ///
    /// # Errors
    ///
    /// Returns an [`InvocationError`] if `invocation` is not a well-formed
    /// placeholder.
    pub fn resolve(&self, invocation: &str) -> Result<MatcherInvocation, InvocationError> {
        MatcherInvocation::parse(invocation)
    }

    /// Look up `name` and apply it to `actual`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownMatcher`] if `name` is not registered.
    pub fn apply(&self, name: &str, args: &[String], actual: &Value) -> Result<bool, UnknownMatcher> {
        let matcher = self.matchers.get(name).ok_or_else(|| UnknownMatcher {
            name: name.to_owned(),
            available: self.names().into_iter().map(str::to_owned).collect(),
        })?;
        let matched = matcher.matches(actual, args);
        tracing::trace!(matcher = name, ?args, matched, "applied matcher");
        Ok(matched)
    }

    /// Returns the matcher registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ValueMatcher> {
        self.matchers.get(name).map(|m| m.as_ref())
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.matchers.contains_key(name)
    }

    /// Returns the number of registered matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns `true` if no matchers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Returns all registered names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.matchers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherRegistry")
            .field("matchers", &self.names())
            .finish()
    }
}
