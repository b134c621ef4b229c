//! Comparison failures.
//!
//! A failed comparison produces exactly one [`Mismatch`]: the first divergence
//! found walking expected depth-first in key order. It carries the
//! [`JsonPath`] of the divergence and a [`MismatchReason`].

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::{InvocationError, JsonPath, MatcherInvocation, PathSegment, UnknownMatcher};

/// The kind of a JSON value, for type-mismatch reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any number.
    Number,
    /// A string.
    String,
    /// An ordered sequence.
    Array,
    /// A key/value mapping.
    Object,
}

impl JsonKind {
    /// Returns the kind of `value`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase name used in messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a comparison failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MismatchReason {
    /// Expected and actual are different JSON kinds.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Kind of the expected value.
        expected: JsonKind,
        /// Kind of the actual value.
        actual: JsonKind,
    },
    /// Same kind, different scalar value.
    #[error("value mismatch: expected {expected}, got {actual}")]
    ValueMismatch {
        /// The expected scalar.
        expected: Value,
        /// The actual scalar.
        actual: Value,
    },
    /// A key of the expected object is absent from the actual object.
    #[error("missing key \"{key}\"")]
    MissingKey {
        /// The absent key.
        key: String,
    },
    /// Arrays of incompatible lengths.
    #[error("length mismatch: expected {expected} element(s), got {actual}")]
    LengthMismatch {
        /// Length of the expected array.
        expected: usize,
        /// Length of the actual array.
        actual: usize,
    },
    /// Unordered policy: no unused actual element satisfies this expected element.
    #[error("no matching element in actual array for expected element {index}")]
    NoMatchingElement {
        /// Index of the unmatched expected element.
        index: usize,
    },
    /// A placeholder names an unregistered matcher.
    #[error(transparent)]
    UnknownMatcher(#[from] UnknownMatcher),
    /// A placeholder looks like an invocation but does not parse.
    #[error("malformed matcher invocation: {0}")]
    MalformedMatcherInvocation(#[from] InvocationError),
    /// The matcher ran and returned `false`.
    #[error("matcher {} failed for {actual}", render_invocation(.name, .args))]
    MatcherFailed {
        /// Matcher name.
        name: String,
        /// Arguments passed to the matcher.
        args: Vec<String>,
        /// The actual value the matcher rejected.
        actual: Value,
    },
    /// The tree is nested deeper than the configured limit.
    #[error("maximum depth {max} exceeded")]
    DepthExceeded {
        /// The configured limit.
        max: usize,
    },
}

/// Renders the failed call as `%name(args)%`.
fn render_invocation(name: &str, args: &[String]) -> MatcherInvocation {
    MatcherInvocation::new(name, args.iter().map(String::as_str))
}

impl MismatchReason {
    /// Returns the fieldless discriminant, for matching in tests and fixtures.
    #[must_use]
    pub fn kind(&self) -> MismatchKind {
        match self {
            Self::TypeMismatch { .. } => MismatchKind::TypeMismatch,
            Self::ValueMismatch { .. } => MismatchKind::ValueMismatch,
            Self::MissingKey { .. } => MismatchKind::MissingKey,
            Self::LengthMismatch { .. } => MismatchKind::LengthMismatch,
            Self::NoMatchingElement { .. } => MismatchKind::NoMatchingElement,
            Self::UnknownMatcher(_) => MismatchKind::UnknownMatcher,
            Self::MalformedMatcherInvocation(_) => MismatchKind::MalformedMatcherInvocation,
            Self::MatcherFailed { .. } => MismatchKind::MatcherFailed,
            Self::DepthExceeded { .. } => MismatchKind::DepthExceeded,
        }
    }
}

/// Fieldless mirror of [`MismatchReason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MismatchKind {
    /// See [`MismatchReason::TypeMismatch`].
    TypeMismatch,
    /// See [`MismatchReason::ValueMismatch`].
    ValueMismatch,
    /// See [`MismatchReason::MissingKey`].
    MissingKey,
    /// See [`MismatchReason::LengthMismatch`].
    LengthMismatch,
    /// See [`MismatchReason::NoMatchingElement`].
    NoMatchingElement,
    /// See [`MismatchReason::UnknownMatcher`].
    UnknownMatcher,
    /// See [`MismatchReason::MalformedMatcherInvocation`].
    MalformedMatcherInvocation,
    /// See [`MismatchReason::MatcherFailed`].
    MatcherFailed,
    /// See [`MismatchReason::DepthExceeded`].
    DepthExceeded,
}

/// The first divergence between expected and actual.
///
/// Displays as `<reason> at <path>`:
///
/// ```
/// use jsoncontain::{Comparator, MatcherRegistry};
/// use serde_json::json;
///
/// let comparator = Comparator::new(MatcherRegistry::empty());
/// let err = comparator.compare(&json!([1, 2, 3]), &json!([1, 2, 4])).unwrap_err();
/// assert_eq!(err.to_string(), "value mismatch: expected 3, got 4 at [2]");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason} at {path}")]
pub struct Mismatch {
    path: JsonPath,
    reason: MismatchReason,
}

impl Mismatch {
    /// A mismatch at `path`.
    pub fn new(path: JsonPath, reason: impl Into<MismatchReason>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }

    /// A mismatch at the node currently being compared; the walk prefixes the
    /// path while unwinding.
    pub(crate) fn here(reason: impl Into<MismatchReason>) -> Self {
        Self::new(JsonPath::root(), reason)
    }

    /// Prefix the path with the segment of the enclosing node.
    #[must_use]
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }

    /// Returns where the divergence happened.
    #[must_use]
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Returns why the comparison failed.
    #[must_use]
    pub fn reason(&self) -> &MismatchReason {
        &self.reason
    }

    /// Shorthand for `self.reason().kind()`.
    #[must_use]
    pub fn kind(&self) -> MismatchKind {
        self.reason.kind()
    }

    /// Consumes the mismatch, returning path and reason.
    #[must_use]
    pub fn into_parts(self) -> (JsonPath, MismatchReason) {
        (self.path, self.reason)
    }
}
