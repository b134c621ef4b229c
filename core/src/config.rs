//! Comparator configuration.
//!
//! With the `serde` feature, [`ComparatorConfig`] deserializes from JSON or
//! YAML:
//!
//! ```yaml
//! array_policy: unordered
//! max_depth: 64
//! ```
//!
//! Both fields are optional and default to [`ArrayPolicy::Ordered`] and
//! [`MAX_DEPTH`](crate::MAX_DEPTH).

use std::fmt;

use crate::MAX_DEPTH;

/// How expected arrays are matched against actual arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArrayPolicy {
    /// Same length, element `i` against element `i`.
    #[default]
    Ordered,
    /// Every expected element must match a distinct actual element, in any
    /// order. Extra actual elements are ignored.
    Unordered,
}

impl fmt::Display for ArrayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordered => f.write_str("ordered"),
            Self::Unordered => f.write_str("unordered"),
        }
    }
}

/// Tunables for a [`Comparator`](crate::Comparator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ComparatorConfig {
    /// Array matching policy.
    pub array_policy: ArrayPolicy,
    /// Maximum nesting depth walked before failing with
    /// [`MismatchReason::DepthExceeded`](crate::MismatchReason::DepthExceeded).
    pub max_depth: usize,
}

impl ComparatorConfig {
    /// Set the array policy (builder pattern).
    #[must_use]
    pub fn with_array_policy(mut self, policy: ArrayPolicy) -> Self {
        self.array_policy = policy;
        self
    }

    /// Set the depth limit (builder pattern).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            array_policy: ArrayPolicy::Ordered,
            max_depth: MAX_DEPTH,
        }
    }
}
