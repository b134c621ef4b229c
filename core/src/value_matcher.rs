//! `ValueMatcher` — Named predicates over actual JSON values
//!
//! A matcher receives the actual value found at the placeholder's position and
//! the string arguments parsed from the placeholder. It answers a yes/no
//! question; the comparator turns `false` into
//! [`MismatchReason::MatcherFailed`](crate::MismatchReason::MatcherFailed).
//!
//! Matchers should be pure functions of their inputs so that comparisons are
//! repeatable. This is a convention, not something the type system enforces.

use std::fmt;

use serde_json::Value;

/// Predicate applied to an actual value via a `%name(args)%` placeholder.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: a built registry is shared across
/// threads running comparisons in parallel.
///
/// # Example
///
/// ```
/// use jsoncontain::ValueMatcher;
/// use serde_json::{json, Value};
///
/// #[derive(Debug)]
/// struct NonEmpty;
///
/// impl ValueMatcher for NonEmpty {
///     fn matches(&self, actual: &Value, _args: &[String]) -> bool {
///         actual.as_str().is_some_and(|s| !s.is_empty())
///     }
/// }
///
/// assert!(NonEmpty.matches(&json!("x"), &[]));
/// assert!(!NonEmpty.matches(&json!(""), &[]));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `ValueMatcher`",
    label = "this type cannot be registered as a named matcher",
    note = "implement `matches(&self, &serde_json::Value, &[String]) -> bool`, or register a closure with `MatcherRegistryBuilder::register_fn`"
)]
pub trait ValueMatcher: Send + Sync + fmt::Debug {
    /// Returns `true` when `actual` satisfies this matcher for `args`.
    fn matches(&self, actual: &Value, args: &[String]) -> bool;
}

#[diagnostic::do_not_recommend]
impl ValueMatcher for Box<dyn ValueMatcher> {
    fn matches(&self, actual: &Value, args: &[String]) -> bool {
        (**self).matches(actual, args)
    }
}

/// Adapter turning a closure into a [`ValueMatcher`].
///
/// Closures have no useful `Debug`, so the adapter carries the name it was
/// registered under.
pub struct FnMatcher<F> {
    name: String,
    f: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync,
{
    /// Wrap `f`, labelling it `name` in debug output.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnMatcher").field(&self.name).finish()
    }
}

impl<F> ValueMatcher for FnMatcher<F>
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync,
{
    fn matches(&self, actual: &Value, args: &[String]) -> bool {
        (self.f)(actual, args)
    }
}
