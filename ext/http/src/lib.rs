//! jsoncontain-http: assertions over the last API response body
//!
//! Holds the most recent response and answers the two body assertions a BDD
//! API suite needs:
//!
//! - **contains JSON**: the body structurally contains an expected document,
//!   with `%name(args)%` placeholders dispatched to the matcher registry
//! - **array length**: the body is a JSON array with exactly `n` entries
//!
//! Sending requests is left to the caller; record each response with
//! [`ApiAssertions::record_response`].
//!
//! # Example
//!
//! ```
//! use jsoncontain::prelude::*;
//! use jsoncontain_http::ApiAssertions;
//!
//! let registry = register_builtin_matchers(MatcherRegistryBuilder::new())?.build();
//! let mut api = ApiAssertions::new(Comparator::new(registry));
//!
//! api.record_response(r#"{"id": 7, "tags": ["a", "b"]}"#);
//! assert!(api.assert_body_contains_json(r#"{"tags": "%arrayLength(2)%"}"#).is_ok());
//!
//! let err = api.assert_body_contains_json(r#"{"id": 8}"#).unwrap_err();
//! assert!(err.to_string().starts_with(
//!     "Assertion that response body contains given JSON failed. Error message: "
//! ));
//! # Ok::<(), RegistryError>(())
//! ```

mod assertions;
mod error;

pub use assertions::{ApiAssertions, ResponseSnapshot};
pub use error::AssertionError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{ApiAssertions, AssertionError, ResponseSnapshot};
    pub use jsoncontain::prelude::*;
}
