//! Assertion errors.

use jsoncontain::Mismatch;
use thiserror::Error;

/// Why a response assertion failed.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// No response has been recorded yet.
    #[error("The request has not been made yet, so no response object exists.")]
    NoResponse,
    /// The expected document given to the step is not JSON.
    #[error("The supplied parameter is not a valid JSON object.")]
    InvalidJson(#[source] serde_json::Error),
    /// The recorded response body is not JSON.
    #[error("The response body is not valid JSON: {0}")]
    BodyDecode(#[source] serde_json::Error),
    /// The body does not contain the expected document.
    #[error(
        "Assertion that response body contains given JSON failed. \
         Error message: {mismatch}, last response body: {body}"
    )]
    ContainsJson {
        /// First divergence found.
        #[source]
        mismatch: Mismatch,
        /// Compact rendering of the decoded body.
        body: String,
    },
    /// Deliberate failure carrying the readable last body, for debugging a
    /// scenario.
    #[error("{body}")]
    LastResponse {
        /// Compact rendering of the decoded body.
        body: String,
    },
    /// The body is not an array of the expected length.
    #[error(
        "Expected response body to be a JSON array with {expected} entr{}, got {}: \"{body}\".",
        plural_suffix(.expected),
        describe_actual(.actual)
    )]
    ArrayLength {
        /// Required number of entries.
        expected: usize,
        /// Entries found; `None` when the body is not an array.
        actual: Option<usize>,
        /// Pretty-printed body.
        body: String,
    },
}

fn plural_suffix(n: &usize) -> &'static str {
    if *n == 1 {
        "y"
    } else {
        "ies"
    }
}

fn describe_actual(actual: &Option<usize>) -> String {
    match actual {
        Some(n) => n.to_string(),
        None => "no array".to_owned(),
    }
}

impl AssertionError {
    /// The mismatch behind a failed contains-JSON assertion.
    #[must_use]
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::ContainsJson { mismatch, .. } => Some(mismatch),
            _ => None,
        }
    }
}
