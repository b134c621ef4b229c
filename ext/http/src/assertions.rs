//! Last-response state and body assertions.

use bytes::Bytes;
use jsoncontain::Comparator;
use serde_json::Value;

use crate::AssertionError;

/// The body of the most recent response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    body: Bytes,
}

impl ResponseSnapshot {
    /// Wrap a raw response body.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// [`AssertionError::BodyDecode`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, AssertionError> {
        serde_json::from_slice(&self.body).map_err(AssertionError::BodyDecode)
    }
}

/// Response body assertions against the last recorded response.
///
/// Holds a [`Comparator`] configured once per suite and the most recent
/// [`ResponseSnapshot`]. Every assertion fails with
/// [`AssertionError::NoResponse`] until a response has been recorded.
#[derive(Debug, Clone)]
pub struct ApiAssertions {
    comparator: Comparator,
    last_response: Option<ResponseSnapshot>,
}

impl ApiAssertions {
    /// Create assertions backed by `comparator`, with no response yet.
    #[must_use]
    pub fn new(comparator: Comparator) -> Self {
        Self {
            comparator,
            last_response: None,
        }
    }

    /// Returns the comparator.
    #[must_use]
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Replace the last response with `body`.
    pub fn record_response(&mut self, body: impl Into<Bytes>) {
        let snapshot = ResponseSnapshot::new(body);
        tracing::debug!(len = snapshot.body.len(), "recorded response");
        self.last_response = Some(snapshot);
    }

    /// Forget the last response.
    pub fn clear_response(&mut self) {
        self.last_response = None;
    }

    /// Returns the last recorded response.
    #[must_use]
    pub fn last_response(&self) -> Option<&ResponseSnapshot> {
        self.last_response.as_ref()
    }

    fn require_response(&self) -> Result<&ResponseSnapshot, AssertionError> {
        self.last_response.as_ref().ok_or(AssertionError::NoResponse)
    }

    /// Assert the last body contains the JSON document `expected`.
    ///
    /// `expected` may use `%name(args)%` placeholders.
    ///
    /// # Errors
    ///
    /// - [`AssertionError::NoResponse`] before any response was recorded
    /// - [`AssertionError::InvalidJson`] if `expected` is not JSON
    /// - [`AssertionError::BodyDecode`] if the body is not JSON
    /// - [`AssertionError::ContainsJson`] on the first divergence
    pub fn assert_body_contains_json(&self, expected: &str) -> Result<(), AssertionError> {
        let response = self.require_response()?;
        let expected: Value =
            serde_json::from_str(expected).map_err(AssertionError::InvalidJson)?;
        let body = response.json()?;

        self.comparator
            .compare(&expected, &body)
            .map_err(|mismatch| AssertionError::ContainsJson {
                mismatch,
                body: body.to_string(),
            })
    }

    /// Assert the last body is a JSON array with exactly `length` entries.
    ///
    /// # Errors
    ///
    /// - [`AssertionError::NoResponse`] before any response was recorded
    /// - [`AssertionError::BodyDecode`] if the body is not JSON
    /// - [`AssertionError::ArrayLength`] if it is not an array of `length`
    pub fn assert_body_array_length(&self, length: usize) -> Result<(), AssertionError> {
        let body = self.require_response()?.json()?;
        let actual = body.as_array().map(Vec::len);
        if actual == Some(length) {
            return Ok(());
        }
        Err(AssertionError::ArrayLength {
            expected: length,
            actual,
            body: format!("{body:#}"),
        })
    }

    /// The decoded last body, re-encoded compactly.
    ///
    /// # Errors
    ///
    /// [`AssertionError::NoResponse`] or [`AssertionError::BodyDecode`].
    pub fn readable_last_response_body(&self) -> Result<String, AssertionError> {
        Ok(self.require_response()?.json()?.to_string())
    }

    /// Always fails, with the readable last body as the message.
    ///
    /// # Errors
    ///
    /// [`AssertionError::LastResponse`] when a JSON body was recorded,
    /// otherwise [`AssertionError::NoResponse`] or [`AssertionError::BodyDecode`].
    pub fn print_last_response(&self) -> Result<(), AssertionError> {
        Err(AssertionError::LastResponse {
            body: self.readable_last_response_body()?,
        })
    }
}
