//! # Step responses.
//!
//! [`SagaResponse`] is the opaque value a successful action produces. It is
//! forwarded unchanged as the input of the next step, so it is immutable and
//! cheap to clone (`Arc`-backed body).

use std::{fmt, sync::Arc};

/// Result of a successful step, passed on to the next one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SagaResponse {
    succeeded: bool,
    body: Arc<str>,
}

impl SagaResponse {
    /// A successful response carrying `body`.
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self {
            succeeded: true,
            body: body.into(),
        }
    }

    /// A response the remote side flagged as unsuccessful.
    ///
    /// Returning it from an action is still a completed call; policies do not
    /// retry on it.
    pub fn unsuccessful(body: impl Into<Arc<str>>) -> Self {
        Self {
            succeeded: false,
            body: body.into(),
        }
    }

    /// Neutral input for the first step of a saga.
    pub fn empty() -> Self {
        Self::new("{}")
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Default for SagaResponse {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for SagaResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl From<&str> for SagaResponse {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

impl From<String> for SagaResponse {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(SagaResponse::new("ok"), SagaResponse::from("ok"));
        assert_ne!(SagaResponse::new("ok"), SagaResponse::unsuccessful("ok"));
    }

    #[test]
    fn empty_is_default_and_succeeded() {
        let r = SagaResponse::default();
        assert_eq!(r, SagaResponse::empty());
        assert!(r.succeeded());
        assert_eq!(r.to_string(), "{}");
    }
}
