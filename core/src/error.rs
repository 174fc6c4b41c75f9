//! Error types for the filtered-stream rules client.
//!
//! # Design
//! The variants follow the three stages of a rules call: encoding the request,
//! performing the exchange, and decoding the response. A transport failure
//! keeps the collaborator's own error as its source so callers can downcast
//! it. Rule-level rejections reported by the API are not errors; they arrive
//! in `RuleResponse::errors`.

use thiserror::Error;

/// Boxed error produced by a `RulesTransport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `RulesClient` and the `parse_*` helpers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The transport could not complete the exchange.
    #[error("transport failed: {0}")]
    TransportError(#[source] BoxError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into a `RuleResponse`.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// True when the failure happened during the exchange itself rather than
    /// while encoding or decoding.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::TransportError(_) | ApiError::HttpError { .. })
    }
}
