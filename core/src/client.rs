//! Rules client for the filtered stream.
//!
//! # Design
//! `RulesClient` holds only its transport and carries no state between calls.
//! Each operation is one exchange: encode the payload, hand it to the
//! transport, decode the answer. A transport failure returns before any body
//! is read, and the owned `HttpResponse` is dropped on every path. Encoding
//! and decoding are also exposed as free functions for hosts that drive the
//! HTTP exchange themselves.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpResponse, RulesTransport};
use crate::types::{CreateRulesRequest, DeleteRulesRequest, RuleResponse};

/// Query suffix that asks the server to validate a mutation without applying it.
pub const DRY_RUN_SUFFIX: &str = "?dry_run=true";

/// Creates, deletes and lists stream rules through a `RulesTransport`.
#[derive(Debug, Clone)]
pub struct RulesClient<T> {
    transport: T,
}

impl<T: RulesTransport> RulesClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Add rules. With `dry_run` the server validates them without storing.
    pub fn create(&self, request: &CreateRulesRequest, dry_run: bool) -> Result<RuleResponse, ApiError> {
        debug!(rules = request.add.len(), dry_run, "creating stream rules");
        self.mutate(request, dry_run)
    }

    /// Delete rules by id or value. Uses the same endpoint as `create`.
    pub fn delete(&self, request: &DeleteRulesRequest, dry_run: bool) -> Result<RuleResponse, ApiError> {
        debug!(
            ids = request.delete.ids.len(),
            values = request.delete.values.len(),
            dry_run,
            "deleting stream rules"
        );
        self.mutate(request, dry_run)
    }

    /// List the rules currently attached to the stream.
    pub fn get_rules(&self) -> Result<RuleResponse, ApiError> {
        debug!("listing stream rules");
        let response = self.transport.get_rules().map_err(transport_error)?;
        parse_rule_response(response)
    }

    fn mutate<B: Serialize + ?Sized>(&self, payload: &B, dry_run: bool) -> Result<RuleResponse, ApiError> {
        let body = encode_request(payload)?;
        let response = self
            .transport
            .add_rules(dry_run_suffix(dry_run), &body)
            .map_err(transport_error)?;
        parse_rule_response(response)
    }
}

/// `"?dry_run=true"` when `dry_run`, otherwise `""`.
pub fn dry_run_suffix(dry_run: bool) -> &'static str {
    if dry_run {
        DRY_RUN_SUFFIX
    } else {
        ""
    }
}

/// Serialize a rules payload to its JSON body.
pub fn encode_request<B: Serialize + ?Sized>(payload: &B) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Decode a rules endpoint response. Non-2xx statuses are returned as
/// `ApiError::HttpError` without looking at the body's shape.
pub fn parse_rule_response(response: HttpResponse) -> Result<RuleResponse, ApiError> {
    check_status(&response)?;
    let parsed: RuleResponse = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    debug!(
        data = parsed.data.len(),
        errors = parsed.errors.len(),
        "decoded rule response"
    );
    Ok(parsed)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn transport_error<E>(err: E) -> ApiError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ApiError::TransportError(Box::new(err))
}
