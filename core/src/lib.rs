//! Client core for a filtered tweet stream.
//!
//! # Overview
//! Two independent pieces:
//! - `StreamQueryParamsBuilder` collects expansions and field selections and
//!   renders them as query parameters for the stream connection.
//! - `RulesClient` creates, deletes and lists the server-side rules that
//!   decide which tweets the stream delivers.
//!
//! # Design
//! - The core never performs I/O. `RulesClient` calls a caller-supplied
//!   `RulesTransport`; `Endpoints` builds plain-data `HttpRequest` values for
//!   transport implementations.
//! - Each rules call is a single exchange with no state kept between calls.
//! - Rule-level rejections come back inside `RuleResponse`, not as errors.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::{dry_run_suffix, encode_request, parse_rule_response, RulesClient, DRY_RUN_SUFFIX};
pub use config::ApiConfig;
pub use endpoint::Endpoints;
pub use error::{ApiError, BoxError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RulesTransport};
pub use query::{QueryParams, StreamQueryParamsBuilder};
pub use types::{
    CreateRulesRequest, DataRule, DeleteRulesRequest, DeleteRulesSpec, ErrorRule, MetaRule, MetaSummary,
    RuleBuilder, RuleResponse, RuleValue,
};
