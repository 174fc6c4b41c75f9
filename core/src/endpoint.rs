//! Request builders for transport implementations.
//!
//! # Design
//! `Endpoints` maps the logical calls onto plain-data `HttpRequest` values
//! without touching the network. A `RulesTransport` implementation can build
//! its request here and only deal with executing it.

use crate::config::ApiConfig;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::QueryParams;

/// Resolved URLs of the filtered-stream endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    rules_url: String,
    stream_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

impl Endpoints {
    /// Default endpoint paths under `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ApiConfig::with_api_url(base_url))
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        let base = config.api_url.trim_end_matches('/');
        Self {
            rules_url: format!("{base}{}", config.rules_path),
            stream_url: format!("{base}{}", config.stream_path),
        }
    }

    pub fn rules_url(&self) -> &str {
        &self.rules_url
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// `POST` to the rules endpoint. `query_suffix` is appended verbatim.
    pub fn build_add_rules(&self, query_suffix: &str, json_body: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{query_suffix}", self.rules_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(json_body.to_string()),
        }
    }

    pub fn build_get_rules(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.rules_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `GET` the filtered stream with the given expansions and fields.
    pub fn build_search_stream(&self, params: &QueryParams) -> HttpRequest {
        let url = if params.is_empty() {
            self.stream_url.clone()
        } else {
            format!("{}?{}", self.stream_url, params.to_query_string())
        };
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }
}
