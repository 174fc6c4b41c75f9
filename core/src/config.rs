//! API location settings.

use serde::{Deserialize, Serialize};

/// Where the filtered-stream endpoints live.
///
/// Every field has a default, so an empty document deserializes to the public
/// API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API (default: https://api.twitter.com)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path of the rules endpoint
    #[serde(default = "default_rules_path")]
    pub rules_path: String,

    /// Path of the filtered stream endpoint
    #[serde(default = "default_stream_path")]
    pub stream_path: String,
}

fn default_api_url() -> String {
    "https://api.twitter.com".into()
}

fn default_rules_path() -> String {
    "/2/tweets/search/stream/rules".into()
}

fn default_stream_path() -> String {
    "/2/tweets/search/stream".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            rules_path: default_rules_path(),
            stream_path: default_stream_path(),
        }
    }
}

impl ApiConfig {
    /// Default paths against a different host, e.g. a local mock server.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}
