//! Request and response DTOs for the stream rules endpoint.
//!
//! # Design
//! Responses serialize with the mixed-case names of the rules wire format
//! (`Data`, `Meta`, `Errors`, `Value`, `Tag` next to lower-case `id`, `title`,
//! `type`). Deserialization also accepts the all-lower-case spellings and
//! treats missing or `null` members as empty, so a list call that returns no
//! rules still decodes.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A single rule to add: a filter expression and an optional label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl RuleValue {
    pub fn new(value: impl Into<String>, tag: Option<&str>) -> Self {
        Self {
            value: value.into(),
            tag: tag.map(str::to_string),
        }
    }
}

/// Payload for adding rules: `{"add":[...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRulesRequest {
    pub add: Vec<RuleValue>,
}

impl CreateRulesRequest {
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }
}

/// Accumulates rules for a `CreateRulesRequest`.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    rules: Vec<RuleValue>,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. An empty `tag` is treated as no tag.
    pub fn add_rule(&mut self, value: impl Into<String>, tag: &str) -> &mut Self {
        let tag = (!tag.is_empty()).then_some(tag);
        self.rules.push(RuleValue::new(value, tag));
        self
    }

    pub fn build(&self) -> CreateRulesRequest {
        CreateRulesRequest {
            add: self.rules.clone(),
        }
    }
}

/// Payload for deleting rules: `{"delete":{"ids":[...]}}` or
/// `{"delete":{"values":[...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRulesRequest {
    pub delete: DeleteRulesSpec,
}

/// Which rules to delete. Empty lists are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRulesSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl DeleteRulesRequest {
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delete: DeleteRulesSpec {
                ids: ids.into_iter().map(Into::into).collect(),
                values: Vec::new(),
            },
        }
    }

    pub fn by_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delete: DeleteRulesSpec {
                ids: Vec::new(),
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Result of every rules call: the affected (or current) rules, a summary,
/// and any per-rule rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResponse {
    #[serde(rename = "Data", alias = "data", default, deserialize_with = "null_as_default")]
    pub data: Vec<DataRule>,

    #[serde(rename = "Meta", alias = "meta", default, deserialize_with = "null_as_default")]
    pub meta: MetaRule,

    #[serde(rename = "Errors", alias = "errors", default, deserialize_with = "null_as_default")]
    pub errors: Vec<ErrorRule>,
}

impl RuleResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Some rules were accepted and some rejected in the same call.
    pub fn is_partial(&self) -> bool {
        !self.data.is_empty() && !self.errors.is_empty()
    }
}

/// A rule as stored by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRule {
    #[serde(rename = "Value", alias = "value", default, deserialize_with = "null_as_default")]
    pub value: String,

    #[serde(rename = "Tag", alias = "tag", default, deserialize_with = "null_as_default")]
    pub tag: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRule {
    /// Server timestamp of the response
    #[serde(default, deserialize_with = "null_as_default")]
    pub sent: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: MetaSummary,

    /// Number of rules returned by a list call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u32>,
}

/// Counts of rules affected by an add or delete call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSummary {
    #[serde(default)]
    pub created: u32,

    #[serde(default)]
    pub not_created: u32,

    #[serde(default)]
    pub deleted: u32,

    #[serde(default)]
    pub not_deleted: u32,
}

/// A rule the server refused, e.g. a duplicate or an invalid expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRule {
    #[serde(rename = "Value", alias = "value", default, deserialize_with = "null_as_default")]
    pub value: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
