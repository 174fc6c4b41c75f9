use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const RULES_PATH: &str = "/2/tweets/search/stream/rules";

const INVALID_RULES: &str = "https://api.twitter.com/2/problems/invalid-rules";
const DUPLICATE_RULES: &str = "https://api.twitter.com/2/problems/duplicate-rules";
const RESOURCE_NOT_FOUND: &str = "https://api.twitter.com/2/problems/resource-not-found";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Tag", default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuleError {
    #[serde(rename = "Value", default)]
    pub value: String,
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_created: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_deleted: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meta {
    pub sent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RulesResponse {
    #[serde(rename = "Data", default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Rule>,
    #[serde(rename = "Meta")]
    pub meta: Meta,
    #[serde(rename = "Errors", default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RuleError>,
}

#[derive(Deserialize)]
pub struct NewRule {
    pub value: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteSpec {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Body of a rules mutation: exactly one non-empty `add` or `delete`.
#[derive(Deserialize)]
pub struct RulesPayload {
    pub add: Option<Vec<NewRule>>,
    pub delete: Option<DeleteSpec>,
}

#[derive(Deserialize)]
pub struct MutationQuery {
    #[serde(default)]
    pub dry_run: bool,
}

pub type Db = Arc<RwLock<Vec<Rule>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route(RULES_PATH, get(list_rules).post(mutate_rules))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn sent() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

async fn list_rules(State(db): State<Db>) -> Json<RulesResponse> {
    let rules = db.read().await;
    info!(count = rules.len(), "list rules");
    Json(RulesResponse {
        data: rules.to_vec(),
        meta: Meta {
            sent: sent(),
            summary: None,
            result_count: Some(count(rules.len())),
        },
        errors: Vec::new(),
    })
}

async fn mutate_rules(
    State(db): State<Db>,
    Query(query): Query<MutationQuery>,
    Json(payload): Json<RulesPayload>,
) -> Result<(StatusCode, Json<RulesResponse>), StatusCode> {
    match (payload.add, payload.delete) {
        (Some(add), None) if !add.is_empty() => {
            let response = add_rules(&db, add, query.dry_run).await;
            Ok((StatusCode::CREATED, Json(response)))
        }
        (None, Some(delete)) if !(delete.ids.is_empty() && delete.values.is_empty()) => {
            let response = delete_rules(&db, delete, query.dry_run).await;
            Ok((StatusCode::OK, Json(response)))
        }
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn add_rules(db: &Db, rules: Vec<NewRule>, dry_run: bool) -> RulesResponse {
    let mut stored = db.write().await;
    let mut created: Vec<Rule> = Vec::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.value.trim().is_empty() {
            errors.push(RuleError {
                value: rule.value,
                id: String::new(),
                title: "InvalidRule".to_string(),
                kind: INVALID_RULES.to_string(),
            });
            continue;
        }

        let existing = stored
            .iter()
            .chain(created.iter())
            .find(|r| r.value == rule.value)
            .map(|r| r.id.clone());
        if let Some(id) = existing {
            errors.push(RuleError {
                value: rule.value,
                id,
                title: "DuplicateRule".to_string(),
                kind: DUPLICATE_RULES.to_string(),
            });
            continue;
        }

        created.push(Rule {
            value: rule.value,
            tag: rule.tag.unwrap_or_default(),
            id: Uuid::new_v4().simple().to_string(),
        });
    }

    info!(created = created.len(), rejected = errors.len(), dry_run, "add rules");
    if !dry_run {
        stored.extend(created.iter().cloned());
    }

    RulesResponse {
        meta: Meta {
            sent: sent(),
            summary: Some(Summary {
                created: Some(count(created.len())),
                not_created: Some(count(errors.len())),
                ..Summary::default()
            }),
            result_count: None,
        },
        data: created,
        errors,
    }
}

async fn delete_rules(db: &Db, spec: DeleteSpec, dry_run: bool) -> RulesResponse {
    let mut stored = db.write().await;
    // Both modes match against a working copy; only a real delete commits it.
    let mut view = stored.clone();
    let mut deleted = 0usize;
    let mut errors = Vec::new();

    for id in spec.ids {
        match view.iter().position(|r| r.id == id) {
            Some(index) => {
                view.remove(index);
                deleted += 1;
            }
            None => errors.push(not_found(String::new(), id)),
        }
    }
    for value in spec.values {
        match view.iter().position(|r| r.value == value) {
            Some(index) => {
                view.remove(index);
                deleted += 1;
            }
            None => errors.push(not_found(value, String::new())),
        }
    }

    info!(deleted, missing = errors.len(), dry_run, "delete rules");
    if !dry_run {
        *stored = view;
    }

    RulesResponse {
        data: Vec::new(),
        meta: Meta {
            sent: sent(),
            summary: Some(Summary {
                deleted: Some(count(deleted)),
                not_deleted: Some(count(errors.len())),
                ..Summary::default()
            }),
            result_count: None,
        },
        errors,
    }
}

/// Saturating conversion for the summary counters.
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn not_found(value: String, id: String) -> RuleError {
    RuleError {
        value,
        id,
        title: "RuleNotFound".to_string(),
        kind: RESOURCE_NOT_FOUND.to_string(),
    }
}
