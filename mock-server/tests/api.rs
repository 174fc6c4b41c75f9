use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, RulesResponse, RULES_PATH};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn list_request() -> Request<String> {
    Request::builder().uri(RULES_PATH).body(String::new()).unwrap()
}

async fn send(app: &mut Router, request: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_rules_empty() {
    let resp = app().oneshot(list_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = body_json(resp).await;
    assert!(json.get("Data").is_none());
    assert_eq!(json["Meta"]["result_count"], 0);
    assert!(json["Meta"]["sent"].is_string());
}

// --- add ---

#[tokio::test]
async fn add_rules_returns_201_with_wire_casing() {
    let resp = app()
        .oneshot(json_request(
            RULES_PATH,
            r#"{"add":[{"value":"cat has:images","tag":"cats"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["Data"][0]["Value"], "cat has:images");
    assert_eq!(json["Data"][0]["Tag"], "cats");
    assert!(json["Data"][0]["id"].is_string());
    assert_eq!(json["Meta"]["summary"]["created"], 1);
    assert_eq!(json["Meta"]["summary"]["not_created"], 0);
    assert!(json.get("Errors").is_none());
}

#[tokio::test]
async fn add_empty_value_is_rejected_per_rule() {
    let resp = app()
        .oneshot(json_request(RULES_PATH, r#"{"add":[{"value":"  "},{"value":"dog"}]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: RulesResponse = body_json(resp).await;
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].title, "InvalidRule");
}

#[tokio::test]
async fn add_duplicate_within_batch_is_rejected() {
    let resp = app()
        .oneshot(json_request(RULES_PATH, r#"{"add":[{"value":"cat"},{"value":"cat"}]}"#))
        .await
        .unwrap();

    let body: RulesResponse = body_json(resp).await;
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.errors[0].title, "DuplicateRule");
    assert_eq!(body.errors[0].id, body.data[0].id);
}

#[tokio::test]
async fn add_missing_value_returns_422() {
    let resp = app()
        .oneshot(json_request(RULES_PATH, r#"{"add":[{"tag":"no value"}]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn payload_without_add_or_delete_returns_400() {
    let resp = app().oneshot(json_request(RULES_PATH, "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payload_with_add_and_delete_returns_400() {
    let resp = app()
        .oneshot(json_request(
            RULES_PATH,
            r#"{"add":[{"value":"cat"}],"delete":{"ids":["1"]}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_add_list_returns_400() {
    let resp = app().oneshot(json_request(RULES_PATH, r#"{"add":[]}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_delete_spec_returns_400() {
    let resp = app()
        .oneshot(json_request(RULES_PATH, r#"{"delete":{}}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_unknown_id_reports_error() {
    let resp = app()
        .oneshot(json_request(RULES_PATH, r#"{"delete":{"ids":["404"]}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: RulesResponse = body_json(resp).await;
    let summary = body.meta.summary.unwrap();
    assert_eq!(summary.deleted, Some(0));
    assert_eq!(summary.not_deleted, Some(1));
    assert_eq!(body.errors[0].id, "404");
    assert_eq!(body.errors[0].title, "RuleNotFound");
}

// --- dry run ---

#[tokio::test]
async fn dry_run_add_does_not_persist() {
    let mut app = app();

    let resp = send(
        &mut app,
        json_request(&format!("{RULES_PATH}?dry_run=true"), r#"{"add":[{"value":"cat"}]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: RulesResponse = body_json(resp).await;
    assert_eq!(body.data.len(), 1);

    let resp = send(&mut app, list_request()).await;
    let body: RulesResponse = body_json(resp).await;
    assert!(body.data.is_empty());
}

#[tokio::test]
async fn dry_run_delete_matches_real_delete() {
    let mut app = app();

    let resp = send(&mut app, json_request(RULES_PATH, r#"{"add":[{"value":"cat"}]}"#)).await;
    let created: RulesResponse = body_json(resp).await;
    let cat_id = created.data[0].id.clone();

    // the same rule named twice, once by id and once by value
    let payload = format!(r#"{{"delete":{{"ids":["{cat_id}"],"values":["cat"]}}}}"#);

    let resp = send(&mut app, json_request(&format!("{RULES_PATH}?dry_run=true"), &payload)).await;
    let dry: RulesResponse = body_json(resp).await;
    let resp = send(&mut app, json_request(RULES_PATH, &payload)).await;
    let real: RulesResponse = body_json(resp).await;

    let dry_summary = dry.meta.summary.unwrap();
    let real_summary = real.meta.summary.unwrap();
    assert_eq!(real_summary.deleted, Some(1));
    assert_eq!(real_summary.not_deleted, Some(1));
    assert_eq!(dry_summary.deleted, real_summary.deleted);
    assert_eq!(dry_summary.not_deleted, real_summary.not_deleted);
    assert_eq!(dry.errors.len(), real.errors.len());
    assert_eq!(dry.errors[0].value, "cat");
}

#[tokio::test]
async fn dry_run_delete_does_not_persist() {
    let mut app = app();

    send(&mut app, json_request(RULES_PATH, r#"{"add":[{"value":"cat"}]}"#)).await;
    let resp = send(
        &mut app,
        json_request(&format!("{RULES_PATH}?dry_run=true"), r#"{"delete":{"values":["cat"]}}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, list_request()).await;
    let listed: RulesResponse = body_json(resp).await;
    assert_eq!(listed.data.len(), 1);
}

// --- full lifecycle ---

#[tokio::test]
async fn rules_lifecycle() {
    let mut app = app();

    // add two rules
    let resp = send(
        &mut app,
        json_request(
            RULES_PATH,
            r#"{"add":[{"value":"cat has:images","tag":"cats"},{"value":"dog"}]}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: RulesResponse = body_json(resp).await;
    assert_eq!(created.data.len(), 2);
    let cat_id = created.data[0].id.clone();

    // adding one again is a partial success
    let resp = send(
        &mut app,
        json_request(RULES_PATH, r#"{"add":[{"value":"dog"},{"value":"bird"}]}"#),
    )
    .await;
    let partial: RulesResponse = body_json(resp).await;
    assert_eq!(partial.data.len(), 1);
    assert_eq!(partial.data[0].value, "bird");
    assert_eq!(partial.errors.len(), 1);
    assert_eq!(partial.errors[0].value, "dog");

    // list keeps insertion order
    let resp = send(&mut app, list_request()).await;
    let listed: RulesResponse = body_json(resp).await;
    let values: Vec<&str> = listed.data.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["cat has:images", "dog", "bird"]);
    assert_eq!(listed.meta.result_count, Some(3));

    // dry-run delete leaves the rule in place
    let resp = send(
        &mut app,
        json_request(
            &format!("{RULES_PATH}?dry_run=true"),
            &format!(r#"{{"delete":{{"ids":["{cat_id}"]}}}}"#),
        ),
    )
    .await;
    let body: RulesResponse = body_json(resp).await;
    assert_eq!(body.meta.summary.unwrap().deleted, Some(1));

    // delete by id and by value
    let resp = send(
        &mut app,
        json_request(RULES_PATH, &format!(r#"{{"delete":{{"ids":["{cat_id}"]}}}}"#)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(
        &mut app,
        json_request(RULES_PATH, r#"{"delete":{"values":["dog","bird"]}}"#),
    )
    .await;
    let body: RulesResponse = body_json(resp).await;
    assert_eq!(body.meta.summary.unwrap().deleted, Some(2));
    assert!(body.errors.is_empty());

    // list after delete: empty
    let resp = send(&mut app, list_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    let listed: RulesResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(listed.data.is_empty());
}
