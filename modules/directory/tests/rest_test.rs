use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

use directory::{build_state, ensure_schema, router};

async fn test_router() -> Router {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("connect sqlite");
    ensure_schema(&db).await.expect("create schema");
    router(build_state(db))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_profession(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/professions", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_user(app: &Router, name: &str, profession_id: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({ "name": name, "profession_id": profession_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn user_round_trip_over_http() {
    let app = test_router().await;
    let profession_id = create_profession(&app, "Engineer").await;

    let (status, created) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "alice", "profession_id": profession_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "ALICE");
    assert_eq!(created["profession"]["name"], "Engineer");
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, problem) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "DIRECTORY_NOT_FOUND");
    assert_eq!(problem["status"], 404);
}

#[tokio::test]
async fn list_users_returns_the_page_envelope() {
    let app = test_router().await;
    let profession_id = create_profession(&app, "Engineer").await;
    for name in ["carol", "alice", "bob"] {
        create_user(&app, name, &profession_id).await;
    }

    let (status, page) = send(
        &app,
        "GET",
        "/users?order_by=%2Bname&limit=2&offset=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items_count"], 2);
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["offset"], 0);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["ALICE", "BOB"]);
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() {
    let app = test_router().await;
    let (status, problem) = send(&app, "GET", "/users?order_by=%2Bssn", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["code"], "LISTING_VALIDATION");
    assert!(problem["detail"].as_str().unwrap().contains("ssn"));
}

#[tokio::test]
async fn conflicting_sort_directions_are_rejected() {
    let app = test_router().await;
    let (status, problem) = send(
        &app,
        "GET",
        "/users?order_by=%2Bname&order_by=-name",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(problem["detail"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn out_of_range_pagination_is_rejected() {
    let app = test_router().await;
    for uri in ["/users?limit=0", "/users?limit=51", "/users?offset=1001"] {
        let (status, problem) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(problem["code"], "LISTING_VALIDATION", "{uri}");
    }
}

#[tokio::test]
async fn empty_token_set_still_paginates() {
    let app = test_router().await;
    let (status, page) = send(&app, "GET", "/companies?limit=5&offset=20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"], json!([]));
    assert_eq!(page["items_count"], 0);
    assert_eq!(page["limit"], 5);
    assert_eq!(page["offset"], 20);
}

#[tokio::test]
async fn orders_reject_self_payment_and_embed_short_users() {
    let app = test_router().await;
    let profession_id = create_profession(&app, "Trader").await;
    let payer = create_user(&app, "alice", &profession_id).await;
    let payee = create_user(&app, "bob", &profession_id).await;

    let (status, problem) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "amount": "10.00", "payer_id": payer, "payee_id": payer })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["code"], "DIRECTORY_VALIDATION");

    let (status, order) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "amount": "150.25", "payer_id": payer, "payee_id": payee })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["payer"]["name"], "ALICE");
    assert_eq!(order["payee"]["name"], "BOB");

    let (status, page) = send(&app, "GET", "/orders?order_by=-amount", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_count"], 1);
}

#[tokio::test]
async fn empty_patch_is_a_validation_error() {
    let app = test_router().await;
    let profession_id = create_profession(&app, "Engineer").await;
    let user = create_user(&app, "alice", &profession_id).await;

    let (status, problem) = send(&app, "PATCH", &format!("/users/{user}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["code"], "DIRECTORY_VALIDATION");
}

#[tokio::test]
async fn duplicate_links_conflict_and_scoping_is_exclusive() {
    let app = test_router().await;
    let profession_id = create_profession(&app, "Consultant").await;
    let user = create_user(&app, "alice", &profession_id).await;
    let (_, company) = send(&app, "POST", "/companies", Some(json!({ "name": "Acme" }))).await;
    let company_id = company["id"].as_str().unwrap().to_string();

    let link = json!({ "user_id": user, "company_id": company_id });
    let (status, _) = send(&app, "POST", "/user-company-links", Some(link.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, problem) = send(&app, "POST", "/user-company-links", Some(link)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(problem["code"], "DIRECTORY_CONFLICT");

    // listing scoped by user embeds companies
    let (status, page) = send(
        &app,
        "GET",
        &format!("/user-company-links?user_id={user}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"][0]["company"]["name"], "Acme");

    // no scope or both scopes is invalid
    let (status, _) = send(&app, "GET", "/user-company-links", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = send(
        &app,
        "GET",
        &format!("/user-company-links?user_id={user}&company_id={company_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // links are not sortable at all
    let (status, _) = send(
        &app,
        "GET",
        &format!("/user-company-links?user_id={user}&order_by=%2Bcreated_at"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/user-company-links/{user}/{company_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
