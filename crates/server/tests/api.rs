use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use ledger::{Ledger, SqlStatementStore, SqlUserStore};
use migration::MigratorTrait;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    server::router(Ledger::new(
        SqlUserStore::new(db.clone()),
        SqlStatementStore::new(db),
    ))
}

fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{email}:{password}")))
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, name: &str, email: &str, password: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            None,
            &json!({ "name": name, "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = test_app().await;

    let user = register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    assert!(user.get("id").is_some());
    assert_eq!(user["name"], "Lorenzo Marcelo");
    assert_eq!(user["email"], "lorenzo@gmail.com");
    assert!(user.get("password").is_none());
    assert!(user.get("created_at").is_some());
    assert!(user.get("updated_at").is_some());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            None,
            &json!({ "name": "Someone Else", "email": "lorenzo@gmail.com", "password": "67890" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn deposit_creates_a_statement() {
    let app = test_app().await;
    let user = register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/statements/deposit",
            Some(&auth),
            &json!({ "amount_minor": 400, "description": "income" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let statement = body_json(response).await;
    assert!(statement.get("id").is_some());
    assert_eq!(statement["user_id"], user["id"]);
    assert_eq!(statement["type"], "deposit");
    assert_eq!(statement["amount_minor"], 400);
    assert_eq!(statement["description"], "income");
    assert!(statement.get("created_at").is_some());
    assert!(statement.get("updated_at").is_some());
}

#[tokio::test]
async fn withdraw_within_balance_is_created() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    app.clone()
        .oneshot(json_request(
            "POST",
            "/statements/deposit",
            Some(&auth),
            &json!({ "amount_minor": 400, "description": "income" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/statements/withdraw",
            Some(&auth),
            &json!({ "amount_minor": 200, "description": "rental" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let statement = body_json(response).await;
    assert_eq!(statement["type"], "withdraw");
    assert_eq!(statement["amount_minor"], 200);
    assert_eq!(statement["description"], "rental");
}

#[tokio::test]
async fn withdraw_beyond_balance_is_bad_request() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/statements/withdraw",
            Some(&auth),
            &json!({ "amount_minor": 500, "description": "rental" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Insufficient funds" })
    );
}

#[tokio::test]
async fn balance_sums_the_history() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    for (uri, amount, description) in [
        ("/statements/deposit", 400, "income"),
        ("/statements/withdraw", 100, "rental"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                uri,
                Some(&auth),
                &json!({ "amount_minor": amount, "description": description }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get_request("/statements/balance", &auth))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let account = body_json(response).await;
    assert_eq!(account["balance_minor"], 300);
    assert_eq!(account["statements"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn statement_operation_is_returned_by_id() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/statements/deposit",
            Some(&auth),
            &json!({ "amount_minor": 400, "description": "income" }),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/statements/{id}"), &auth))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn unknown_statement_is_not_found() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    let response = app
        .clone()
        .oneshot(get_request(
            "/statements/0b9fa1cd-7f47-4e5f-8a45-6b3dbf0e2f3a",
            &auth,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = test_app().await;
    register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;

    let auth = basic_auth("lorenzo@gmail.com", "wrong");
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/statements/deposit",
            Some(&auth),
            &json!({ "amount_minor": 400, "description": "income" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(get_request("/profile", &basic_auth("nobody@gmail.com", "x")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_returns_the_authenticated_user() {
    let app = test_app().await;
    let user = register(&app, "Lorenzo Marcelo", "lorenzo@gmail.com", "12345").await;
    let auth = basic_auth("lorenzo@gmail.com", "12345");

    let response = app.clone().oneshot(get_request("/profile", &auth)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(response).await;
    assert_eq!(profile["id"], user["id"]);
    assert_eq!(profile["email"], "lorenzo@gmail.com");
    assert!(profile.get("password").is_none());
}
