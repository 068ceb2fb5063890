use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use postboard::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app_with(config: Config) -> Router {
    let state = postboard::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    postboard::api::router(state)
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 64;
    config.security.argon2_time_cost = 1;
    config
}

async fn spawn_app() -> Router {
    spawn_app_with(test_config()).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("X-Api-Key", token)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn register(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/api/users/register",
            &json!({ "userName": name, "email": email, "password": password }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/users/login",
            &json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["apiKey"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = spawn_app().await;

    let (status, body) = register(&app, "alice", "a@x.com", "pw123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["userId"].is_i64());

    let (status, body) = register(&app, "alice", "a@x.com", "pw123").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email already exists.");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/users/register", &json!({ "email": "a@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required.");
}

#[tokio::test]
async fn test_register_rejects_delimiter_in_email() {
    let app = spawn_app().await;
    let (status, _) = register(&app, "dash", "first-last@x.com", "pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "pw123").await;

    let (wrong_pw_status, wrong_pw_body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            &json!({ "email": "a@x.com", "password": "nope" }),
        ),
    )
    .await;

    let (unknown_status, unknown_body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            &json!({ "email": "ghost@x.com", "password": "pw123" }),
        ),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_status, unknown_status);
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn test_login_token_shape() {
    let app = spawn_app().await;
    let (_, body) = register(&app, "alice", "a@x.com", "pw123").await;
    let user_id = body["data"]["userId"].as_i64().unwrap();

    let token = login(&app, "a@x.com", "pw123").await;
    let fields: Vec<&str> = token.split('-').collect();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0], "mern");
    assert_eq!(fields[1], user_id.to_string());
    assert_eq!(fields[2], "a@x.com");
    assert_eq!(fields[3].len(), 16);
    assert!(fields[3].chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_post_requires_token() {
    let app = spawn_app().await;

    let (status, _) = send(
        &app,
        json_request("POST", "/api/posts", &json!({ "content": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_tokens_are_rejected() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "pw123").await;

    for token in [
        "mern-1-a@x.com",
        "mern-1-a@x.com-abcd-efgh",
        "nope-1-a@x.com-abcd",
        "garbage",
    ] {
        let (status, body) = send(
            &app,
            authed_request("POST", "/api/posts", token, &json!({ "content": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "token {token:?}");
        assert_eq!(body["error"], "Invalid apiKey.");
    }
}

#[tokio::test]
async fn test_token_with_wrong_email_is_invalid() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "pw123").await;
    let token = login(&app, "a@x.com", "pw123").await;

    let forged = token.replacen("a@x.com", "b@x.com", 1);
    let (status, body) = send(
        &app,
        authed_request("POST", "/api/posts", &forged, &json!({ "content": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid apiKey or unauthorized user.");
}

#[tokio::test]
async fn test_cross_user_update_is_not_found() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "pw123").await;
    register(&app, "bob", "b@x.com", "pw456").await;
    let alice = login(&app, "a@x.com", "pw123").await;
    let bob = login(&app, "b@x.com", "pw456").await;

    let (_, body) = send(
        &app,
        authed_request("POST", "/api/posts", &bob, &json!({ "content": "bob's post" })),
    )
    .await;
    let post_id = body["data"]["postId"].as_i64().unwrap();

    let (foreign_status, foreign_body) = send(
        &app,
        authed_request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            &alice,
            &json!({ "content": "hijacked" }),
        ),
    )
    .await;

    let (missing_status, missing_body) = send(
        &app,
        authed_request(
            "PUT",
            "/api/posts/9999",
            &alice,
            &json!({ "content": "hijacked" }),
        ),
    )
    .await;

    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_status, missing_status);
    assert_eq!(foreign_body, missing_body);

    let (_, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/posts/{post_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["content"], "bob's post");
}

#[tokio::test]
async fn test_bearer_and_query_tokens() {
    let mut config = test_config();
    config.server.allow_api_key_in_query = true;
    let app = spawn_app_with(config).await;

    register(&app, "alice", "a@x.com", "pw123").await;
    let token = login(&app, "a@x.com", "pw123").await;

    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/posts")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(json!({ "content": "via bearer" }).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/posts?apiKey={token}"),
            &json!({ "content": "via query" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_query_token_disabled_by_default() {
    let app = spawn_app().await;
    register(&app, "alice", "a@x.com", "pw123").await;
    let token = login(&app, "a@x.com", "pw123").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/posts?apiKey={token}"),
            &json!({ "content": "via query" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body_json["data"]["status"], "ok");
    assert_eq!(body_json["data"]["database"], true);
}
