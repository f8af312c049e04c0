use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use lognest::domain::types::UserId;
use lognest::models::config::ServerConfig;
use lognest::routes::configure;
use lognest::token::Claims;

mod common;

const SECRET: &str = "route-test-secret";

fn server_config() -> ServerConfig {
    ServerConfig {
        app_env: "test".to_string(),
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        auth_service_url: "http://127.0.0.1:9".to_string(),
        jwt_secret: SECRET.to_string(),
        cookie_domain: None,
        cors_allowed_origins: vec![],
        request_timeout_secs: 5,
    }
}

fn bearer(user_id: UserId) -> String {
    let claims = Claims {
        user_id: user_id.to_string(),
        email: "maker@example.com".to_string(),
        role_id: 2,
        provider: None,
        session_id: Some("session-1".to_string()),
        mfa_completed: false,
        exp: Utc::now().timestamp() + 300,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

macro_rules! app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .configure(configure)
                .app_data(web::Data::new($test_db.repository()))
                .app_data(web::Data::new(server_config())),
        )
        .await
    };
}

#[actix_web::test]
async fn hello_answers_without_auth() {
    let test_db = common::TestDb::new("routes_hello.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/hello").to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert_eq!(body, "Hello, World!");
}

#[actix_web::test]
async fn protected_routes_explain_missing_or_bad_tokens() {
    let test_db = common::TestDb::new("routes_auth_errors.db");
    let app = app!(test_db);

    let cases = [
        (None, "unauthorized, no token provided"),
        (Some("Token abc"), "unauthorized, invalid token format"),
        (Some("Bearer a b"), "unauthorized, invalid token format"),
        (Some("Bearer not-a-jwt"), "unauthorized, invalid token"),
    ];

    for (authorization, message) in cases {
        let mut req = test::TestRequest::get().uri("/api/projects");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{authorization:?}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"status": "error", "message": message}));
    }
}

#[actix_web::test]
async fn tags_are_created_and_listed_with_pagination() {
    let test_db = common::TestDb::new("routes_tags.db");
    let app = app!(test_db);
    let token = bearer(UserId::new());

    for name in ["oak", "ash", "walnut"] {
        let req = test::TestRequest::post()
            .uri("/api/tags")
            .insert_header((header::AUTHORIZATION, token.as_str()))
            .set_json(json!({"name": name}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/tags?page=2&limit=2&sort_by=name&sort_order=asc")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "walnut");
    assert_eq!(
        body["pagination"],
        json!({
            "limit": 2,
            "page": 2,
            "total_rows": 3,
            "total_pages": 2,
            "sort_by": "name",
            "sort_order": "asc"
        })
    );
}

#[actix_web::test]
async fn unparseable_query_is_bad_request() {
    let test_db = common::TestDb::new("routes_bad_query.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/tags?page=abc")
        .insert_header((header::AUTHORIZATION, bearer(UserId::new())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "invalid query parameters");
}

#[actix_web::test]
async fn malformed_json_body_is_bad_request() {
    let test_db = common::TestDb::new("routes_bad_json.db");
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header((header::AUTHORIZATION, bearer(UserId::new())))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "invalid request body");
}

#[actix_web::test]
async fn private_project_is_hidden_from_other_users() {
    let test_db = common::TestDb::new("routes_private_project.db");
    let app = app!(test_db);
    let owner = bearer(UserId::new());
    let stranger = bearer(UserId::new());

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header((header::AUTHORIZATION, owner.as_str()))
        .set_json(json!({"name": "timber"}))
        .to_request();
    let tag: Value = test::call_and_read_body_json(&app, req).await;
    let tag_id = tag["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header((header::AUTHORIZATION, owner.as_str()))
        .set_json(json!({
            "title": "Secret cabin",
            "description": "off grid",
            "is_public": false,
            "tag_ids": [tag_id]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["data"]["tags"][0]["name"], "timber");
    let project_id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/projects/me")
        .insert_header((header::AUTHORIZATION, owner.as_str()))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["pagination"]["total_rows"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/projects/{project_id}"))
        .insert_header((header::AUTHORIZATION, stranger.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/projects/{project_id}"))
        .insert_header((header::AUTHORIZATION, stranger.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn creating_project_with_unknown_tag_is_rejected() {
    let test_db = common::TestDb::new("routes_unknown_tag.db");
    let app = app!(test_db);
    let token = bearer(UserId::new());

    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({"title": "Garden shed", "tag_ids": [UserId::new().to_string()]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/projects/me")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["pagination"]["total_rows"], 0);
}

#[actix_web::test]
async fn log_lookup_distinguishes_bad_and_unknown_ids() {
    let test_db = common::TestDb::new("routes_log_lookup.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/api/logs/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "invalid id format");

    let req = test::TestRequest::get()
        .uri(&format!("/api/logs/{}", UserId::new()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "log not found");
}
