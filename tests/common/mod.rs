#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use casify_api::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        products::CreateProductRequest,
    },
    models::ProductDetails,
    repository::{MemoryCartRepository, MemoryProductRepository, MemoryUserRepository},
    routes::build_router,
    security::{CookieSettings, TokenKeys},
    services::auth_service::{login_user, register_user},
    state::AppState,
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub state: AppState,
    pub users: Arc<MemoryUserRepository>,
    pub carts: Arc<MemoryCartRepository>,
}

pub fn test_app() -> TestApp {
    let users = Arc::new(MemoryUserRepository::new());
    let carts = Arc::new(MemoryCartRepository::new());
    let state = AppState::new(
        users.clone(),
        Arc::new(MemoryProductRepository::new()),
        carts.clone(),
        TokenKeys::new(b"integration-test-secret"),
        CookieSettings::default(),
    );
    TestApp { state, users, carts }
}

pub fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        password: PASSWORD.into(),
    }
}

/// Registers `email` and returns its id together with a fresh token.
pub async fn register_and_login(state: &AppState, email: &str) -> (ObjectId, String) {
    let registered = register_user(state, registration(email))
        .await
        .expect("register")
        .data
        .expect("register data");
    let login = login_user(
        state,
        LoginRequest {
            email: email.into(),
            password: PASSWORD.into(),
        },
    )
    .await
    .expect("login");
    let id = ObjectId::parse_str(&registered.id).expect("object id");
    (id, login.token)
}

pub fn product(title: &str, price: f64, category: &[&str]) -> CreateProductRequest {
    CreateProductRequest {
        title: title.into(),
        description: format!("{title} description"),
        price,
        images: vec![format!("https://cdn.example.com/{title}.png")],
        discount: 0.0,
        details: ProductDetails {
            details: vec!["durable".into()],
            features: vec![],
        },
        rating: 4.0,
        color: "black".into(),
        category: category.iter().map(|c| c.to_string()).collect(),
        comments: vec![],
    }
}

pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

/// Drives the full router once and decodes the JSON body.
pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = build_router(state.clone())
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, headers, body)
}
