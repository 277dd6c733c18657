#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use ridepool::router::init_router;
use ridepool::state::AppState;
use ridepool::testing::{seed_account, test_state};
use ridepool_auth::TokenKind;
use ridepool_config::AppEnvironment;
use ridepool_core::Role;
use ridepool_db::MemoryAccountStore;
use ridepool_models::Account;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "carpool2024";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryAccountStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_environment(AppEnvironment::Test)
    }

    pub fn with_environment(environment: AppEnvironment) -> Self {
        let (state, store) = test_state(environment);
        Self {
            router: init_router(state.clone()),
            state,
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    /// Inserts an account directly; the only way to get an admin.
    pub async fn seed(&self, role: Role) -> Account {
        let tag = Uuid::new_v4().simple().to_string();
        seed_account(
            &self.store,
            role,
            &format!("{}-{}@example.com", role, &tag[..12]),
            &format!("{}_{}", role, &tag[..12]),
            PASSWORD,
        )
        .await
    }

    pub fn access_token(&self, account: &Account) -> String {
        self.state
            .tokens
            .issue(account.id, account.role, TokenKind::Access)
            .unwrap()
    }

    /// Seeds an account of `role` and returns it with a valid access token.
    pub async fn signed_in(&self, role: Role) -> (Account, String) {
        let account = self.seed(role).await;
        let token = self.access_token(&account);
        (account, token)
    }

    /// Logs in through the API, returning `(access_token, refresh_token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post(
                "/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        (
            response.body["accessToken"].as_str().unwrap().to_string(),
            response.body["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}

pub fn registration(email: &str, pseudo: &str) -> Value {
    json!({
        "email": email,
        "pseudo": pseudo,
        "password": PASSWORD,
        "firstName": "Jane",
        "lastName": "Doe",
    })
}
