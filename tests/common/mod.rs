// Shared helpers for router-level tests against an in-memory database.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use shopfront::{app, connect_and_migrate, AppState, Settings};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut settings = Settings::in_memory(SECRET);
        settings.bcrypt_cost = 4;
        let pool = connect_and_migrate(&settings).await.unwrap();
        let state = AppState::new(pool.clone(), settings).unwrap();
        TestApp {
            router: app(state),
            pool,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)], cookie: Option<&str>) -> Response<Body> {
        let body = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Register a user and return the `Cookie` header value for their session.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/register",
                &[
                    ("username", username),
                    ("email", email),
                    ("password", password),
                    ("confirm_password", password),
                ],
                None,
            )
            .await;
        assert_eq!(response.status(), 303);
        session_cookie(&response).expect("registration sets a session cookie")
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The full `Set-Cookie` line for `name`, if the response sets it.
pub fn set_cookie_line(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&format!("{}=", name)))
}

/// `session=<token>` ready for a `Cookie` header, when the response sets a non-empty session.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    set_cookie_line(response, "session")
        .and_then(|line| line.split(';').next().map(str::to_string))
        .filter(|pair| pair != "session=")
}

/// `flash=<value>` ready for a `Cookie` header.
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    set_cookie_line(response, "flash").and_then(|line| line.split(';').next().map(str::to_string))
}

pub fn location(response: &Response<Body>) -> String {
    response.headers()[header::LOCATION].to_str().unwrap().to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
