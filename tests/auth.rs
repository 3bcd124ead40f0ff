mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn registration_authenticates_immediately() {
    let app = TestApp::new().await;
    let response = app
        .post_form(
            "/register",
            &[
                ("username", "ana"),
                ("email", "ana@example.com"),
                ("password", "secret-pw"),
                ("confirm_password", "secret-pw"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let session = session_cookie(&response).unwrap();
    let flash = flash_cookie(&response).unwrap();

    let page = body_json(app.get("/", Some(&format!("{}; {}", session, flash))).await).await;
    assert_eq!(page["template"], "index.html");
    assert_eq!(page["current_user"]["name"], "ana");
    assert_eq!(page["flashes"][0]["category"], "success");
    assert_eq!(page["flashes"][0]["message"], "Account created for ana!");

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = 'ana@example.com'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$2"));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    app.register("ana", "ana@example.com", "secret-pw").await;
    let response = app
        .post_form(
            "/register",
            &[
                ("username", "other"),
                ("email", "ana@example.com"),
                ("password", "pw2"),
                ("confirm_password", "pw2"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(session_cookie(&response).is_none());
    let page = body_json(response).await;
    assert_eq!(page["template"], "register.html");
    assert!(page["errors"]["email"].is_array());
    assert_eq!(page["flashes"][0]["category"], "danger");
    assert_eq!(page["form"]["username"], "other");
    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn invalid_registration_reports_field_errors() {
    let app = TestApp::new().await;
    let response = app
        .post_form(
            "/register",
            &[
                ("username", "a"),
                ("email", "not-an-email"),
                ("password", "pw"),
                ("confirm_password", "other"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_json(response).await;
    for field in ["username", "email", "confirm_password"] {
        assert!(page["errors"][field].is_array(), "missing error for {}", field);
    }
    assert!(page["form"].get("password").is_none());
    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn login_with_correct_credentials() {
    let app = TestApp::new().await;
    app.register("ana", "ana@example.com", "secret-pw").await;
    let response = app
        .post_form("/login", &[("email", "ana@example.com"), ("password", "secret-pw")], None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let line = set_cookie_line(&response, "session").unwrap();
    assert!(!line.contains("Max-Age"), "unremembered session is a browser-session cookie");
    let session = session_cookie(&response).unwrap();
    let page = body_json(app.get("/home", Some(&session)).await).await;
    assert_eq!(page["current_user"]["email"], "ana@example.com");
}

#[tokio::test]
async fn remembered_login_persists_cookie() {
    let app = TestApp::new().await;
    app.register("ana", "ana@example.com", "secret-pw").await;
    let response = app
        .post_form(
            "/login",
            &[("email", "ana@example.com"), ("password", "secret-pw"), ("remember", "y")],
            None,
        )
        .await;
    let line = set_cookie_line(&response, "session").unwrap();
    assert!(line.contains("Max-Age=31536000"));
}

#[tokio::test]
async fn login_with_wrong_password_does_not_authenticate() {
    let app = TestApp::new().await;
    app.register("ana", "ana@example.com", "secret-pw").await;
    let response = app
        .post_form("/login", &[("email", "ana@example.com"), ("password", "wrong")], None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    let page = body_json(response).await;
    assert_eq!(page["template"], "login.html");
    assert!(page["current_user"].is_null());
    assert_eq!(
        page["flashes"][0]["message"],
        "Login Unsuccessful. Please check username and password"
    );

    let unknown = app
        .post_form("/login", &[("email", "nobody@example.com"), ("password", "secret-pw")], None)
        .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_follows_only_local_next() {
    let app = TestApp::new().await;
    app.register("ana", "ana@example.com", "secret-pw").await;
    let creds = [("email", "ana@example.com"), ("password", "secret-pw")];

    let local = app.post_form("/login?next=%2Fcreate_post", &creds, None).await;
    assert_eq!(location(&local), "/create_post");

    for next in [
        "https%3A%2F%2Fevil.example",
        "%2F%2Fevil.example",
        "%2F%09%2Fevil.example",
        "%2F%0D%0A%2Fevil.example",
    ] {
        let response = app.post_form(&format!("/login?next={}", next), &creds, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }
}

#[tokio::test]
async fn logout_clears_session() {
    let app = TestApp::new().await;
    let session = app.register("ana", "ana@example.com", "secret-pw").await;
    let response = app.get("/logout", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let line = set_cookie_line(&response, "session").unwrap();
    assert!(line.contains("Max-Age=0"));
    let flash = flash_cookie(&response).unwrap();
    let page = body_json(app.get("/", Some(&flash)).await).await;
    assert!(page["current_user"].is_null());
    assert_eq!(page["flashes"][0]["message"], "You have been logged out.");
}

#[tokio::test]
async fn tampered_session_is_anonymous() {
    let app = TestApp::new().await;
    let session = app.register("ana", "ana@example.com", "secret-pw").await;
    let tampered = format!("{}x", session);
    let page = body_json(app.get("/", Some(&tampered)).await).await;
    assert!(page["current_user"].is_null());
}

#[tokio::test]
async fn overlong_email_rerenders_registration() {
    let app = TestApp::new().await;
    let email = format!("{}@example.com", "a".repeat(100));
    let response = app
        .post_form(
            "/register",
            &[
                ("username", "ana"),
                ("email", &email),
                ("password", "secret-pw"),
                ("confirm_password", "secret-pw"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_json(response).await;
    assert_eq!(page["template"], "register.html");
    assert!(page["errors"]["email"].is_array());
    assert_eq!(app.user_count().await, 0);
}
