mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn admin_requires_login() {
    let app = TestApp::new().await;
    for (method, uri) in [("GET", "/admin"), ("GET", "/admin/users"), ("DELETE", "/admin/users/1")] {
        let response = app.json(method, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body_json(response).await["error"]["code"], "unauthorized");
    }
}

#[tokio::test]
async fn admin_lists_entities_without_secrets() {
    let app = TestApp::new().await;
    let cookie = app.register("admin", "admin@example.com", "secret-pw").await;
    let body = body_json(app.get("/admin", Some(&cookie)).await).await;
    let paths: Vec<&str> = body["data"].as_array().unwrap().iter().map(|e| e["path"].as_str().unwrap()).collect();
    assert_eq!(paths, ["users", "posts", "post_categories", "shops", "categories"]);
    let user_columns = body["data"][0]["columns"].to_string();
    assert!(!user_columns.contains("password"));
}

#[tokio::test]
async fn admin_never_returns_password_and_hashes_writes() {
    let app = TestApp::new().await;
    let cookie = app.register("admin", "admin@example.com", "secret-pw").await;

    let created = app
        .json(
            "POST",
            "/admin/users",
            Some(json!({ "name": "bob", "email": "bob@example.com", "password": "plain-pw" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert!(created["data"].get("password").is_none());
    let id = created["data"]["id"].as_i64().unwrap();

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE id = ?1")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored, "plain-pw");
    assert!(stored.starts_with("$2"));

    let login = app
        .post_form("/login", &[("email", "bob@example.com"), ("password", "plain-pw")], None)
        .await;
    assert_eq!(login.status(), StatusCode::SEE_OTHER);

    let listed = body_json(app.get("/admin/users", Some(&cookie)).await).await;
    assert_eq!(listed["meta"]["count"], 2);
    assert!(listed["data"].as_array().unwrap().iter().all(|u| u.get("password").is_none()));

    let updated = app
        .json("PATCH", &format!("/admin/users/{}", id), Some(json!({ "password": "new-pw" })), Some(&cookie))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert!(body_json(updated).await["data"].get("password").is_none());
    let relogin = app
        .post_form("/login", &[("email", "bob@example.com"), ("password", "new-pw")], None)
        .await;
    assert_eq!(relogin.status(), StatusCode::SEE_OTHER);

    let filtered = app.get("/admin/users?password=x", Some(&cookie)).await;
    assert_eq!(filtered.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_crud_errors() {
    let app = TestApp::new().await;
    let cookie = app.register("admin", "admin@example.com", "secret-pw").await;

    let unknown = app.get("/admin/widgets", Some(&cookie)).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let bad_column = app
        .json("POST", "/admin/categories", Some(json!({ "name": "x", "colour": "red" })), Some(&cookie))
        .await;
    assert_eq!(bad_column.status(), StatusCode::BAD_REQUEST);

    let invalid = app
        .json("POST", "/admin/shops", Some(json!({ "name": "x", "url": "ftp://x" })), Some(&cookie))
        .await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let duplicate = app
        .json(
            "POST",
            "/admin/users",
            Some(json!({ "name": "again", "email": "admin@example.com", "password": "pw" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let missing = app.get("/admin/shops/999", Some(&cookie)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let bad_id = app.get("/admin/shops/abc", Some(&cookie)).await;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_list_filters_and_pages() {
    let app = TestApp::new().await;
    let cookie = app.register("admin", "admin@example.com", "secret-pw").await;
    for (name, price) in [("a", 1), ("b", 2), ("c", 2)] {
        app.json("POST", "/admin/shops", Some(json!({ "name": name, "price": price })), Some(&cookie))
            .await;
    }
    let priced = body_json(app.get("/admin/shops?price=2", Some(&cookie)).await).await;
    assert_eq!(priced["meta"]["count"], 2);

    let page = body_json(app.get("/admin/shops?limit=1&offset=1", Some(&cookie)).await).await;
    assert_eq!(page["data"][0]["name"], "b");
}

#[tokio::test]
async fn admin_cannot_delete_user_with_posts() {
    let app = TestApp::new().await;
    let cookie = app.register("admin", "admin@example.com", "secret-pw").await;
    let created = app
        .json(
            "POST",
            "/admin/posts",
            Some(json!({
                "title": "Via admin",
                "subtitle": "s",
                "description": "d",
                "img_url": "https://img.example/a.png",
                "author_id": 1
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(body_json(created).await["data"]["date"].is_string());

    let response = app.json("DELETE", "/admin/users/1", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn mistyped_admin_writes_keep_home_page_working() {
    let app = TestApp::new().await;
    let cookie = app.register("admin", "admin@example.com", "secret-pw").await;
    let post = |extra: (&str, serde_json::Value)| {
        let mut body = json!({
            "title": format!("Post {}", extra.0),
            "subtitle": "s",
            "description": "d",
            "img_url": "https://img.example/a.png",
            "author_id": 1
        });
        body[extra.0] = extra.1;
        body
    };

    for (column, value) in [("price", json!("abc")), ("date", json!("yesterday")), ("author_id", json!("1"))] {
        let response = app
            .json("POST", "/admin/posts", Some(post((column, value))), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", column);
    }

    let created = app
        .json("POST", "/admin/posts", Some(post(("price", json!(5)))), Some(&cookie))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();
    let patched = app
        .json("PATCH", &format!("/admin/posts/{}", id), Some(json!({ "date": "last week" })), Some(&cookie))
        .await;
    assert_eq!(patched.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let redated = app
        .json(
            "PATCH",
            &format!("/admin/posts/{}", id),
            Some(json!({ "date": "2024-01-31 12:00:00" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(redated.status(), StatusCode::OK);

    let home = app.get("/", None).await;
    assert_eq!(home.status(), StatusCode::OK);
    let page = body_json(home).await;
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["price"], 5);
}
