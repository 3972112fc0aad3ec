mod common;

use admin_dashboard::infrastructure::storage::FileStorage;
use axum::http::StatusCode;
use common::{Reply, create_test_app, create_test_app_with_storage, sample_overview};
use std::sync::Arc;

#[tokio::test]
async fn test_login_stores_token_and_sets_cookie() {
    let app = create_test_app(Reply::Ok(sample_overview()), None).await;

    let response = app
        .server
        .post("/login")
        .form(&[("access_token", "tok-123"), ("refresh_token", "ref-456")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin");

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("adminToken=tok-123;"));
    assert!(cookie.contains("HttpOnly"));

    let tokens = &app.state.token_manager;
    assert_eq!(tokens.get_access_token().await.as_deref(), Some("tok-123"));
    assert_eq!(tokens.get_refresh_token().await.as_deref(), Some("ref-456"));
}

#[tokio::test]
async fn test_login_without_refresh_token() {
    let app = create_test_app(Reply::Ok(sample_overview()), None).await;

    app.server
        .post("/login")
        .form(&[("access_token", "tok-123"), ("refresh_token", "")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert_eq!(app.state.token_manager.get_refresh_token().await, None);
}

#[tokio::test]
async fn test_login_rejects_empty_token() {
    let app = create_test_app(Reply::Ok(sample_overview()), None).await;

    let response = app
        .server
        .post("/login")
        .form(&[("access_token", "")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Access token is required"));
    assert!(!app.state.token_manager.is_authenticated().await);
}

#[tokio::test]
async fn test_login_rejects_unsafe_token() {
    let app = create_test_app(Reply::Ok(sample_overview()), None).await;

    let response = app
        .server
        .post("/login")
        .form(&[("access_token", "tok;evil=1")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!app.state.token_manager.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_clears_tokens_and_cookie() {
    let app = create_test_app(Reply::Ok(sample_overview()), Some("tok")).await;

    let response = app
        .server
        .post("/logout")
        .add_header("Cookie", "adminToken=tok")
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
    assert!(
        response
            .header("set-cookie")
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );
    assert!(!app.state.token_manager.is_authenticated().await);
}

#[tokio::test]
async fn test_login_with_unwritable_store_does_not_open_session() {
    let path = std::env::temp_dir().join(format!(
        "admin-dashboard-login-{}-{}.json",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let tmp = path.with_extension("tmp");
    tokio::fs::create_dir(&tmp).await.unwrap();

    let storage = Arc::new(FileStorage::open(&path).await.unwrap());
    let app = create_test_app_with_storage(Reply::Ok(sample_overview()), None, storage).await;

    let response = app
        .server
        .post("/login")
        .form(&[("access_token", "tok-123")])
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert!(!app.state.token_manager.is_authenticated().await);

    let response = app.server.get("/admin").await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);

    tokio::fs::remove_dir(&tmp).await.unwrap();
}
