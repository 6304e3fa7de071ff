//! Integration Test: 管理画面のBasic認証
//!
//! 管理画面は資格情報なしでは401、正しい資格情報でのみ表示・操作できること。

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use payment_reminder::api::ADMIN_PATH;
use tower::ServiceExt;

use crate::support::app::{basic_auth, body_string, create_test_app, ADMIN_PASSWORD, ADMIN_USERNAME};

async fn get_admin(app: &Router, authorization: Option<&str>) -> axum::http::Response<Body> {
    let mut builder = Request::builder().method("GET").uri(ADMIN_PATH);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn admin_requires_credentials() {
    let (app, _state) = create_test_app(false).await;

    let response = get_admin(&app, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response.headers()[header::WWW_AUTHENTICATE]
        .to_str()
        .unwrap();
    assert!(challenge.starts_with("Basic realm=\"Payment Reminder\""));
}

#[tokio::test]
async fn admin_rejects_wrong_password_and_user() {
    let (app, _state) = create_test_app(false).await;

    let wrong_password = basic_auth(ADMIN_USERNAME, "nope");
    assert_eq!(
        get_admin(&app, Some(&wrong_password)).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let wrong_user = basic_auth("someone", ADMIN_PASSWORD);
    assert_eq!(
        get_admin(&app, Some(&wrong_user)).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn admin_accepts_valid_credentials() {
    let (app, _state) = create_test_app(false).await;

    let response = get_admin(&app, Some(&basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Payment Reminder Control"));
    assert!(html.contains("Add New Client Website"));
}

#[tokio::test]
async fn unauthenticated_post_does_not_mutate() {
    let (app, state) = create_test_app(false).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(ADMIN_PATH)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("new_client=a.example.com&add_new_client="))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(state.registry.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn authenticated_post_adds_client() {
    let (app, state) = create_test_app(false).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(ADMIN_PATH)
                .header(header::AUTHORIZATION, basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("new_client=a.example.com&add_new_client="))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.registry.load().await.unwrap().contains("a.example.com"));
}
