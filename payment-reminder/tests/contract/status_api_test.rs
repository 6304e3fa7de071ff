//! Contract Test: GET /payment-reminder/v1/status
//!
//! クライアントサイトのスクリプトが参照する公開APIの形と、CORS・キャッシュヘッダーを検証する。

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::app::{body_string, create_test_app, post_admin_form};

async fn get_status(app: &Router, uri: &str, origin: Option<&str>) -> axum::http::Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// 未登録ドメインは200で既定値を返す
#[tokio::test]
async fn unknown_domain_returns_default_record() {
    let (app, _state) = create_test_app(true).await;

    let response = get_status(
        &app,
        "/payment-reminder/v1/status?domain=unknown.example.com",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"show_popup": false, "redirect_url": ""})
    );
}

/// domainパラメータなしでも200で既定値を返す
#[tokio::test]
async fn missing_domain_returns_default_record() {
    let (app, _state) = create_test_app(true).await;

    let response = get_status(&app, "/payment-reminder/v1/status", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"show_popup": false, "redirect_url": ""})
    );
}

/// 登録・更新したクライアントの状態が返る
#[tokio::test]
async fn registered_domain_reflects_admin_updates() {
    let (app, _state) = create_test_app(true).await;

    post_admin_form(
        &app,
        &[("new_client", "fencingquotesonline.bojun.lk"), ("add_new_client", "")],
    )
    .await;
    post_admin_form(
        &app,
        &[
            ("clients[fencingquotesonline.bojun.lk]", "1"),
            (
                "redirects[fencingquotesonline.bojun.lk]",
                "https://pay.bojun.lk/invoice",
            ),
            ("update_popup_status", ""),
        ],
    )
    .await;

    let response = get_status(
        &app,
        "/payment-reminder/v1/status?domain=fencingquotesonline.bojun.lk",
        None,
    )
    .await;
    assert_eq!(
        json_body(response).await,
        json!({"show_popup": true, "redirect_url": "https://pay.bojun.lk/invoice"})
    );
}

/// domainはプレーンテキストとしてサニタイズされてから照合される
#[tokio::test]
async fn domain_is_sanitized_before_lookup() {
    let (app, state) = create_test_app(true).await;
    state.registry.add_client("a.example.com").await.unwrap();
    state
        .registry
        .update_all(&[payment_reminder::registry::PopupUpdate {
            domain: "a.example.com".to_string(),
            show_popup: true,
            redirect_url: String::new(),
        }])
        .await
        .unwrap();

    let response = get_status(
        &app,
        "/payment-reminder/v1/status?domain=%20a.example.com%0A",
        None,
    )
    .await;
    assert_eq!(json_body(response).await["show_popup"], true);
}

/// 許可オリジンはそのまま返される
#[tokio::test]
async fn allowed_origin_is_echoed() {
    let (app, _state) = create_test_app(true).await;

    let response = get_status(
        &app,
        "/payment-reminder/v1/status?domain=a.example.com",
        Some("https://fencingquotesonline.bojun.lk"),
    )
    .await;

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://fencingquotesonline.bojun.lk"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

/// 許可リスト外のオリジンには `*` を返す
#[tokio::test]
async fn other_origin_gets_wildcard() {
    let (app, _state) = create_test_app(true).await;

    let response = get_status(
        &app,
        "/payment-reminder/v1/status?domain=a.example.com",
        Some("https://evil.example"),
    )
    .await;

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).is_none());
}

/// キャッシュ抑止ヘッダーが常に付与される
#[tokio::test]
async fn response_is_not_cacheable() {
    let (app, _state) = create_test_app(true).await;

    let response = get_status(&app, "/payment-reminder/v1/status?domain=x.example.com", None).await;

    let headers = response.headers();
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
}

/// 旧プラグインのパスでも同じ結果を返す
#[tokio::test]
async fn legacy_path_is_served() {
    let (app, state) = create_test_app(true).await;
    state.registry.add_client("legacy.example.com").await.unwrap();

    let response = get_status(
        &app,
        "/wp-json/payment-reminder/v1/status?domain=legacy.example.com",
        Some("https://c1.designbrief.com.au/"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://c1.designbrief.com.au/"
    );
    assert_eq!(
        json_body(response).await,
        json!({"show_popup": false, "redirect_url": ""})
    );
}

/// 公開APIは認証を要求しない
#[tokio::test]
async fn status_does_not_require_auth() {
    let (app, _state) = create_test_app(false).await;

    let response = get_status(&app, "/payment-reminder/v1/status?domain=a.example.com", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
