use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use payment_reminder::{
    api,
    bootstrap::initialize_with,
    config::{AdminConfig, CorsConfig},
    db::{migrations::run_migrations, settings::SettingsStorage, traits::SettingsRepository},
    AppState,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

#[allow(dead_code)]
pub const ADMIN_USERNAME: &str = "admin";
#[allow(dead_code)]
pub const ADMIN_PASSWORD: &str = "test-password";

/// テスト用のインメモリDBプール（接続は1本に固定）
pub async fn create_test_db_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// テスト用のアプリケーションを作成する（.oneshot()スタイルのテスト用）
///
/// `auth_disabled` が false の場合は管理者資格情報を保存する。
pub async fn create_test_app(auth_disabled: bool) -> (Router, AppState) {
    let pool = create_test_db_pool().await;
    let settings: Arc<dyn SettingsRepository> = Arc::new(SettingsStorage::new(pool));
    let state = initialize_with(
        settings,
        CorsConfig::default(),
        auth_disabled,
        AdminConfig {
            username: ADMIN_USERNAME.to_string(),
            password: Some(ADMIN_PASSWORD.to_string()),
        },
    )
    .await
    .expect("Failed to initialize app state");

    (api::create_app(state.clone()), state)
}

/// Basic認証ヘッダー値
#[allow(dead_code)]
pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

/// 管理フォームをPOSTする
#[allow(dead_code)]
pub async fn post_admin_form(app: &Router, form: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(form).expect("form encoding");
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api::ADMIN_PATH)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// レスポンスボディを文字列として読む
#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
