//! HTTP APIハンドラー
//!
//! 公開ステータスAPI、ヘルスチェック、管理画面

pub mod admin;
pub mod admin_view;
pub mod error;
pub mod status;

use crate::{auth, AppState};
use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// 公開ステータスAPIのパス
pub const STATUS_PATH: &str = "/payment-reminder/v1/status";
/// 旧プラグイン互換のステータスAPIパス
pub const LEGACY_STATUS_PATH: &str = "/wp-json/payment-reminder/v1/status";
/// 管理画面のパス
pub const ADMIN_PATH: &str = "/admin/payment-reminder";

/// アプリケーションルーターを作成
pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            ADMIN_PATH,
            get(admin::admin_page).post(admin::admin_submit),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_admin,
        ));

    let public_routes = Router::new()
        .route(STATUS_PATH, get(status::get_status))
        .route(LEGACY_STATUS_PATH, get(status::get_status))
        .route("/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
