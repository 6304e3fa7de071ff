//! サーバー初期化ロジック
//!
//! データベース接続、管理者資格情報の準備など、サーバー起動に必要な
//! コンポーネントの初期化を担当する。

use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::bootstrap::ensure_admin_credentials;
use crate::common::error::ReminderResult;
use crate::config::{self, AdminConfig, CorsConfig};
use crate::db::migrations::initialize_database;
use crate::db::settings::SettingsStorage;
use crate::db::traits::SettingsRepository;
use crate::registry::RegistryStore;
use crate::AppState;

/// 設定ストアを開く（必要ならDBファイル作成とマイグレーションを行う）
pub async fn open_settings(database_url: &str) -> ReminderResult<Arc<dyn SettingsRepository>> {
    let pool = initialize_database(database_url).await?;
    Ok(Arc::new(SettingsStorage::new(pool)))
}

/// CLIのクライアント管理用にレジストリだけを開く
pub async fn open_registry() -> ReminderResult<RegistryStore> {
    let settings = open_settings(&config::database_url()).await?;
    Ok(RegistryStore::new(settings))
}

/// サーバー初期化を実行する
///
/// 環境変数から設定を読み込み、DB初期化・管理者資格情報の保存を行って `AppState` を返す。
pub async fn initialize() -> ReminderResult<AppState> {
    info!("Payment Reminder v{}", env!("CARGO_PKG_VERSION"));

    let database_url = config::database_url();
    let settings = open_settings(&database_url).await?;
    info!("Settings store initialized");

    let auth_disabled = config::is_auth_disabled();
    initialize_with(settings, CorsConfig::from_env(), auth_disabled, AdminConfig::from_env()).await
}

/// 与えられた設定ストアと設定値から `AppState` を組み立てる
pub async fn initialize_with(
    settings: Arc<dyn SettingsRepository>,
    cors: CorsConfig,
    auth_disabled: bool,
    admin: AdminConfig,
) -> ReminderResult<AppState> {
    if auth_disabled {
        warn!("Admin authentication is disabled; do not use this mode in production");
    } else {
        ensure_admin_credentials(
            settings.as_ref(),
            &admin.username,
            admin.password.as_deref(),
        )
        .await?;
    }

    info!(origins = ?cors.allowed_origins, "CORS allow-list loaded");
    Ok(AppState::new(settings, cors, auth_disabled))
}
