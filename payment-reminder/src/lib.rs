//! Payment Reminder Server
//!
//! クライアントサイトごとの支払い催促ポップアップ設定を管理するサーバー

#![warn(missing_docs)]

/// 共通型定義（エラー、レジストリ型、入力検証）
pub mod common;

/// HTTP APIハンドラー
pub mod api;

/// 管理画面の認証
pub mod auth;

/// サーバー初期化
pub mod bootstrap;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// クライアントレジストリ
pub mod registry;

/// axumサーバー起動
pub mod server;

/// Shutdown controller
pub mod shutdown;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// クライアントレジストリ
    pub registry: registry::RegistryStore,
    /// 設定ストア（管理者資格情報の参照に使用）
    pub settings: Arc<dyn db::traits::SettingsRepository>,
    /// 公開ステータスAPIのCORS設定
    pub cors: config::CorsConfig,
    /// 管理画面の認証を無効化するか（開発・テスト用）
    pub auth_disabled: bool,
    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}

impl AppState {
    /// 設定ストアから状態を組み立てる
    pub fn new(
        settings: Arc<dyn db::traits::SettingsRepository>,
        cors: config::CorsConfig,
        auth_disabled: bool,
    ) -> Self {
        Self {
            registry: registry::RegistryStore::new(settings.clone()),
            settings,
            cors,
            auth_disabled,
            shutdown: shutdown::ShutdownController::default(),
        }
    }
}
