//! データベースアクセス層
//!
//! SQLiteベースのキーバリュー設定ストア

/// データベースマイグレーション
pub mod migrations;

/// 設定管理
pub mod settings;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;
