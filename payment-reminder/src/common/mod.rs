//! 共通モジュール
//!
//! エラー型、データ型、入力検証

/// エラー型定義
pub mod error;

/// クライアントレコード・レジストリ型
pub mod types;

/// ドメイン検証
pub mod domain;

/// 入力サニタイズ
pub mod sanitize;
