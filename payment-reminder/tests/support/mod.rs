//! テスト共通ユーティリティ

pub mod app;
