// 認証モジュール

/// パスワードハッシュ化・検証（bcrypt）
pub mod password;

/// 管理画面のBasic認証ミドルウェア
pub mod middleware;

/// 起動時の管理者資格情報作成
pub mod bootstrap;

/// Basic認証のレルム名
pub const ADMIN_REALM: &str = "Payment Reminder";
