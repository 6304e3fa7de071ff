//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs.

/// Origins allowed to receive an echoed `Access-Control-Allow-Origin`.
///
/// Entries are compared byte-for-byte with the request `Origin` header.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://c1.designbrief.com.au/",
    "https://fencingquotesonline.bojun.lk",
];

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the legacy variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use payment_reminder::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("PAYMENT_REMINDER_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 真偽値として解釈できる環境変数値か（`true/1/yes/on`）
fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 認証無効化モードの有効/無効を取得
///
/// 環境変数 `PAYMENT_REMINDER_AUTH_DISABLED`（旧: `AUTH_DISABLED`）が `true/1/yes/on` のときに有効化する。
pub fn is_auth_disabled() -> bool {
    get_env_with_fallback("PAYMENT_REMINDER_AUTH_DISABLED", "AUTH_DISABLED")
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

/// データベースURLを取得
///
/// 未設定の場合は `~/.payment-reminder/reminder.db` を使用する。
pub fn database_url() -> String {
    get_env_with_fallback("PAYMENT_REMINDER_DATABASE_URL", "DATABASE_URL").unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        format!("sqlite:{}/.payment-reminder/reminder.db", home)
    })
}

/// 公開ステータスAPIのCORS設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// 許可オリジン（完全一致）
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CorsConfig {
    /// 環境変数 `PAYMENT_REMINDER_ALLOWED_ORIGINS`（旧: `ALLOWED_ORIGINS`、カンマ区切り）から読み込む
    pub fn from_env() -> Self {
        match get_env_with_fallback("PAYMENT_REMINDER_ALLOWED_ORIGINS", "ALLOWED_ORIGINS") {
            Some(list) => Self {
                allowed_origins: list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
            None => Self::default(),
        }
    }

    /// 許可リストに完全一致するオリジンか
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

/// 管理者アカウント設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// 管理者ユーザー名（デフォルト: "admin"）
    pub username: String,
    /// 管理者パスワード（初回起動時は必須）
    pub password: Option<String>,
}

impl AdminConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("PAYMENT_REMINDER_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var("PAYMENT_REMINDER_ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
        }
    }
}
