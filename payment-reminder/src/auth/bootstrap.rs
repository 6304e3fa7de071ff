//! 管理者資格情報の初期化
//!
//! 環境変数で与えられた管理者パスワードをbcryptハッシュとして設定ストアに保存する。

use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::common::error::{CommonError, ReminderResult};
use crate::db::traits::SettingsRepository;

/// 管理者資格情報を保存する設定キー
pub const ADMIN_CREDENTIALS_KEY: &str = "admin_credentials";

/// 保存済み管理者資格情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminCredentials {
    /// 管理者ユーザー名
    pub username: String,
    /// bcryptハッシュ
    pub password_hash: String,
}

/// 保存済みの管理者資格情報を読み込む
pub async fn load_admin_credentials(
    settings: &dyn SettingsRepository,
) -> ReminderResult<Option<AdminCredentials>> {
    match settings.get_setting(ADMIN_CREDENTIALS_KEY).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// 管理者資格情報が存在することを保証する
///
/// * パスワードが指定され、保存済みのものと一致しない場合はハッシュを更新する
/// * パスワード未指定で保存済みのものがあればそれを使い続ける
/// * どちらもない場合は設定エラー
pub async fn ensure_admin_credentials(
    settings: &dyn SettingsRepository,
    username: &str,
    password: Option<&str>,
) -> ReminderResult<()> {
    let existing = load_admin_credentials(settings).await?;

    let Some(password) = password.filter(|p| !p.is_empty()) else {
        return match existing {
            Some(credentials) => {
                tracing::info!(
                    username = %credentials.username,
                    "Using stored admin credentials"
                );
                Ok(())
            }
            None => Err(CommonError::Config(
                "PAYMENT_REMINDER_ADMIN_PASSWORD is required on first run".to_string(),
            )
            .into()),
        };
    };

    if let Some(credentials) = &existing {
        if credentials.username == username
            && verify_password(password, &credentials.password_hash).unwrap_or(false)
        {
            tracing::debug!("Admin credentials unchanged");
            return Ok(());
        }
    }

    let credentials = AdminCredentials {
        username: username.to_string(),
        password_hash: hash_password(password)?,
    };
    settings
        .set_setting(ADMIN_CREDENTIALS_KEY, &serde_json::to_string(&credentials)?)
        .await?;
    tracing::info!(username = %username, "Stored admin credentials");
    Ok(())
}
