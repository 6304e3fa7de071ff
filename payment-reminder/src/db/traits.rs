//! Repository traitパターン定義
//!
//! 設定ストアへのアクセスを抽象化し、レジストリや認証から注入できるようにする。

use async_trait::async_trait;

use crate::common::error::ReminderResult;

/// 設定管理のRepository trait
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// 設定値を取得
    async fn get_setting(&self, key: &str) -> ReminderResult<Option<String>>;
    /// 設定値を保存
    async fn set_setting(&self, key: &str, value: &str) -> ReminderResult<()>;
}

#[async_trait]
impl SettingsRepository for super::settings::SettingsStorage {
    async fn get_setting(&self, key: &str) -> ReminderResult<Option<String>> {
        self.get_setting(key).await
    }

    async fn set_setting(&self, key: &str, value: &str) -> ReminderResult<()> {
        self.set_setting(key, value).await
    }
}
