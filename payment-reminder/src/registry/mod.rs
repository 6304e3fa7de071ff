//! クライアントレジストリ
//!
//! 設定ストアの単一キーにレジストリ全体を保存し、管理操作（追加・削除・一括更新）と
//! 公開ステータス参照を提供する。

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::common::domain::is_valid_client_domain;
use crate::common::error::ReminderResult;
use crate::common::sanitize::{sanitize_text_field, sanitize_url};
use crate::common::types::{ClientRecord, Registry, StatusResponse};
use crate::db::traits::SettingsRepository;

/// レジストリを保存する設定キー
pub const REGISTRY_SETTING_KEY: &str = "payment_reminder_status";

/// クライアント追加の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddClientOutcome {
    /// 追加した（サニタイズ後のドメイン）
    Added(String),
    /// ドメインとして不正
    InvalidDomain,
    /// 既に登録済み
    AlreadyExists(String),
}

/// クライアント削除の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteClientOutcome {
    /// 削除した
    Deleted(String),
    /// 未登録（何もしない）
    NotFound,
}

/// 一括更新で送信された1ドメイン分の値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupUpdate {
    /// 対象ドメイン
    pub domain: String,
    /// チェックボックスが送信されたか
    pub show_popup: bool,
    /// 送信されたリダイレクトURL（未サニタイズ）
    pub redirect_url: String,
}

/// レジストリストア
///
/// 読み込み・変更・保存の一連の処理はプロセス内ミューテックスで直列化する。
/// 複数プロセスから同じDBを更新した場合は後勝ちになる。
#[derive(Clone)]
pub struct RegistryStore {
    settings: Arc<dyn SettingsRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl RegistryStore {
    /// 新しいストアを作成
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self {
            settings,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 永続化されたレジストリを読み込む（未保存なら空）
    pub async fn load(&self) -> ReminderResult<Registry> {
        let Some(raw) = self.settings.get_setting(REGISTRY_SETTING_KEY).await? else {
            return Ok(Registry::new());
        };

        // 旧データの空配列表現も空レジストリとして扱う
        if matches!(raw.trim(), "" | "[]" | "null") {
            return Ok(Registry::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    /// レジストリ全体を上書き保存する
    pub async fn save(&self, registry: &Registry) -> ReminderResult<()> {
        let raw = serde_json::to_string(registry)?;
        self.settings.set_setting(REGISTRY_SETTING_KEY, &raw).await?;
        debug!(clients = registry.len(), "Saved client registry");
        Ok(())
    }

    /// 公開ステータスを取得する
    ///
    /// 未登録ドメインは「ポップアップ無効・リダイレクトなし」として返す。
    pub async fn status(&self, domain: &str) -> ReminderResult<StatusResponse> {
        let registry = self.load().await?;
        Ok(registry
            .get(domain)
            .map(StatusResponse::from)
            .unwrap_or_default())
    }

    /// クライアントを追加する
    ///
    /// 入力をサニタイズした後、`https://` 前置でのURL検証とホスト名パターン検証を行う。
    pub async fn add_client(&self, raw_domain: &str) -> ReminderResult<AddClientOutcome> {
        let domain = sanitize_text_field(raw_domain);
        if !is_valid_client_domain(&domain) {
            debug!(domain = %domain, "Rejected invalid client domain");
            return Ok(AddClientOutcome::InvalidDomain);
        }

        let _guard = self.write_lock.lock().await;
        let mut registry = self.load().await?;
        if !registry.insert(ClientRecord::new(domain.clone())) {
            return Ok(AddClientOutcome::AlreadyExists(domain));
        }
        self.save(&registry).await?;

        info!(domain = %domain, "Client added");
        Ok(AddClientOutcome::Added(domain))
    }

    /// クライアントを削除する（未登録なら何もしない）
    pub async fn delete_client(&self, raw_domain: &str) -> ReminderResult<DeleteClientOutcome> {
        let domain = sanitize_text_field(raw_domain);

        let _guard = self.write_lock.lock().await;
        let mut registry = self.load().await?;
        if registry.remove(&domain).is_none() {
            return Ok(DeleteClientOutcome::NotFound);
        }
        self.save(&registry).await?;

        info!(domain = %domain, "Client deleted");
        Ok(DeleteClientOutcome::Deleted(domain))
    }

    /// 全クライアントのポップアップ状態とリダイレクトURLを一括更新する
    ///
    /// 登録済みの各ドメインについて、送信値があればそれを、なければ
    /// 「ポップアップ無効・URL空」を設定する。未登録ドメインの送信値は無視する。
    pub async fn update_all(&self, updates: &[PopupUpdate]) -> ReminderResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut registry = self.load().await?;

        for client in registry.iter_mut() {
            let submitted = updates.iter().find(|u| u.domain == client.domain);
            client.show_popup = submitted.is_some_and(|u| u.show_popup);
            client.redirect_url = submitted
                .map(|u| sanitize_url(&u.redirect_url))
                .unwrap_or_default();
        }

        let ignored = updates
            .iter()
            .filter(|u| !registry.contains(&u.domain))
            .count();
        if ignored > 0 {
            debug!(ignored, "Ignored updates for unregistered domains");
        }

        self.save(&registry).await?;
        info!(clients = registry.len(), "Popup statuses and redirect URLs updated");
        Ok(())
    }
}
