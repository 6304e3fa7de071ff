//! 管理画面API
//!
//! `GET /admin/payment-reminder` で一覧を表示し、同じパスへのフォーム送信で
//! クライアントの追加・削除・一括更新を行う。

use axum::{body::Bytes, extract::State, response::Html};

use crate::api::admin_view::{render_admin_page, Notice};
use crate::api::error::AppError;
use crate::common::error::CommonError;
use crate::registry::{AddClientOutcome, DeleteClientOutcome, PopupUpdate};
use crate::AppState;

/// クライアント追加成功
pub const MSG_CLIENT_ADDED: &str = "New client added successfully!";
/// 登録済みクライアント
pub const MSG_CLIENT_EXISTS: &str = "This client already exists.";
/// ドメイン不正
pub const MSG_INVALID_DOMAIN: &str =
    "Invalid website address. Please enter a valid domain (e.g., example.bojun.lk).";
/// クライアント削除成功
pub const MSG_CLIENT_DELETED: &str = "Client deleted successfully!";
/// 一括更新成功
pub const MSG_STATUSES_UPDATED: &str = "Popup statuses and redirect URLs updated.";

/// 管理フォームの送信内容
///
/// 送信ボタン名（`add_new_client` / `delete_client` / `update_popup_status`）で
/// 操作を判別する。値のないフィールドは空文字として扱う。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdminForm {
    /// 追加するクライアント（`new_client`）
    pub add_client: Option<String>,
    /// 削除するクライアント（`client_to_delete`）
    pub delete_client: Option<String>,
    /// 一括更新の送信値（`clients[<d>]` / `redirects[<d>]`）
    pub update_all: Option<Vec<PopupUpdate>>,
}

impl AdminForm {
    /// `application/x-www-form-urlencoded` のキーと値の組から組み立てる
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let field = |name: &str| {
            pairs
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };
        let submitted = |name: &str| pairs.iter().any(|(key, _)| key == name);

        let add_client = submitted("add_new_client").then(|| field("new_client").unwrap_or_default());
        let delete_client =
            submitted("delete_client").then(|| field("client_to_delete").unwrap_or_default());
        let update_all = submitted("update_popup_status").then(|| collect_updates(pairs));

        Self {
            add_client,
            delete_client,
            update_all,
        }
    }
}

fn bracketed<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_suffix(']')
}

// 送信順を保ったままドメインごとにまとめる（同じキーは後勝ち）
fn collect_updates(pairs: &[(String, String)]) -> Vec<PopupUpdate> {
    let mut updates: Vec<PopupUpdate> = Vec::new();

    for (key, value) in pairs {
        let (domain, is_checkbox) = if let Some(domain) = bracketed(key, "clients[") {
            (domain, true)
        } else if let Some(domain) = bracketed(key, "redirects[") {
            (domain, false)
        } else {
            continue;
        };

        let index = match updates.iter().position(|u| u.domain == domain) {
            Some(index) => index,
            None => {
                updates.push(PopupUpdate {
                    domain: domain.to_string(),
                    ..Default::default()
                });
                updates.len() - 1
            }
        };

        if is_checkbox {
            updates[index].show_popup = true;
        } else {
            updates[index].redirect_url = value.clone();
        }
    }

    updates
}

/// GET /admin/payment-reminder
pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let registry = state.registry.load().await?;
    Ok(Html(render_admin_page(&registry, &[])))
}

/// POST /admin/payment-reminder
///
/// 追加・削除・一括更新の順に処理し、最新のレジストリで画面を描き直す。
pub async fn admin_submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
        .map_err(|e| CommonError::Validation(format!("Malformed admin form: {}", e)))?;
    let form = AdminForm::from_pairs(&pairs);

    let mut notices = Vec::new();

    if let Some(raw) = &form.add_client {
        let notice = match state.registry.add_client(raw).await? {
            AddClientOutcome::Added(_) => Notice::success(MSG_CLIENT_ADDED),
            AddClientOutcome::AlreadyExists(_) => Notice::error(MSG_CLIENT_EXISTS),
            AddClientOutcome::InvalidDomain => Notice::error(MSG_INVALID_DOMAIN),
        };
        notices.push(notice);
    }

    if let Some(raw) = &form.delete_client {
        if let DeleteClientOutcome::Deleted(_) = state.registry.delete_client(raw).await? {
            notices.push(Notice::success(MSG_CLIENT_DELETED));
        }
    }

    if let Some(updates) = &form.update_all {
        state.registry.update_all(updates).await?;
        notices.push(Notice::success(MSG_STATUSES_UPDATED));
    }

    let registry = state.registry.load().await?;
    Ok(Html(render_admin_page(&registry, &notices)))
}
