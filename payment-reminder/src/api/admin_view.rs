//! 管理画面のHTMLレンダリング

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::api::ADMIN_PATH;
use crate::common::types::Registry;

/// 管理画面の見出し
pub const PAGE_TITLE: &str = "Payment Reminder Control";

const STYLES: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f0f0f1; color: #1d2327; }
.wrap { max-width: 960px; margin: 24px auto; padding: 0 16px; }
.notice { background: #fff; border-left: 4px solid #72aee6; padding: 1px 12px; margin: 12px 0; }
.notice.updated { border-left-color: #00a32a; }
.notice.error { border-left-color: #d63638; }
.form-table { width: 100%; border-collapse: collapse; background: #fff; }
.form-table th, .form-table td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #dcdcde; }
.button { cursor: pointer; padding: 4px 12px; }
.button-primary { background: #2271b1; border: 1px solid #2271b1; color: #fff; }
"#;

const DELETE_CONFIRM: &str = "return confirm('Are you sure you want to delete this client?');";

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// 成功
    Success,
    /// エラー
    Error,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "updated notice",
            NoticeKind::Error => "error notice",
        }
    }
}

/// 画面上部に表示するインライン通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// 種類
    pub kind: NoticeKind,
    /// 表示メッセージ
    pub message: String,
}

impl Notice {
    /// 成功通知
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// エラー通知
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

fn delete_form_id(index: usize) -> String {
    format!("delete-client-{}", index)
}

/// 管理画面全体をレンダリングする
///
/// 行ごとの削除ボタンはテーブル外の個別フォームに `form` 属性で関連付ける
/// （フォームの入れ子はHTMLとして不正なため）。
pub fn render_admin_page(registry: &Registry, notices: &[Notice]) -> String {
    page(registry, notices).into_string()
}

fn page(registry: &Registry, notices: &[Notice]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                div class="wrap" {
                    h1 { (PAGE_TITLE) }
                    @for notice in notices {
                        div class=(notice.kind.css_class()) {
                            p { (notice.message) }
                        }
                    }
                    (clients_form(registry))
                    (delete_forms(registry))
                    (add_client_form())
                }
            }
        }
    }
}

fn clients_form(registry: &Registry) -> Markup {
    html! {
        form method="post" action=(ADMIN_PATH) {
            h2 { "Manage Client Popups and Redirect URLs" }
            table class="form-table" {
                thead {
                    tr {
                        th { "Client Website" }
                        th { "Show Popup" }
                        th { "Payment Redirect URL" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @if registry.is_empty() {
                        tr {
                            td colspan="4" { "No clients registered yet." }
                        }
                    }
                    @for (index, client) in registry.iter().enumerate() {
                        tr {
                            td { (client.domain) }
                            td {
                                input type="checkbox"
                                    name=(format!("clients[{}]", client.domain))
                                    value="1"
                                    checked[client.show_popup];
                            }
                            td {
                                input type="url"
                                    name=(format!("redirects[{}]", client.domain))
                                    value=(client.redirect_url)
                                    placeholder="https://example.com/payment"
                                    style="width: 100%;";
                            }
                            td {
                                button type="submit"
                                    form=(delete_form_id(index))
                                    name="delete_client"
                                    class="button button-secondary"
                                    onclick=(DELETE_CONFIRM) { "Delete" }
                            }
                        }
                    }
                }
            }
            p class="submit" {
                button type="submit" name="update_popup_status" class="button button-primary" {
                    "Save Changes"
                }
            }
        }
    }
}

fn delete_forms(registry: &Registry) -> Markup {
    html! {
        @for (index, client) in registry.iter().enumerate() {
            form id=(delete_form_id(index)) method="post" action=(ADMIN_PATH) hidden {
                input type="hidden" name="client_to_delete" value=(client.domain);
            }
        }
    }
}

fn add_client_form() -> Markup {
    html! {
        h2 { "Add New Client Website" }
        form method="post" action=(ADMIN_PATH) {
            input type="text"
                name="new_client"
                placeholder="Enter website (e.g., example.bojun.lk)"
                required
                style="width: 300px;";
            p class="submit" {
                button type="submit" name="add_new_client" class="button button-secondary" {
                    "Add Client"
                }
            }
        }
    }
}
