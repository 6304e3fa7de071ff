//! 入力サニタイズ
//!
//! 管理フォームと公開APIで受け取る文字列の正規化

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>").expect("valid regex")
});
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static PERCENT_OCTET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("valid regex"));
static URL_DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9\-~+_.?#=!&;,/:%@$|*'()\[\]\x{80}-\x{10FFFF}]").expect("valid regex")
});
static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.\-]*):").expect("valid regex"));
static PHP_SCRIPT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9-]+?\.php").expect("valid regex"));

/// リダイレクトURLとして許可するスキーム
const ALLOWED_URL_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// プレーンテキストとしてサニタイズする
///
/// HTMLタグを除去し、パーセントエンコードされたオクテットを削除し、
/// 改行・タブ・連続空白を1つの空白にまとめて前後の空白を取り除く。
pub fn sanitize_text_field(input: &str) -> String {
    let mut text = input.to_string();

    if text.contains('<') {
        text = SCRIPT_OR_STYLE.replace_all(&text, "").into_owned();
        text = HTML_TAG.replace_all(&text, "").into_owned();
        text = text.replace('<', "&lt;");
    }

    text = WHITESPACE.replace_all(&text, " ").trim().to_string();

    let mut found = false;
    while PERCENT_OCTET.is_match(&text) {
        text = PERCENT_OCTET.replace_all(&text, "").into_owned();
        found = true;
    }
    if found {
        text = WHITESPACE.replace_all(&text, " ").trim().to_string();
    }

    text
}

/// URLとして保存用にサニタイズする
///
/// 形式の妥当性は検証しない。URLに使えない文字を除去し、スキームがなければ
/// `http://` を補い、許可されていないスキーム（`javascript:` 等）は空文字にする。
pub fn sanitize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let url = trimmed.replace(' ', "%20");
    let url = URL_DISALLOWED.replace_all(&url, "").into_owned();
    if url.is_empty() {
        return String::new();
    }

    let url = if !url.contains(':')
        && !url.starts_with(&['/', '#', '?'][..])
        && !PHP_SCRIPT_PATH.is_match(&url)
    {
        format!("http://{}", url)
    } else {
        url
    };

    if let Some(captures) = URL_SCHEME.captures(&url) {
        let scheme = captures[1].to_ascii_lowercase();
        if !ALLOWED_URL_SCHEMES.contains(&scheme.as_str()) {
            return String::new();
        }
    }

    url
}
