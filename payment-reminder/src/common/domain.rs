//! クライアントドメインの検証

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// クライアントドメインとして受け付けるホスト名パターン（文字列全体に一致）
pub const CLIENT_DOMAIN_PATTERN: &str = r"^[a-z0-9.-]+\.[a-z]{2,}$";

static CLIENT_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLIENT_DOMAIN_PATTERN).expect("valid client domain regex"));

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// `https://` を前置したときに有効なURLになるか
///
/// URLとしてパースでき、ホスト部が入力そのものであり、各ラベルが
/// ホスト名の規則（1〜63文字、英数字とハイフン、先頭末尾はハイフン不可）を満たすこと。
pub fn forms_valid_https_url(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    let Ok(url) = Url::parse(&format!("https://{}", domain)) else {
        return false;
    };
    if url.host_str() != Some(domain) {
        return false;
    }

    domain.trim_end_matches('.').split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// サニタイズ済みの入力がクライアントドメインとして有効か
///
/// URL検証とホスト名パターン検証の両方を満たす必要がある。
pub fn is_valid_client_domain(domain: &str) -> bool {
    forms_valid_https_url(domain) && CLIENT_DOMAIN.is_match(domain)
}
