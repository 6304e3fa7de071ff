//! 公開ステータスAPI
//!
//! `GET /payment-reminder/v1/status?domain=<d>`
//!
//! クライアントサイトのスクリプトから呼ばれる。認証不要で、
//! 未登録ドメインでもエラーにせず既定値（ポップアップ無効）を返す。

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::error::AppError;
use crate::common::sanitize::sanitize_text_field;
use crate::config::CorsConfig;
use crate::AppState;

/// ステータス照会のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    /// 照会するクライアントドメイン
    #[serde(default)]
    pub domain: Option<String>,
}

impl StatusQuery {
    /// 生のクエリ文字列を解釈する
    ///
    /// 解釈できないクエリ（`domain[]=x` 等）はパラメータなしとして扱う。
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default()
    }
}

/// GET /payment-reminder/v1/status
pub async fn get_status(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let params = StatusQuery::parse(query.as_deref());
    let domain = sanitize_text_field(params.domain.as_deref().unwrap_or(""));

    let status = state.registry.status(&domain).await?;
    tracing::debug!(
        domain = %domain,
        show_popup = status.show_popup,
        "Status lookup"
    );

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());

    let mut response = Json(status).into_response();
    apply_cors_headers(response.headers_mut(), &state.cors, origin);
    apply_no_cache_headers(response.headers_mut());
    Ok(response)
}

/// CORSヘッダーを付与する
///
/// 許可リストに完全一致するオリジンはそのまま返し、許可メソッドとヘッダーも添える。
/// それ以外（Originなしを含む）は `*` を返す。
pub fn apply_cors_headers(headers: &mut HeaderMap, cors: &CorsConfig, origin: Option<&str>) {
    let allowed = origin
        .filter(|o| cors.is_allowed(o))
        .and_then(|o| HeaderValue::from_str(o).ok());

    match allowed {
        Some(origin) => {
            insert_if_absent(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            insert_if_absent(
                headers,
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET"),
            );
            insert_if_absent(
                headers,
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            );
        }
        None => insert_if_absent(
            headers,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
    }
}

/// キャッシュ抑止ヘッダーを付与する
pub fn apply_no_cache_headers(headers: &mut HeaderMap) {
    insert_if_absent(
        headers,
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    insert_if_absent(headers, header::PRAGMA, HeaderValue::from_static("no-cache"));
    insert_if_absent(headers, header::EXPIRES, HeaderValue::from_static("0"));
}

// 既に設定済みのヘッダーは上書きしない
fn insert_if_absent(headers: &mut HeaderMap, name: HeaderName, value: HeaderValue) {
    headers.entry(name).or_insert(value);
}
