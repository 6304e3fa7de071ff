// 管理画面のBasic認証ミドルウェア

use crate::api::error::AppError;
use crate::auth::bootstrap::load_admin_credentials;
use crate::auth::password::verify_password;
use crate::auth::ADMIN_REALM;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// `Authorization: Basic ...` ヘッダーからユーザー名とパスワードを取り出す
pub(crate) fn extract_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn unauthorized() -> Response {
    let challenge = format!("Basic realm=\"{}\", charset=\"UTF-8\"", ADMIN_REALM);
    let mut response = (StatusCode::UNAUTHORIZED, "Authentication required").into_response();
    if let Ok(value) = HeaderValue::from_str(&challenge) {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, value);
    }
    response
}

/// 管理者のみ通過させるミドルウェア
///
/// `auth_disabled` の場合は検証せずに通過させる（開発・テスト用）。
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.auth_disabled {
        return next.run(request).await;
    }

    let Some((username, password)) = extract_basic_credentials(request.headers()) else {
        return unauthorized();
    };

    let credentials = match load_admin_credentials(state.settings.as_ref()).await {
        Ok(Some(credentials)) => credentials,
        Ok(None) => {
            tracing::warn!("Admin credentials are not configured; rejecting admin request");
            return unauthorized();
        }
        Err(e) => return AppError(e).into_response(),
    };

    let verified = credentials.username == username
        && match verify_password(&password, &credentials.password_hash) {
            Ok(ok) => ok,
            Err(e) => return AppError(e).into_response(),
        };

    if !verified {
        tracing::warn!(username = %username, "Admin authentication failed");
        return unauthorized();
    }

    next.run(request).await
}
