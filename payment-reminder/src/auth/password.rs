// パスワードハッシュ化と検証（bcrypt実装）

use crate::common::error::ReminderError;
use bcrypt::{hash, verify};

/// パスワードハッシュ化のコスト（12推奨、200-300ms）
const HASH_COST: u32 = 12;

/// パスワードをbcryptでハッシュ化
///
/// # Returns
/// * `Ok(String)` - bcryptハッシュ文字列（$2b$で始まる）
/// * `Err(ReminderError)` - ハッシュ化失敗
pub fn hash_password(password: &str) -> Result<String, ReminderError> {
    hash(password, HASH_COST)
        .map_err(|e| ReminderError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致
/// * `Err(ReminderError)` - 検証失敗（ハッシュ形式不正など）
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ReminderError> {
    verify(password, hash)
        .map_err(|e| ReminderError::PasswordHash(format!("Failed to verify password: {}", e)))
}
