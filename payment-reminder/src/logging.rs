//! ロギング初期化
//!
//! 標準出力への人間向け出力と、任意でログディレクトリへの日次ローテートJSON出力を行う。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::get_env_with_fallback;

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "payment-reminder.log";

const DEFAULT_LOG_LEVEL: &str = "info";

/// ログレベルのフィルタ文字列を取得
///
/// `PAYMENT_REMINDER_LOG_LEVEL`（旧: `RUST_LOG`）、未設定なら `info`。
pub fn log_filter() -> String {
    get_env_with_fallback("PAYMENT_REMINDER_LOG_LEVEL", "RUST_LOG")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// ログ出力先ディレクトリ（`PAYMENT_REMINDER_LOG_DIR`）
pub fn log_dir() -> Option<std::path::PathBuf> {
    std::env::var("PAYMENT_REMINDER_LOG_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(std::path::PathBuf::from)
}

/// グローバルなtracing subscriberを初期化する
///
/// ファイル出力を有効にした場合は返されたガードをプロセス終了まで保持すること。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_filter()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let stdout_layer = fmt::layer().with_target(true);

    match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(file_layer)
                .try_init()?;
            tracing::info!(dir = %dir.display(), "File logging enabled");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
