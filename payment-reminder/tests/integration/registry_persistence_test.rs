//! Integration Test: レジストリの永続化
//!
//! ファイルDBを開き直してもレジストリが保持され、保存形式が互換であること。

use std::sync::Arc;

use payment_reminder::bootstrap::open_settings;
use payment_reminder::db::traits::SettingsRepository;
use payment_reminder::registry::{PopupUpdate, RegistryStore, REGISTRY_SETTING_KEY};
use serde_json::{json, Value};

fn database_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite:{}/reminder.db", dir.path().display())
}

#[tokio::test]
async fn registry_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = RegistryStore::new(open_settings(&database_url(&dir)).await.unwrap());
        store.add_client("a.example.com").await.unwrap();
        store.add_client("b.example.com").await.unwrap();
        store
            .update_all(&[PopupUpdate {
                domain: "b.example.com".to_string(),
                show_popup: true,
                redirect_url: "https://pay.example.com".to_string(),
            }])
            .await
            .unwrap();
    }

    let store = RegistryStore::new(open_settings(&database_url(&dir)).await.unwrap());
    let registry = store.load().await.unwrap();
    assert_eq!(
        registry.domains(),
        vec!["a.example.com".to_string(), "b.example.com".to_string()]
    );
    let status = store.status("b.example.com").await.unwrap();
    assert!(status.show_popup);
    assert_eq!(status.redirect_url, "https://pay.example.com");
}

#[tokio::test]
async fn stored_blob_keeps_flag_string_shape() {
    let dir = tempfile::tempdir().unwrap();
    let settings: Arc<dyn SettingsRepository> = open_settings(&database_url(&dir)).await.unwrap();
    let store = RegistryStore::new(settings.clone());

    store.add_client("a.example.com").await.unwrap();
    store.add_client("b.example.com").await.unwrap();
    store
        .update_all(&[PopupUpdate {
            domain: "a.example.com".to_string(),
            show_popup: true,
            redirect_url: String::new(),
        }])
        .await
        .unwrap();

    let raw = settings
        .get_setting(REGISTRY_SETTING_KEY)
        .await
        .unwrap()
        .unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        stored,
        json!({
            "a.example.com": {"show_popup": "1", "redirect_url": ""},
            "b.example.com": {"show_popup": "", "redirect_url": ""}
        })
    );
}

#[tokio::test]
async fn legacy_blob_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let settings = open_settings(&database_url(&dir)).await.unwrap();
    settings
        .set_setting(
            REGISTRY_SETTING_KEY,
            r#"{"old.example.com":{"show_popup":"1","redirect_url":"https://pay.example.com"},"off.example.com":{"show_popup":"","redirect_url":""}}"#,
        )
        .await
        .unwrap();

    let store = RegistryStore::new(settings);
    assert!(store.status("old.example.com").await.unwrap().show_popup);
    assert!(!store.status("off.example.com").await.unwrap().show_popup);
}
