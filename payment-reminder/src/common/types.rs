//! 共通型定義
//!
//! クライアントレコード、レジストリ、公開ステータスレスポンス

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// クライアント（登録済みウェブサイト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// ドメイン名（スキームなし、レジストリ内で一意）
    pub domain: String,
    /// 支払いリマインダーポップアップを表示するか
    pub show_popup: bool,
    /// 支払いページへのリダイレクトURL（未設定時は空文字）
    pub redirect_url: String,
}

impl ClientRecord {
    /// 新規クライアントを作成（ポップアップ無効、リダイレクトURLなし）
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            show_popup: false,
            redirect_url: String::new(),
        }
    }
}

/// 永続化形式でのクライアント設定
///
/// 既存データとの互換性のため `show_popup` は `""` / `"1"` として保存する。
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredClient {
    #[serde(with = "popup_flag", default)]
    show_popup: bool,
    #[serde(default)]
    redirect_url: String,
}

/// クライアントレジストリ
///
/// ドメイン → クライアントの順序付きマッピング。挿入順は表示のためだけに保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    clients: Vec<ClientRecord>,
}

impl Registry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ドメインでクライアントを取得
    pub fn get(&self, domain: &str) -> Option<&ClientRecord> {
        self.clients.iter().find(|c| c.domain == domain)
    }

    /// ドメインが登録済みか
    pub fn contains(&self, domain: &str) -> bool {
        self.get(domain).is_some()
    }

    /// クライアントを末尾に追加する
    ///
    /// 同じドメインが既に存在する場合は何もせず `false` を返す。
    pub fn insert(&mut self, record: ClientRecord) -> bool {
        if self.contains(&record.domain) {
            return false;
        }
        self.clients.push(record);
        true
    }

    /// クライアントを削除し、削除したレコードを返す
    pub fn remove(&mut self, domain: &str) -> Option<ClientRecord> {
        let index = self.clients.iter().position(|c| c.domain == domain)?;
        Some(self.clients.remove(index))
    }

    /// 登録順にイテレート
    pub fn iter(&self) -> impl Iterator<Item = &ClientRecord> {
        self.clients.iter()
    }

    /// 登録順に可変イテレート（ドメインは変更しないこと）
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClientRecord> {
        self.clients.iter_mut()
    }

    /// 登録済みドメイン一覧
    pub fn domains(&self) -> Vec<String> {
        self.clients.iter().map(|c| c.domain.clone()).collect()
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.clients.len()))?;
        for client in &self.clients {
            map.serialize_entry(
                &client.domain,
                &StoredClient {
                    show_popup: client.show_popup,
                    redirect_url: client.redirect_url.clone(),
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = Registry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of domain to client settings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Registry, A::Error> {
                let mut registry = Registry::new();
                while let Some((domain, stored)) = access.next_entry::<String, StoredClient>()? {
                    // 重複キーは後勝ち
                    registry.remove(&domain);
                    registry.clients.push(ClientRecord {
                        domain,
                        show_popup: stored.show_popup,
                        redirect_url: stored.redirect_url,
                    });
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

/// 公開ステータスAPIのレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// ポップアップを表示するか
    pub show_popup: bool,
    /// リダイレクト先URL
    pub redirect_url: String,
}

impl From<&ClientRecord> for StatusResponse {
    fn from(record: &ClientRecord) -> Self {
        Self {
            show_popup: record.show_popup,
            redirect_url: record.redirect_url.clone(),
        }
    }
}

/// `show_popup` の永続化アダプタ
///
/// 書き込みは `"1"` / `""`。読み込みは文字列・真偽値・数値・null を受け付ける。
mod popup_flag {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(r#""1", "", a boolean or an integer"#)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
                Ok(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
                Ok(matches!(v.trim(), "1" | "true"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
                Ok(v != 0)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
                Ok(v != 0)
            }

            fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }

            fn visit_none<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}
