//! clients サブコマンド
//!
//! サーバーを起動せずにレジストリを参照・変更する。検証規則は管理画面と同じ。

use clap::{Args, Subcommand};

use crate::registry::{AddClientOutcome, DeleteClientOutcome, RegistryStore};

/// clients サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ClientsArgs {
    /// Operation to perform
    #[command(subcommand)]
    pub command: ClientsCommand,
}

/// clients の操作
#[derive(Subcommand, Debug, Clone)]
pub enum ClientsCommand {
    /// List registered clients with their popup state
    List,
    /// Register a new client website
    Add {
        /// Client domain (e.g. example.bojun.lk)
        domain: String,
    },
    /// Remove a client website
    Delete {
        /// Client domain
        domain: String,
    },
}

/// Execute the clients command and return the text to print
pub async fn execute(command: &ClientsCommand, store: &RegistryStore) -> anyhow::Result<String> {
    let output = match command {
        ClientsCommand::List => {
            let registry = store.load().await?;
            if registry.is_empty() {
                "No clients registered".to_string()
            } else {
                let mut lines = vec!["DOMAIN\tPOPUP\tREDIRECT".to_string()];
                for client in registry.iter() {
                    lines.push(format!(
                        "{}\t{}\t{}",
                        client.domain,
                        if client.show_popup { "on" } else { "off" },
                        client.redirect_url
                    ));
                }
                lines.join("\n")
            }
        }
        ClientsCommand::Add { domain } => match store.add_client(domain).await? {
            AddClientOutcome::Added(domain) => format!("Added {}", domain),
            AddClientOutcome::AlreadyExists(domain) => {
                anyhow::bail!("Client {} already exists", domain)
            }
            AddClientOutcome::InvalidDomain => {
                anyhow::bail!("Invalid website address: {}", domain)
            }
        },
        ClientsCommand::Delete { domain } => match store.delete_client(domain).await? {
            DeleteClientOutcome::Deleted(domain) => format!("Deleted {}", domain),
            DeleteClientOutcome::NotFound => format!("No client named {}", domain),
        },
    };
    Ok(output)
}
