//! Payment Reminder Server Entry Point

use clap::Parser;
use payment_reminder::cli::{Cli, Commands};
use payment_reminder::config::{get_env_with_fallback_or, get_env_with_fallback_parse};
use payment_reminder::{bootstrap, cli, logging, server};

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = get_env_with_fallback_or("PAYMENT_REMINDER_HOST", "HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("PAYMENT_REMINDER_PORT", "PORT", 8080);
        Self { host, port }
    }

    fn from_args(args: &cli::serve::ServeArgs) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
        }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Clients(args)) => run_clients(&args.command).await,
        Some(Commands::Serve(args)) => run_server(ServerConfig::from_args(&args)).await,
        None => run_server(ServerConfig::from_env()).await,
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = bootstrap::initialize().await?;
    server::run(state, &config.bind_addr()).await
}

async fn run_clients(command: &cli::clients::ClientsCommand) -> anyhow::Result<()> {
    let store = bootstrap::open_registry().await?;
    let output = cli::clients::execute(command, &store).await?;
    println!("{}", output);
    Ok(())
}
