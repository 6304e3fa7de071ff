//! CLI module for payment-reminder
//!
//! Provides the server entry point and offline registry maintenance.

pub mod clients;
pub mod serve;

use clap::{Parser, Subcommand};

/// Payment reminder server - per-client payment popup control
#[derive(Parser, Debug)]
#[command(name = "payment-reminder")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    PAYMENT_REMINDER_HOST              Bind address (default: 0.0.0.0)
    PAYMENT_REMINDER_PORT              Listen port (default: 8080)
    PAYMENT_REMINDER_LOG_LEVEL         Log level (default: info)
    PAYMENT_REMINDER_LOG_DIR           Directory for daily-rotated JSON logs
    PAYMENT_REMINDER_DATABASE_URL      Database URL
    PAYMENT_REMINDER_ALLOWED_ORIGINS   Comma-separated CORS allow-list
    PAYMENT_REMINDER_ADMIN_USERNAME    Admin username (default: admin)
    PAYMENT_REMINDER_ADMIN_PASSWORD    Admin password (required on first run)
    PAYMENT_REMINDER_AUTH_DISABLED     Disable admin auth (dev/test only)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Manage registered client websites
    Clients(clients::ClientsArgs),
}
