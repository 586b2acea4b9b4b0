//! Portal CLI - command-line client for the learning portal.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use portal_config::{init_logging, Config, Paths};

/// Portal CLI - authenticate against the portal and inspect the session.
#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Portal client for login, registration, and session management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login with email and password
    Login,

    /// Register a student account
    RegisterStudent,

    /// Register a teacher account
    RegisterTeacher,

    /// Start a guest session (display name only)
    Guest,

    /// Exchange the stored refresh token for fresh credentials
    Refresh,

    /// Show session status
    Status,

    /// Logout and clear the stored session
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = Paths::new()?;
    let mut config = Config::load(&paths)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    init_logging(&config.log_level);
    config.validate()?;
    tracing::debug!(api_url = %config.api_url(), "Configuration loaded");

    let session = commands::build_session(&config, &paths);

    // Restore any persisted session before running the command.
    session.bootstrap().await?;

    match cli.command {
        Commands::Login => commands::auth::login(&session, &cli.format).await,
        Commands::RegisterStudent => {
            commands::auth::register_student(&session, &cli.format).await
        }
        Commands::RegisterTeacher => {
            commands::auth::register_teacher(&session, &cli.format).await
        }
        Commands::Guest => commands::auth::guest(&session, &cli.format).await,
        Commands::Refresh => commands::auth::refresh(&session, &cli.format).await,
        Commands::Status => commands::auth::status(&session, &cli.format).await,
        Commands::Logout => commands::auth::logout(&session, &cli.format).await,
    }
}
