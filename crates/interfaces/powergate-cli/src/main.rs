use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use powergate_app_core::PowerAction;
use powergate_cli::{commands, session, Overrides, WatchOutcome};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Backend base URL (overrides saved settings)
    #[arg(long, global = true, env = "POWERGATE_URL")]
    url: Option<String>,
    /// Idle poll period in milliseconds
    #[arg(long, global = true)]
    interval_ms: Option<u64>,
    /// Directory holding settings and session state
    #[arg(long, global = true, env = "POWERGATE_CONFIG_DIR")]
    config_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the backend status until a forced logout
    Watch,
    /// Query the backend status once
    Status,
    /// Restart the backend and follow it back up
    Restart,
    /// Shut the backend down and follow it until it stops
    Shutdown,
    /// Manage the stored auth token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
    /// Inspect or save settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    Set { token: String },
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    Show,
    /// Save the current settings, including any --url / --interval-ms given
    Save,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let overrides = Overrides {
        config_dir: cli.config_dir,
        url: cli.url,
        interval_ms: cli.interval_ms,
    };
    let persistence = overrides.persistence();
    let settings = overrides.settings(&persistence)?;

    let action = match cli.command {
        Commands::Status => {
            commands::cmd_status(&persistence, &settings).await?;
            return Ok(());
        }
        Commands::Token { command } => {
            match command {
                TokenCommands::Set { token } => session::handle_token_set(&persistence, &token)?,
                TokenCommands::Clear => session::handle_token_clear(&persistence)?,
            }
            return Ok(());
        }
        Commands::Config { command } => {
            match command {
                ConfigCommands::Show => session::handle_config_show(&settings)?,
                ConfigCommands::Save => session::handle_config_save(&persistence, &settings)?,
            }
            return Ok(());
        }
        Commands::Watch => None,
        Commands::Restart => Some(PowerAction::Restart),
        Commands::Shutdown => Some(PowerAction::Shutdown),
    };

    match commands::cmd_watch(&persistence, &settings, action).await? {
        WatchOutcome::LoggedOut => println!(":: Logged out, sign in again to continue"),
        WatchOutcome::ShutdownComplete => println!(":: Backend is off"),
    }
    Ok(())
}
