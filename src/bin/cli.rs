//! isgptup CLI
//!
//! Runs the Discord bot, or a single command invocation on the console.

use std::path::PathBuf;
#[cfg(feature = "discord")]
use std::sync::Arc;

use clap::{Parser, Subcommand};
use isgptup::{
    config::load_config,
    error::Result,
    models::Config,
    pipeline::StatusCommand,
    transport::StdoutTransport,
};

/// isgptup - OpenAI status reporter
#[derive(Parser, Debug)]
#[command(
    name = "isgptup",
    version,
    about = "Reports recent OpenAI status page incidents"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to Discord and serve the command (token from DISCORD_TOKEN)
    #[cfg(feature = "discord")]
    Run,

    /// Run the command once and print the frames
    Check {
        /// Service name, "all", "helpme", "issue", or a day count
        service: Option<String>,

        /// Day count
        days: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config);

    match cli.command {
        #[cfg(feature = "discord")]
        Command::Run => {
            let config = load_config(&cli.config)?;
            let token = isgptup::config::load_token()?;
            let command = Arc::new(StatusCommand::from_config(&config)?);

            log::info!("Starting Discord bot, trigger {}", command.config().trigger());
            isgptup::transport::DiscordBot::new(command)
                .run(&token)
                .await?;
        }

        Command::Check { service, days } => {
            let config = load_config(&cli.config)?;
            let command = StatusCommand::from_config(&config)?;
            let args: Vec<&str> = service.iter().chain(days.iter()).map(String::as_str).collect();

            let outcome = command.run(&args, &StdoutTransport::new()).await?;
            log::info!("Outcome: {outcome:?}");
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());
            let config = match load_config(&cli.config) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Config validation failed: {}", e);
                    return Err(e);
                }
            };
            log::info!("✓ Config OK");
            log::info!("  trigger: {}", config.command.trigger());
            log::info!(
                "  days: {}..={} (default {})",
                config.command.min_days,
                config.command.max_days,
                config.command.default_days
            );
            log::info!("  services: {}", config.command.services.join(", "));
            log::info!(
                "  translation: {}",
                if config.translation.enabled {
                    format!("{} -> {}", config.translation.source, config.translation.target)
                } else {
                    "disabled".to_string()
                }
            );
        }
    }

    Ok(())
}
