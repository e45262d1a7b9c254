mod demo;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use herald_channels::{ChannelAdapter, ConsoleAdapter, DiscordAdapter, DiscordMessage};
use herald_commands::DispatchSettings;
use herald_config::{config_dir, config_file_path, load_and_prepare, HeraldConfig};
use herald_core::InboundMessage;
use herald_logging::init_logger;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Herald: prefix-triggered chat commands")]
#[command(version)]
struct Cli {
    /// Config file (defaults to config.yaml in the Herald config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and answer commands there
    Discord,
    /// Read commands from stdin, one per line
    Console,
    /// Print the effective configuration as JSON, token masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = load_and_prepare(&path)
        .await
        .with_context(|| format!("loading {}", path.display()))?;

    init_logger(config.logging.dir.as_deref().map(Path::new), &config.logging.level);
    info!(config = %path.display(), "Herald starting");

    let settings = DispatchSettings {
        prefix: config.commands.prefix.clone(),
        quote_delimiter: config.commands.quote_delimiter.clone(),
    };

    match cli.command {
        Commands::Discord => run_discord(&config, settings).await,
        Commands::Console => {
            let dispatcher = demo::build_dispatcher::<InboundMessage>(&config)?;
            ConsoleAdapter::new(Arc::new(dispatcher), settings).start().await
        }
        Commands::Config => {
            let mut shown = config.clone();
            if let Some(discord) = shown.discord.as_mut() {
                discord.token = "[REDACTED]".to_string();
            }
            println!("{}", serde_json::to_string_pretty(&shown)?);
            Ok(())
        }
    }
}

async fn run_discord(config: &HeraldConfig, settings: DispatchSettings) -> Result<()> {
    let token = config
        .discord
        .as_ref()
        .map(|d| d.token.clone())
        .context("no Discord token; set discord.token in the config or DISCORD_TOKEN")?;

    let dispatcher = demo::build_dispatcher::<DiscordMessage>(config)?;
    let adapter = DiscordAdapter::new(token, Arc::new(dispatcher), settings);
    info!(adapter = adapter.name(), "Adapter ready");
    adapter.start().await
}
