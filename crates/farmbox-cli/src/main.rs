mod directory;
mod migrate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use farmbox_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "farmbox-cli")]
#[command(about = "Farmbox legacy WooCommerce migration tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a WooCommerce order export into internal orders
    MigrateOrders {
        /// JSON export: an array of orders or `{"orders": [...]}`
        #[arg(long)]
        input: PathBuf,

        /// Write converted orders here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Resolve customers from a local JSON file instead of Supabase
        #[arg(long)]
        customers: Option<PathBuf>,

        /// Maximum concurrent conversions (defaults to `FARMBOX_MIGRATION_CONCURRENCY`)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Split one Hungarian address line and print the parts as JSON
    ParseAddress {
        /// Address text, e.g. "Kossuth tér 5 2. em. 3"
        text: String,

        /// Print the parts rejoined on one line instead of JSON
        #[arg(long)]
        line: bool,
    },
}

/// Log level used when the configuration itself failed to load.
const FALLBACK_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = farmbox_core::load_app_config();

    let log_level = config
        .as_ref()
        .map_or(FALLBACK_LOG_LEVEL, |config| config.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli, config).await
}

/// Dispatches a parsed command. Only `migrate-orders` needs a valid config.
async fn run(cli: Cli, config: Result<AppConfig, ConfigError>) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::MigrateOrders {
            input,
            output,
            customers,
            concurrency,
        }) => {
            let config = config?;
            let options = migrate::MigrateOptions {
                input,
                output,
                customers,
                concurrency: concurrency.unwrap_or(config.migration_concurrency),
            };
            migrate::run_migrate_orders(&config, &options).await?;
        }
        Some(Commands::ParseAddress { text, line }) => {
            println!("{}", render_address(&text, line)?);
        }
        None => println!("farmbox-cli ready; run with --help for commands"),
    }

    Ok(())
}

fn render_address(text: &str, line: bool) -> anyhow::Result<String> {
    let parsed = farmbox_woo::parse_address(text);
    if line {
        Ok(parsed.to_line())
    } else {
        Ok(serde_json::to_string_pretty(&parsed)?)
    }
}

#[cfg(test)]
mod tests;
