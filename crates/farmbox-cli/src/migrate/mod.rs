//! `migrate-orders` command handler.
//!
//! Reads a WooCommerce export, converts each order against the selected
//! customer directory, and writes the converted orders as a JSON array.
//! Per-order failures are logged and skipped rather than propagated.

mod input;
mod runner;

use std::path::PathBuf;

use farmbox_core::AppConfig;

use input::{parse_export, LoadedExport};
use runner::{run_migration, MigrationReport};

use crate::directory::build_directory;

#[derive(Debug)]
pub(crate) struct MigrateOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub customers: Option<PathBuf>,
    pub concurrency: usize,
}

/// Runs a full migration.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the customer
/// directory cannot be built, every order fails, or the output cannot be
/// written.
pub(crate) async fn run_migrate_orders(
    config: &AppConfig,
    options: &MigrateOptions,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&options.input)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", options.input.display()))?;
    let LoadedExport { orders, skipped } = parse_export(&raw)?;
    let directory = build_directory(config, options.customers.as_deref())?;

    tracing::info!(
        orders = orders.len(),
        skipped,
        concurrency = options.concurrency,
        "starting order migration"
    );

    let MigrationReport { converted, failed } =
        run_migration(&orders, &directory, options.concurrency).await?;

    let json = serde_json::to_string_pretty(&converted)?;
    match &options.output {
        Some(path) => std::fs::write(path, json)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?,
        None => println!("{json}"),
    }

    tracing::info!(
        converted = converted.len(),
        failed,
        skipped,
        "order migration finished"
    );
    eprintln!(
        "migrate-orders: {} converted, {failed} failed, {skipped} skipped",
        converted.len()
    );
    Ok(())
}
