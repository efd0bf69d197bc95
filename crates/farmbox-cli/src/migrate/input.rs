//! Loading of WooCommerce order exports.

use farmbox_woo::WooOrder;
use serde::Deserialize;

/// Both export layouts seen in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportFile {
    List(Vec<serde_json::Value>),
    Wrapped { orders: Vec<serde_json::Value> },
}

/// Orders that deserialized, plus the count of entries that did not.
#[derive(Debug)]
pub(crate) struct LoadedExport {
    pub orders: Vec<WooOrder>,
    pub skipped: usize,
}

/// Parses an export file. Entries are deserialized one at a time so a single
/// malformed record is skipped instead of rejecting the file.
pub(crate) fn parse_export(raw: &str) -> anyhow::Result<LoadedExport> {
    let file: ExportFile = serde_json::from_str(raw).map_err(|e| {
        anyhow::anyhow!("export must be a JSON array of orders or {{\"orders\": [...]}}: {e}")
    })?;
    let entries = match file {
        ExportFile::List(entries) | ExportFile::Wrapped { orders: entries } => entries,
    };

    let mut orders = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<WooOrder>(entry) {
            Ok(order) => orders.push(order),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed export entry");
                skipped += 1;
            }
        }
    }

    Ok(LoadedExport { orders, skipped })
}
