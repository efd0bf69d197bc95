//! Planned shipping date and time window from the shipping item's
//! `pickup_time` metadata (`"YYYY.MM.DD HH:MM-HH:MM"` or date only).

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{LineItemKind, WooOrder};

fn pickup_time(order: &WooOrder) -> Option<String> {
    order
        .first_item(LineItemKind::Shipping)
        .and_then(|item| item.meta_str("pickup_time"))
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Planned shipping day at midnight UTC, or `None` when absent or unparseable.
#[must_use]
pub fn extract_planned_date(order: &WooOrder) -> Option<DateTime<Utc>> {
    let raw = pickup_time(order)?;
    let date_part = raw.split_once(' ').map_or(raw.as_str(), |(date, _)| date);
    parse_dotted_date(date_part)
}

/// Time window after the date, verbatim; empty when there is none.
#[must_use]
pub fn extract_shipment_time(order: &WooOrder) -> String {
    pickup_time(order)
        .and_then(|raw| raw.split_once(' ').map(|(_, time)| time.to_string()))
        .unwrap_or_default()
}

/// Parses `"2024.05.17"` (trailing dot tolerated) as a UTC midnight.
fn parse_dotted_date(raw: &str) -> Option<DateTime<Utc>> {
    let iso = raw.trim_end_matches('.').replace('.', "-");
    match NaiveDate::parse_from_str(&iso, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
        Err(err) => {
            tracing::warn!(raw, error = %err, "unparseable pickup date");
            None
        }
    }
}
