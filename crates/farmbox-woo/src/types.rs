//! WooCommerce order export types.
//!
//! ## Observed shape of the legacy export
//!
//! The export mirrors the HPOS `wc_orders` table joined with its address and
//! item tables, so field names follow the database columns rather than the
//! REST API (`total_amount`, `tax_amount`, `billing_email`).
//!
//! ### Metadata values
//! Item and order metadata are loose key/value maps. Values arrive as strings
//! most of the time (`"1000"`, `"flat_rate"`), occasionally as JSON numbers or
//! booleans, and sometimes as serialized PHP arrays decoded to objects.
//! [`MetaValue`] accepts all of them; numeric reads fall back to zero.
//!
//! ### Missing data
//! Older orders predate several columns. Every field is defaulted, and
//! explicit `null` string columns are read as empty strings.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// One order as exported from the WooCommerce store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WooOrder {
    pub id: i64,

    /// Creation time in GMT, either RFC 3339 or `"YYYY-MM-DD HH:MM:SS"`.
    #[serde(alias = "date_created", deserialize_with = "null_as_default")]
    pub date_created_gmt: String,

    /// WordPress user id; `0` for guest checkouts.
    pub customer_id: i64,

    pub billing_email: Option<String>,

    pub billing: WooAddress,

    pub shipping: WooAddress,

    pub line_items: Vec<WooLineItem>,

    pub status: WooOrderStatus,

    /// Gateway slug, e.g. `"otp_simple"`, `"cheque"`, `"cod"`.
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method: String,

    #[serde(deserialize_with = "null_as_default")]
    pub payment_method_title: String,

    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,

    pub total_amount: MetaValue,

    pub tax_amount: MetaValue,

    pub discount_total_amount: MetaValue,

    #[serde(deserialize_with = "null_as_default")]
    pub customer_note: String,

    /// Order-level metadata (`_billing_tax_number`, gateway fields, ...).
    pub meta: BTreeMap<String, MetaValue>,
}

impl WooOrder {
    /// Returns the first line item of the given kind.
    #[must_use]
    pub fn first_item(&self, kind: LineItemKind) -> Option<&WooLineItem> {
        self.line_items.iter().find(|item| item.kind == kind)
    }

    /// Iterates over all line items of the given kind.
    pub fn items_of(&self, kind: LineItemKind) -> impl Iterator<Item = &WooLineItem> {
        self.line_items.iter().filter(move |item| item.kind == kind)
    }

    /// Reads an order-level metadata value as text, empty when absent.
    #[must_use]
    pub fn meta_text(&self, key: &str) -> String {
        self.meta.get(key).map(MetaValue::to_text).unwrap_or_default()
    }
}

/// A billing or shipping block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WooAddress {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postcode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

impl WooAddress {
    /// Both address lines joined by a space and trimmed.
    #[must_use]
    pub fn address_line(&self) -> String {
        format!("{} {}", self.address_1, self.address_2)
            .trim()
            .to_string()
    }

    /// Full name in Hungarian order (family name first).
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name.trim(), self.first_name.trim())
            .trim()
            .to_string()
    }
}

/// The `order_item_type` discriminant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    LineItem,
    Shipping,
    Fee,
    /// Coupons, taxes and anything else the conversion does not read.
    #[default]
    #[serde(other)]
    Other,
}

/// One row of the order's item table with its metadata.
///
/// Which metadata keys are meaningful depends on `kind`:
/// - `line_item`: `_qty`, `_line_total`, `_line_tax`, `_product_id`
/// - `shipping`: `method_id`, `cost`, `total_tax`, `pickup_time`
/// - `fee`: `_line_total`, `_line_tax`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WooLineItem {
    pub id: i64,
    #[serde(alias = "order_item_name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", alias = "order_item_type")]
    pub kind: LineItemKind,
    pub meta: BTreeMap<String, MetaValue>,
}

impl WooLineItem {
    /// Metadata value as text, or `None` when the key is absent.
    #[must_use]
    pub fn meta_str(&self, key: &str) -> Option<String> {
        self.meta.get(key).map(MetaValue::to_text)
    }

    /// Metadata value as a decimal; absent or malformed values read as zero.
    #[must_use]
    pub fn meta_decimal(&self, key: &str) -> Decimal {
        self.meta
            .get(key)
            .map_or(Decimal::ZERO, MetaValue::as_decimal)
    }
}

/// WooCommerce post status labels for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum WooOrderStatus {
    #[serde(rename = "wc-pending", alias = "pending")]
    Pending,
    #[serde(rename = "wc-new-order", alias = "new-order")]
    NewOrder,
    #[serde(rename = "wc-on-hold", alias = "on-hold")]
    OnHold,
    #[serde(rename = "wc-shipping", alias = "shipping")]
    Shipping,
    #[serde(rename = "wc-processing", alias = "processing")]
    Processing,
    #[serde(rename = "wc-completed", alias = "completed")]
    Completed,
    #[serde(rename = "wc-failed", alias = "failed")]
    Failed,
    #[serde(rename = "wc-cancelled", alias = "cancelled")]
    Cancelled,
    #[serde(rename = "wc-refunded", alias = "refunded")]
    Refunded,
    #[serde(rename = "wc-trash", alias = "trash")]
    Trash,
    #[serde(rename = "wc-auto-draft", alias = "auto-draft")]
    AutoDraft,
    #[default]
    #[serde(other)]
    Unknown,
}

impl WooOrderStatus {
    pub const ALL: [WooOrderStatus; 12] = [
        WooOrderStatus::Pending,
        WooOrderStatus::NewOrder,
        WooOrderStatus::OnHold,
        WooOrderStatus::Shipping,
        WooOrderStatus::Processing,
        WooOrderStatus::Completed,
        WooOrderStatus::Failed,
        WooOrderStatus::Cancelled,
        WooOrderStatus::Refunded,
        WooOrderStatus::Trash,
        WooOrderStatus::AutoDraft,
        WooOrderStatus::Unknown,
    ];
}

/// A loosely-typed metadata value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Serialized arrays/objects; kept for the payment state dump only.
    Other(serde_json::Value),
}

impl MetaValue {
    /// Text form of the value. `Null` is empty; structured values are JSON.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            MetaValue::Null => String::new(),
            MetaValue::Bool(b) => b.to_string(),
            MetaValue::Number(n) => n.to_string(),
            MetaValue::String(s) => s.clone(),
            MetaValue::Other(v) => v.to_string(),
        }
    }

    /// Numeric value, zero when missing or unparseable.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        match self {
            MetaValue::Number(n) => parse_decimal(&n.to_string()),
            MetaValue::String(s) => parse_decimal(s),
            MetaValue::Null | MetaValue::Bool(_) | MetaValue::Other(_) => Decimal::ZERO,
        }
    }

    /// Loose boolean reading of flags such as `"yes"`, `"1"` or `true`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            MetaValue::Bool(b) => *b,
            MetaValue::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            MetaValue::String(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "1" | "yes" | "y" | "true" | "on"
            ),
            MetaValue::Null | MetaValue::Other(_) => false,
        }
    }

    /// Converts back into plain JSON for the payment state dump.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MetaValue::Null => serde_json::Value::Null,
            MetaValue::Bool(b) => serde_json::Value::Bool(*b),
            MetaValue::Number(n) => serde_json::Value::Number(n.clone()),
            MetaValue::String(s) => serde_json::Value::String(s.clone()),
            MetaValue::Other(v) => v.clone(),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

/// Parses `raw` as a decimal, accepting a comma decimal separator and
/// scientific notation. Anything else is zero.
fn parse_decimal(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    let candidate = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replace(',', ".")
    };
    Decimal::from_str(&candidate)
        .or_else(|_| Decimal::from_scientific(&candidate))
        .unwrap_or(Decimal::ZERO)
}

/// Reads `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
