//! The canonical order shape consumed by persistence and the admin UI.
//!
//! Everything here is plain data. Producers live in `farmbox-woo`; this crate
//! only fixes the vocabulary so downstream layers do not depend on the
//! legacy import path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order progress as tracked by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipping,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(label)
    }
}

/// Payment settlement state, tracked independently of [`OrderStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
    PartiallyPaid,
    Closed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 6] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
        PaymentStatus::PartiallyPaid,
        PaymentStatus::Closed,
    ];
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Closed => "closed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    OnlineCard,
    WireTransfer,
    CashOnDelivery,
}

/// Which customer segments may pick a payment method at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegments {
    pub guest: bool,
    pub registered: bool,
    pub vip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i32,
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    pub additional_cost: Decimal,
    /// Built-in methods cannot be deleted from the admin screens.
    pub protected: bool,
    pub enabled_for: CustomerSegments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    pub id: i32,
    pub name: String,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Delivery,
    Pickup,
    Billing,
}

/// How much of a free-text address the parser could place with confidence.
///
/// `UnparsedRemainder` means the text after the house number matched none of
/// the floor/door patterns; the raw text is kept here and also copied into
/// `floor` so nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParseConfidence {
    Parsed,
    UnparsedRemainder { raw: String },
    /// No street type or house number was found; the whole text is the street.
    Unstructured,
}

/// Street-level components split out of a Hungarian address line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    pub street: String,
    pub house_number: String,
    pub floor: String,
    pub doorbell: String,
    pub confidence: ParseConfidence,
}

impl ParsedAddress {
    /// Joins the components back into a single address line.
    #[must_use]
    pub fn to_line(&self) -> String {
        [
            self.street.as_str(),
            self.house_number.as_str(),
            self.floor.as_str(),
            self.doorbell.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    pub address_type: AddressType,
    pub name: String,
    pub company: String,
    pub street: String,
    pub house_number: String,
    pub floor: String,
    pub doorbell: String,
    pub postcode: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub tax_number: String,
    pub note: String,
    pub parse_confidence: ParseConfidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Legacy product id, when the line item carried one.
    pub product_id: Option<String>,
    pub name: String,
    pub quantity: Decimal,
    pub net_price: Decimal,
    pub gross_unit_price: Decimal,
    pub vat_percent: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryEntry {
    pub at: DateTime<Utc>,
    pub status: OrderStatus,
    pub note: String,
}

/// An order in the application's own shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalOrder {
    pub id: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// `None` when the legacy customer could not be matched to an account.
    pub customer_id: Option<String>,
    pub customer_is_vip: bool,
    pub billing_emails: Vec<String>,
    pub notify_emails: Vec<String>,
    pub customer_name: String,
    pub deny_invoice: bool,
    pub needs_vat: bool,
    pub surcharge_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub vat_total: Decimal,
    pub discount_total: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_due_days: i32,
    pub courier: Option<String>,
    pub planned_shipping_date: Option<DateTime<Utc>>,
    /// Time window next to the planned date, e.g. `"10:00-12:00"`.
    pub planned_shipping_time: String,
    /// Raw payment gateway state as a JSON string.
    pub payment_state: Option<String>,
    pub history: Vec<OrderHistoryEntry>,
    pub shipping_address: OrderAddress,
    pub billing_address: OrderAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Delivered).unwrap();
        assert_eq!(json, "\"delivered\"");
    }

    #[test]
    fn payment_status_partially_paid_label() {
        let json = serde_json::to_string(&PaymentStatus::PartiallyPaid).unwrap();
        assert_eq!(json, "\"partially_paid\"");
        assert_eq!(PaymentStatus::PartiallyPaid.to_string(), "partially_paid");
    }

    #[test]
    fn parse_confidence_is_kind_tagged() {
        let parsed = serde_json::to_value(ParseConfidence::Parsed).unwrap();
        assert_eq!(parsed, serde_json::json!({ "kind": "parsed" }));

        let raw = serde_json::to_value(ParseConfidence::UnparsedRemainder {
            raw: "hátsó bejárat".to_string(),
        })
        .unwrap();
        assert_eq!(
            raw,
            serde_json::json!({ "kind": "unparsed-remainder", "raw": "hátsó bejárat" })
        );
    }

    #[test]
    fn parsed_address_to_line_skips_empty_parts() {
        let address = ParsedAddress {
            street: "Jókai utca".to_string(),
            house_number: "42".to_string(),
            floor: String::new(),
            doorbell: String::new(),
            confidence: ParseConfidence::Parsed,
        };
        assert_eq!(address.to_line(), "Jókai utca 42");
    }

    #[test]
    fn payment_method_kind_field_is_named_type() {
        let method = PaymentMethod {
            id: 2,
            slug: "cheque".to_string(),
            name: "Banki átutalás".to_string(),
            kind: PaymentMethodKind::WireTransfer,
            additional_cost: Decimal::ZERO,
            protected: true,
            enabled_for: CustomerSegments {
                guest: true,
                registered: true,
                vip: true,
            },
        };
        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["type"], "wire_transfer");
        assert_eq!(value["enabledFor"]["vip"], true);
    }
}
