//! Conversion from a WooCommerce export record to [`InternalOrder`].
//!
//! Address splitting, status mapping and money extraction are delegated to
//! sibling modules; this module resolves the customer and assembles the
//! result. Only the customer lookup can fail.

use chrono::{DateTime, NaiveDateTime, Utc};
use farmbox_core::{
    AddressType, CustomerDirectory, CustomerIdentity, InternalOrder, OrderAddress,
};

use crate::address::parse_address;
use crate::error::ConvertError;
use crate::methods::{
    payment_due_days, resolve_payment_method, resolve_shipping_method, ONLINE_GATEWAY_SLUG,
    PERSONAL_PICKUP_LABEL,
};
use crate::money::{
    items_subtotal, normalize_items, paid_amount, shipping_cost, surcharge_amount,
};
use crate::schedule::{extract_planned_date, extract_shipment_time};
use crate::status::{map_order_status, map_payment_status};
use crate::types::{MetaValue, WooAddress, WooOrder};

const TAX_NUMBER_META_KEY: &str = "_billing_tax_number";
const DENY_INVOICE_META_KEY: &str = "_deny_invoice";

/// Converts one WooCommerce order, resolving its customer through `directory`.
///
/// # Errors
///
/// Returns [`ConvertError::CustomerLookup`] if the directory backend fails.
/// Missing or malformed order data never produces an error.
pub async fn convert<D: CustomerDirectory>(
    order: &WooOrder,
    directory: &D,
) -> Result<InternalOrder, ConvertError> {
    let customer = directory
        .get_user_by_woo_id(order.customer_id)
        .await
        .map_err(|source| ConvertError::CustomerLookup {
            order_id: order.id,
            customer_id: order.customer_id,
            source,
        })?;

    if order.customer_id > 0 && !customer.is_resolved() {
        tracing::warn!(
            order_id = order.id,
            customer_id = order.customer_id,
            "legacy customer has no account; importing without customer id"
        );
    }

    Ok(assemble(order, &customer))
}

/// Builds the [`InternalOrder`] once the customer is known.
#[must_use]
pub fn assemble(order: &WooOrder, customer: &CustomerIdentity) -> InternalOrder {
    let shipping_cost = shipping_cost(order);
    let shipping_method = resolve_shipping_method(order, shipping_cost);
    let payment_method = resolve_payment_method(&order.payment_method);

    let items = normalize_items(order);
    let subtotal = items_subtotal(&items);

    let tax_number = order.meta_text(TAX_NUMBER_META_KEY).trim().to_string();
    let billing_emails = billing_emails(order);
    let notify_emails = match customer.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => vec![email.to_string()],
        _ => billing_emails.clone(),
    };

    let shipping_type = if shipping_method.name == PERSONAL_PICKUP_LABEL {
        AddressType::Pickup
    } else {
        AddressType::Delivery
    };
    let shipping_source = if has_address(&order.shipping) {
        &order.shipping
    } else {
        &order.billing
    };
    let shipping_address = build_address(
        shipping_source,
        &order.billing,
        shipping_type,
        "",
        order.customer_note.trim(),
    );
    let billing_address = build_address(
        &order.billing,
        &order.billing,
        AddressType::Billing,
        &tax_number,
        "",
    );

    tracing::debug!(
        order_id = order.id,
        items = items.len(),
        shipping = %shipping_method.name,
        payment = %payment_method.slug,
        "assembled legacy order"
    );

    InternalOrder {
        id: order.id.to_string(),
        created_at: normalize_timestamp(&order.date_created_gmt),
        customer_id: customer.id.clone(),
        customer_is_vip: customer.is_vip(),
        billing_emails,
        notify_emails,
        customer_name: customer_name(order),
        deny_invoice: order
            .meta
            .get(DENY_INVOICE_META_KEY)
            .is_some_and(MetaValue::is_truthy),
        needs_vat: !tax_number.is_empty(),
        surcharge_amount: surcharge_amount(order),
        items,
        subtotal,
        shipping_cost,
        vat_total: order.tax_amount.as_decimal(),
        discount_total: order.discount_total_amount.as_decimal(),
        total: order.total_amount.as_decimal(),
        paid_amount: paid_amount(order),
        shipping_method,
        payment_method,
        order_status: map_order_status(order.status),
        payment_status: map_payment_status(order.status, &order.payment_method),
        payment_due_days: payment_due_days(&order.payment_method),
        courier: None,
        planned_shipping_date: extract_planned_date(order),
        planned_shipping_time: extract_shipment_time(order),
        payment_state: payment_state(order),
        history: Vec::new(),
        shipping_address,
        billing_address,
    }
}

fn has_address(address: &WooAddress) -> bool {
    !address.address_line().is_empty() || !address.city.trim().is_empty()
}

/// Builds one address record. Empty phone and email fall back to `contact`.
fn build_address(
    address: &WooAddress,
    contact: &WooAddress,
    address_type: AddressType,
    tax_number: &str,
    note: &str,
) -> OrderAddress {
    let parsed = parse_address(&address.address_line());
    let phone = first_non_empty(&address.phone, &contact.phone);
    let email = first_non_empty(&address.email, &contact.email);

    OrderAddress {
        address_type,
        name: address.full_name(),
        company: address.company.trim().to_string(),
        street: parsed.street,
        house_number: parsed.house_number,
        floor: parsed.floor,
        doorbell: parsed.doorbell,
        postcode: address.postcode.trim().to_string(),
        city: address.city.trim().to_string(),
        phone,
        email,
        tax_number: tax_number.to_string(),
        note: note.to_string(),
        parse_confidence: parsed.confidence,
    }
}

fn first_non_empty(primary: &str, fallback: &str) -> String {
    let primary = primary.trim();
    if primary.is_empty() {
        fallback.trim().to_string()
    } else {
        primary.to_string()
    }
}

/// Distinct, non-empty billing addresses from the order column and the
/// billing block.
fn billing_emails(order: &WooOrder) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    let candidates = [order.billing_email.as_deref(), Some(order.billing.email.as_str())];
    for email in candidates.into_iter().flatten().map(str::trim) {
        if !email.is_empty() && !emails.iter().any(|e| e.eq_ignore_ascii_case(email)) {
            emails.push(email.to_string());
        }
    }
    emails
}

fn customer_name(order: &WooOrder) -> String {
    let shipping = order.shipping.full_name();
    if !shipping.is_empty() {
        return shipping;
    }
    let billing = order.billing.full_name();
    if !billing.is_empty() {
        return billing;
    }
    order.billing.company.trim().to_string()
}

/// Gateway state for online payments: the order metadata as a JSON object.
fn payment_state(order: &WooOrder) -> Option<String> {
    if order.payment_method != ONLINE_GATEWAY_SLUG || order.meta.is_empty() {
        return None;
    }
    let state: serde_json::Map<String, serde_json::Value> = order
        .meta
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect();
    Some(serde_json::Value::Object(state).to_string())
}

/// Normalizes the export timestamp to RFC 3339 UTC, passing through
/// anything unrecognized.
fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Utc).to_rfc3339();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return naive.and_utc().to_rfc3339();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return naive.and_utc().to_rfc3339();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
