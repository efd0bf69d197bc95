//! Monetary extraction from WooCommerce line item metadata.
//!
//! All reads go through [`WooLineItem::meta_decimal`], so a missing or
//! malformed value contributes zero instead of failing the order. Arithmetic
//! is checked; a result outside the `Decimal` range also reads as zero.

use farmbox_core::OrderItem;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::methods::ONLINE_GATEWAY_SLUG;
use crate::types::{LineItemKind, MetaValue, WooLineItem, WooOrder, WooOrderStatus};

/// Unwraps a checked result, logging and substituting zero on overflow.
fn or_zero(value: Option<Decimal>, field: &'static str) -> Decimal {
    value.unwrap_or_else(|| {
        tracing::warn!(field, "monetary value out of range; using zero");
        Decimal::ZERO
    })
}

/// Gross shipping cost: `cost` + `total_tax` of the shipping line item.
#[must_use]
pub fn shipping_cost(order: &WooOrder) -> Decimal {
    order
        .first_item(LineItemKind::Shipping)
        .map_or(Decimal::ZERO, |item| {
            or_zero(
                item.meta_decimal("cost")
                    .checked_add(item.meta_decimal("total_tax")),
                "shipping_cost",
            )
        })
}

/// Gross surcharge: `_line_total` + `_line_tax` of the fee line item.
#[must_use]
pub fn surcharge_amount(order: &WooOrder) -> Decimal {
    order
        .first_item(LineItemKind::Fee)
        .map_or(Decimal::ZERO, |item| {
            or_zero(
                item.meta_decimal("_line_total")
                    .checked_add(item.meta_decimal("_line_tax")),
                "surcharge_amount",
            )
        })
}

/// VAT rate in whole percent, rounded half away from zero.
///
/// Zero when `line_total` is not positive.
#[must_use]
pub fn vat_percent(line_total: Decimal, line_tax: Decimal) -> i32 {
    if line_total <= Decimal::ZERO {
        return 0;
    }
    line_tax
        .checked_div(line_total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_i32())
        .unwrap_or_else(|| {
            tracing::warn!(%line_total, %line_tax, "VAT percent out of range; using zero");
            0
        })
}

/// Converts one product line item to an [`OrderItem`].
#[must_use]
pub fn normalize_item(item: &WooLineItem) -> OrderItem {
    let quantity = item.meta_decimal("_qty");
    let line_total = item.meta_decimal("_line_total");
    let line_tax = item.meta_decimal("_line_tax");

    // Zero quantity means zero prices, not an overflow.
    let net_price = if quantity.is_zero() {
        Decimal::ZERO
    } else {
        or_zero(line_total.checked_div(quantity), "net_price")
    };
    let gross_unit_price = if quantity.is_zero() {
        Decimal::ZERO
    } else {
        or_zero(
            line_total
                .checked_add(line_tax)
                .and_then(|gross| gross.checked_div(quantity)),
            "gross_unit_price",
        )
    };
    let subtotal = or_zero(quantity.checked_mul(gross_unit_price), "subtotal")
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let product_id = item
        .meta_str("_variation_id")
        .filter(|id| !id.is_empty() && id != "0")
        .or_else(|| item.meta_str("_product_id"))
        .filter(|id| !id.is_empty() && id != "0");

    OrderItem {
        product_id,
        name: item.name.clone(),
        quantity: quantity.normalize(),
        net_price: net_price.normalize(),
        gross_unit_price: gross_unit_price.normalize(),
        vat_percent: vat_percent(line_total, line_tax),
        subtotal: subtotal.normalize(),
    }
}

/// Converts every product line item of the order.
#[must_use]
pub fn normalize_items(order: &WooOrder) -> Vec<OrderItem> {
    order
        .items_of(LineItemKind::LineItem)
        .map(normalize_item)
        .collect()
}

/// Sum of item subtotals.
#[must_use]
pub fn items_subtotal(items: &[OrderItem]) -> Decimal {
    or_zero(
        items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal)),
        "subtotal",
    )
}

/// Amount already paid.
///
/// Only two signals are trusted: a completed order, or an online gateway
/// order whose `approved` flag is set. Anything else reads as unpaid.
#[must_use]
pub fn paid_amount(order: &WooOrder) -> Decimal {
    let total = order.total_amount.as_decimal();
    if order.status == WooOrderStatus::Completed {
        return total;
    }
    let approved = order.meta.get("approved").is_some_and(MetaValue::is_truthy);
    if order.payment_method == ONLINE_GATEWAY_SLUG && approved {
        return total;
    }
    Decimal::ZERO
}
