//! Static shipping and payment method tables for legacy orders.

use farmbox_core::{CustomerSegments, PaymentMethod, PaymentMethodKind, ShippingMethod};
use rust_decimal::Decimal;

use crate::types::{LineItemKind, WooOrder};

/// Slug of the online card gateway (OTP SimplePay).
pub const ONLINE_GATEWAY_SLUG: &str = "otp_simple";
/// Slug WooCommerce uses for bank transfer ("check payments" repurposed).
pub const WIRE_TRANSFER_SLUG: &str = "cheque";
/// `method_id` of the personal pickup shipping method.
pub const PICKUP_METHOD_ID: &str = "pickup_location";

pub const PERSONAL_PICKUP_LABEL: &str = "Személyes átvétel";
pub const HOME_DELIVERY_LABEL: &str = "Házhozszállítás";
pub const NO_SHIPPING_LABEL: &str = "Nincs szállítás";

const ALL_SEGMENTS: CustomerSegments = CustomerSegments {
    guest: true,
    registered: true,
    vip: true,
};

struct PaymentMethodEntry {
    id: i32,
    slug: &'static str,
    name: &'static str,
    kind: PaymentMethodKind,
    payment_due_days: i32,
    enabled_for: CustomerSegments,
}

const ONLINE_GATEWAY: PaymentMethodEntry = PaymentMethodEntry {
    id: 1,
    slug: ONLINE_GATEWAY_SLUG,
    name: "Online bankkártyás fizetés",
    kind: PaymentMethodKind::OnlineCard,
    payment_due_days: 0,
    enabled_for: ALL_SEGMENTS,
};

const WIRE_TRANSFER: PaymentMethodEntry = PaymentMethodEntry {
    id: 2,
    slug: WIRE_TRANSFER_SLUG,
    name: "Banki átutalás",
    kind: PaymentMethodKind::WireTransfer,
    payment_due_days: 8,
    enabled_for: ALL_SEGMENTS,
};

const CASH_ON_DELIVERY: PaymentMethodEntry = PaymentMethodEntry {
    id: 3,
    slug: "cod",
    name: "Utánvét",
    kind: PaymentMethodKind::CashOnDelivery,
    payment_due_days: 0,
    enabled_for: ALL_SEGMENTS,
};

fn payment_entry(slug: &str) -> &'static PaymentMethodEntry {
    match slug {
        ONLINE_GATEWAY_SLUG => &ONLINE_GATEWAY,
        WIRE_TRANSFER_SLUG => &WIRE_TRANSFER,
        _ => &CASH_ON_DELIVERY,
    }
}

/// Resolves a WooCommerce gateway slug. Unknown slugs are cash on delivery.
#[must_use]
pub fn resolve_payment_method(slug: &str) -> PaymentMethod {
    let entry = payment_entry(slug);
    PaymentMethod {
        id: entry.id,
        slug: entry.slug.to_string(),
        name: entry.name.to_string(),
        kind: entry.kind,
        additional_cost: Decimal::ZERO,
        protected: true,
        enabled_for: entry.enabled_for,
    }
}

/// Days the customer has to settle the invoice for this gateway.
#[must_use]
pub fn payment_due_days(slug: &str) -> i32 {
    payment_entry(slug).payment_due_days
}

/// Resolves the shipping method from the order's shipping line item.
///
/// `cost` is the gross shipping cost computed by the caller.
#[must_use]
pub fn resolve_shipping_method(order: &WooOrder, cost: Decimal) -> ShippingMethod {
    let Some(shipping) = order.first_item(LineItemKind::Shipping) else {
        return ShippingMethod {
            id: 0,
            name: NO_SHIPPING_LABEL.to_string(),
            cost: Decimal::ZERO,
        };
    };

    if shipping.meta_str("method_id").as_deref() == Some(PICKUP_METHOD_ID) {
        ShippingMethod {
            id: 2,
            name: PERSONAL_PICKUP_LABEL.to_string(),
            cost,
        }
    } else {
        ShippingMethod {
            id: 1,
            name: HOME_DELIVERY_LABEL.to_string(),
            cost,
        }
    }
}
