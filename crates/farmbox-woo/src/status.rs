//! WooCommerce status translation.
//!
//! WooCommerce tracks order progress and payment in one status field. For
//! gateways other than the online card gateway, payment state has to be
//! inferred from it, so the two mappings are kept as separate functions.

use farmbox_core::{OrderStatus, PaymentStatus};

use crate::methods::ONLINE_GATEWAY_SLUG;
use crate::types::WooOrderStatus;

/// Maps a WooCommerce status to the application's order progress.
#[must_use]
pub fn map_order_status(status: WooOrderStatus) -> OrderStatus {
    match status {
        WooOrderStatus::Shipping => OrderStatus::Shipping,
        WooOrderStatus::Processing => OrderStatus::Processing,
        WooOrderStatus::Completed => OrderStatus::Delivered,
        WooOrderStatus::Failed | WooOrderStatus::Cancelled | WooOrderStatus::Trash => {
            OrderStatus::Cancelled
        }
        WooOrderStatus::Refunded => OrderStatus::Refunded,
        WooOrderStatus::Pending
        | WooOrderStatus::NewOrder
        | WooOrderStatus::OnHold
        | WooOrderStatus::AutoDraft
        | WooOrderStatus::Unknown => OrderStatus::Pending,
    }
}

/// Infers payment state from a WooCommerce status and the gateway slug.
///
/// Orders paid through the online gateway are settled before they reach
/// WooCommerce, so early statuses already count as paid.
#[must_use]
pub fn map_payment_status(status: WooOrderStatus, payment_method_slug: &str) -> PaymentStatus {
    let online = payment_method_slug == ONLINE_GATEWAY_SLUG;
    match status {
        WooOrderStatus::Pending | WooOrderStatus::NewOrder | WooOrderStatus::OnHold => {
            if online {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            }
        }
        WooOrderStatus::Shipping | WooOrderStatus::Processing => {
            if online {
                PaymentStatus::Closed
            } else {
                PaymentStatus::Pending
            }
        }
        WooOrderStatus::Completed => PaymentStatus::Closed,
        WooOrderStatus::Failed => PaymentStatus::Failed,
        WooOrderStatus::Cancelled | WooOrderStatus::Trash | WooOrderStatus::Refunded => {
            PaymentStatus::Refunded
        }
        WooOrderStatus::AutoDraft | WooOrderStatus::Unknown => PaymentStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_table() {
        let cases = [
            (WooOrderStatus::Pending, OrderStatus::Pending),
            (WooOrderStatus::NewOrder, OrderStatus::Pending),
            (WooOrderStatus::OnHold, OrderStatus::Pending),
            (WooOrderStatus::Shipping, OrderStatus::Shipping),
            (WooOrderStatus::Processing, OrderStatus::Processing),
            (WooOrderStatus::Completed, OrderStatus::Delivered),
            (WooOrderStatus::Failed, OrderStatus::Cancelled),
            (WooOrderStatus::Cancelled, OrderStatus::Cancelled),
            (WooOrderStatus::Trash, OrderStatus::Cancelled),
            (WooOrderStatus::Refunded, OrderStatus::Refunded),
            (WooOrderStatus::AutoDraft, OrderStatus::Pending),
            (WooOrderStatus::Unknown, OrderStatus::Pending),
        ];
        for (woo, expected) in cases {
            assert_eq!(map_order_status(woo), expected, "for {woo:?}");
        }
    }

    #[test]
    fn pending_bucket_depends_on_gateway() {
        for status in [
            WooOrderStatus::Pending,
            WooOrderStatus::NewOrder,
            WooOrderStatus::OnHold,
        ] {
            assert_eq!(map_payment_status(status, "otp_simple"), PaymentStatus::Paid);
            assert_eq!(map_payment_status(status, "cod"), PaymentStatus::Pending);
        }
    }

    #[test]
    fn processing_with_online_gateway_is_closed() {
        assert_eq!(
            map_payment_status(WooOrderStatus::Processing, "otp_simple"),
            PaymentStatus::Closed
        );
        assert_eq!(
            map_payment_status(WooOrderStatus::Processing, "cheque"),
            PaymentStatus::Pending
        );
        assert_eq!(
            map_payment_status(WooOrderStatus::Shipping, "otp_simple"),
            PaymentStatus::Closed
        );
    }

    #[test]
    fn terminal_statuses_ignore_gateway() {
        for slug in ["otp_simple", "cheque", "cod", ""] {
            assert_eq!(
                map_payment_status(WooOrderStatus::Completed, slug),
                PaymentStatus::Closed
            );
            assert_eq!(
                map_payment_status(WooOrderStatus::Failed, slug),
                PaymentStatus::Failed
            );
            assert_eq!(
                map_payment_status(WooOrderStatus::Cancelled, slug),
                PaymentStatus::Refunded
            );
            assert_eq!(
                map_payment_status(WooOrderStatus::Trash, slug),
                PaymentStatus::Refunded
            );
            assert_eq!(
                map_payment_status(WooOrderStatus::AutoDraft, slug),
                PaymentStatus::Pending
            );
        }
    }

    #[test]
    fn every_status_maps_into_known_variants() {
        for status in WooOrderStatus::ALL {
            assert!(OrderStatus::ALL.contains(&map_order_status(status)));
            for slug in ["otp_simple", "cheque", "cod"] {
                assert!(PaymentStatus::ALL.contains(&map_payment_status(status, slug)));
            }
        }
    }

    #[test]
    fn unknown_status_defaults_to_pending() {
        assert_eq!(
            map_payment_status(WooOrderStatus::Unknown, "otp_simple"),
            PaymentStatus::Pending
        );
    }
}
