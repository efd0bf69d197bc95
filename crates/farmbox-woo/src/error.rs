use farmbox_core::DirectoryError;
use thiserror::Error;

/// Failures that abort a single order conversion.
///
/// Malformed order data never ends up here; every field has a fallback.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("customer lookup failed for order {order_id} (woo customer {customer_id}): {source}")]
    CustomerLookup {
        order_id: i64,
        customer_id: i64,
        #[source]
        source: DirectoryError,
    },
}
