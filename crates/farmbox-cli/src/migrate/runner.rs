//! Concurrent conversion of a loaded export.

use farmbox_core::{CustomerDirectory, InternalOrder};
use farmbox_woo::{convert, ConvertError, WooOrder};
use futures::stream::{self, StreamExt};

/// Result of a migration run. `converted` keeps the export's order.
pub(crate) struct MigrationReport {
    pub converted: Vec<InternalOrder>,
    pub failed: usize,
}

/// Converts every order with at most `concurrency` lookups in flight.
///
/// A failed conversion is logged and counted; the run only fails when no
/// order converted at all.
///
/// # Errors
///
/// Returns an error if every order in a non-empty export failed.
pub(crate) async fn run_migration<D: CustomerDirectory>(
    orders: &[WooOrder],
    directory: &D,
    concurrency: usize,
) -> anyhow::Result<MigrationReport> {
    let max_concurrent = concurrency.max(1);

    let mut results: Vec<(usize, i64, Result<InternalOrder, ConvertError>)> =
        stream::iter(orders.iter().enumerate())
            .map(|(index, order)| async move {
                (index, order.id, convert(order, directory).await)
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut converted = Vec::with_capacity(results.len());
    let mut failed: usize = 0;
    for (_, order_id, result) in results {
        match result {
            Ok(order) => converted.push(order),
            Err(e) => {
                tracing::error!(order_id, error = %e, "failed to convert order");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        tracing::warn!(
            failed,
            total_orders = orders.len(),
            "some orders failed during migration"
        );
    }

    if !orders.is_empty() && failed == orders.len() {
        anyhow::bail!("all {failed} orders failed conversion");
    }

    Ok(MigrationReport { converted, failed })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use farmbox_core::{CustomerIdentity, DirectoryError, InMemoryDirectory};

    use super::*;

    /// Fails lookups for the listed customer ids.
    struct FlakyDirectory {
        failing: Vec<i64>,
    }

    impl CustomerDirectory for FlakyDirectory {
        async fn get_user_by_woo_id(
            &self,
            woo_customer_id: i64,
        ) -> Result<CustomerIdentity, DirectoryError> {
            if self.failing.contains(&woo_customer_id) {
                Err(DirectoryError::Unavailable("timeout".to_string()))
            } else {
                Ok(CustomerIdentity::not_found())
            }
        }
    }

    fn order(id: i64, customer_id: i64) -> WooOrder {
        WooOrder {
            id,
            customer_id,
            ..WooOrder::default()
        }
    }

    #[tokio::test]
    async fn converts_all_orders_in_export_order() {
        let mut customers = HashMap::new();
        customers.insert(
            5,
            CustomerIdentity {
                id: Some("user-5".to_string()),
                ..CustomerIdentity::default()
            },
        );
        let directory = InMemoryDirectory::new(customers);
        let orders: Vec<WooOrder> = (1..=10).map(|id| order(id, id % 6)).collect();

        let report = run_migration(&orders, &directory, 3).await.unwrap();

        assert_eq!(report.failed, 0);
        let ids: Vec<String> = report.converted.iter().map(|o| o.id.clone()).collect();
        let expected: Vec<String> = (1..=10).map(|id: i64| id.to_string()).collect();
        assert_eq!(ids, expected);
        assert_eq!(report.converted[4].customer_id.as_deref(), Some("user-5"));
    }

    #[tokio::test]
    async fn failed_orders_are_skipped() {
        let directory = FlakyDirectory { failing: vec![2] };
        let orders = vec![order(1, 1), order(2, 2), order(3, 3)];

        let report = run_migration(&orders, &directory, 2).await.unwrap();

        assert_eq!(report.failed, 1);
        let ids: Vec<&str> = report.converted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn all_failed_is_an_error() {
        let directory = FlakyDirectory {
            failing: vec![1, 2],
        };
        let orders = vec![order(1, 1), order(2, 2)];

        let err = run_migration(&orders, &directory, 4).await.err().unwrap();
        assert!(err.to_string().contains("all 2 orders failed"));
    }

    #[tokio::test]
    async fn empty_export_succeeds() {
        let report = run_migration(&[], &InMemoryDirectory::default(), 4)
            .await
            .unwrap();
        assert!(report.converted.is_empty());
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped() {
        let orders = vec![order(1, 0)];
        let report = run_migration(&orders, &InMemoryDirectory::default(), 0)
            .await
            .unwrap();
        assert_eq!(report.converted.len(), 1);
    }
}
