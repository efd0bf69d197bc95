//! Customer identity resolution for legacy WooCommerce customer ids.

use std::collections::HashMap;
use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

/// Profile flags stored alongside the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub is_vip: Option<bool>,
}

/// The application account matched to a legacy customer id.
///
/// "Not found" is a value, not an error: both `id` and `email` are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerIdentity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

impl CustomerIdentity {
    #[must_use]
    pub fn not_found() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }

    #[must_use]
    pub fn is_vip(&self) -> bool {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.is_vip)
            .unwrap_or(false)
    }
}

/// Errors raised by a [`CustomerDirectory`] backend.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Network or TLS failure talking to the backend.
    #[error("customer directory transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the request for now (overloaded or rate limited).
    #[error("customer directory unavailable: {0}")]
    Unavailable(String),
}

/// Looks up application accounts by legacy WooCommerce customer id.
pub trait CustomerDirectory: Send + Sync {
    /// Resolves `woo_customer_id` to an account.
    ///
    /// Implementations answer unknown ids with [`CustomerIdentity::not_found`]
    /// and reserve `Err` for backend failures.
    fn get_user_by_woo_id(
        &self,
        woo_customer_id: i64,
    ) -> impl Future<Output = Result<CustomerIdentity, DirectoryError>> + Send;
}

/// Directory backed by a preloaded map, used for offline migrations and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    customers: HashMap<i64, CustomerIdentity>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new(customers: HashMap<i64, CustomerIdentity>) -> Self {
        Self { customers }
    }

    pub fn insert(&mut self, woo_customer_id: i64, identity: CustomerIdentity) {
        self.customers.insert(woo_customer_id, identity);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerDirectory for InMemoryDirectory {
    async fn get_user_by_woo_id(
        &self,
        woo_customer_id: i64,
    ) -> Result<CustomerIdentity, DirectoryError> {
        let identity = self
            .customers
            .get(&woo_customer_id)
            .cloned()
            .unwrap_or_else(CustomerIdentity::not_found);
        if !identity.is_resolved() {
            tracing::debug!(woo_customer_id, "no account for legacy customer");
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: &str, email: &str, vip: Option<bool>) -> CustomerIdentity {
        CustomerIdentity {
            id: Some(id.to_string()),
            email: Some(email.to_string()),
            user_metadata: Some(UserMetadata { is_vip: vip }),
        }
    }

    #[test]
    fn not_found_has_no_fields() {
        let nobody = CustomerIdentity::not_found();
        assert!(!nobody.is_resolved());
        assert!(nobody.email.is_none());
        assert!(!nobody.is_vip());
    }

    #[test]
    fn is_vip_reads_metadata_flag() {
        assert!(identity("u1", "a@b.hu", Some(true)).is_vip());
        assert!(!identity("u1", "a@b.hu", Some(false)).is_vip());
        assert!(!identity("u1", "a@b.hu", None).is_vip());
    }

    #[test]
    fn identity_deserializes_with_missing_metadata() {
        let parsed: CustomerIdentity =
            serde_json::from_str(r#"{"id":"abc","email":"x@y.hu"}"#).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("abc"));
        assert!(parsed.user_metadata.is_none());
    }

    #[tokio::test]
    async fn in_memory_directory_resolves_known_customer() {
        let mut directory = InMemoryDirectory::default();
        directory.insert(17, identity("uuid-17", "vevo@pelda.hu", Some(true)));

        let found = directory.get_user_by_woo_id(17).await.unwrap();
        assert_eq!(found.id.as_deref(), Some("uuid-17"));
        assert!(found.is_vip());
    }

    #[tokio::test]
    async fn in_memory_directory_returns_not_found_for_unknown_id() {
        let directory = InMemoryDirectory::default();
        let missing = directory.get_user_by_woo_id(99).await.unwrap();
        assert_eq!(missing, CustomerIdentity::not_found());
    }
}
