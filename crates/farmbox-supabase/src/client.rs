//! Customer directory backed by a Supabase `PostgREST` RPC.
//!
//! Calls the `get_user_by_woo_id` database function, which maps a legacy
//! WooCommerce customer id to the migrated auth user.

use std::time::Duration;

use farmbox_core::{CustomerDirectory, CustomerIdentity, DirectoryError};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::error::SupabaseError;

const RPC_PATH: &str = "rest/v1/rpc/get_user_by_woo_id";

#[derive(Debug, Serialize)]
struct LookupRequest {
    woo_id: i64,
}

/// Resolves legacy customers through the Supabase REST API.
pub struct SupabaseDirectory {
    client: Client,
    service_role_key: String,
    rpc_url: Url,
}

impl SupabaseDirectory {
    /// Creates a directory for the Supabase project at `project_url`.
    ///
    /// Tests point `project_url` at a wiremock server.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SupabaseError::InvalidBaseUrl`] if
    /// `project_url` is not a valid URL.
    pub fn new(
        project_url: &str,
        service_role_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("farmbox/0.1 (order-migration)")
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", project_url.trim_end_matches('/'));
        let rpc_url = Url::parse(&normalised)
            .and_then(|base| base.join(RPC_PATH))
            .map_err(|e| SupabaseError::InvalidBaseUrl {
                url: project_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            service_role_key: service_role_key.to_owned(),
            rpc_url,
        })
    }

    /// Full URL of the lookup RPC.
    #[must_use]
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    async fn lookup(&self, woo_customer_id: i64) -> Result<CustomerIdentity, DirectoryError> {
        let response = self
            .client
            .post(self.rpc_url.clone())
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&LookupRequest {
                woo_id: woo_customer_id,
            })
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(Box::new(e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(woo_customer_id, "lookup RPC answered 404");
            return Ok(CustomerIdentity::not_found());
        }
        if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectoryError::Unavailable(format!(
                "{} answered {status}",
                self.rpc_url
            )));
        }
        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.rpc_url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::Transport(Box::new(e)))?;
        parse_identity(&body, woo_customer_id)
    }
}

/// Decodes the RPC body. `null` and `[]` mean no account; a set-returning
/// function yields an array whose first row is used.
fn parse_identity(body: &str, woo_customer_id: i64) -> Result<CustomerIdentity, DirectoryError> {
    let context = || format!("get_user_by_woo_id(woo_id={woo_customer_id})");
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|source| DirectoryError::Deserialize {
            context: context(),
            source,
        })?;

    let row = match value {
        serde_json::Value::Null => return Ok(CustomerIdentity::not_found()),
        serde_json::Value::Array(rows) => match rows.into_iter().next() {
            Some(row) => row,
            None => return Ok(CustomerIdentity::not_found()),
        },
        other => other,
    };

    serde_json::from_value(row).map_err(|source| DirectoryError::Deserialize {
        context: context(),
        source,
    })
}

impl CustomerDirectory for SupabaseDirectory {
    async fn get_user_by_woo_id(
        &self,
        woo_customer_id: i64,
    ) -> Result<CustomerIdentity, DirectoryError> {
        if woo_customer_id <= 0 {
            return Ok(CustomerIdentity::not_found());
        }
        let identity = self.lookup(woo_customer_id).await?;
        if !identity.is_resolved() {
            tracing::debug!(woo_customer_id, "no account for legacy customer");
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_url_appends_to_project_root() {
        let directory = SupabaseDirectory::new("https://abcd.supabase.co", "key", 30).unwrap();
        assert_eq!(
            directory.rpc_url().as_str(),
            "https://abcd.supabase.co/rest/v1/rpc/get_user_by_woo_id"
        );
    }

    #[test]
    fn rpc_url_keeps_base_path() {
        let directory =
            SupabaseDirectory::new("http://localhost:54321/proxy/", "key", 30).unwrap();
        assert_eq!(
            directory.rpc_url().as_str(),
            "http://localhost:54321/proxy/rest/v1/rpc/get_user_by_woo_id"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SupabaseDirectory::new("not a url", "key", 30);
        assert!(matches!(result, Err(SupabaseError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn parse_identity_object() {
        let identity = parse_identity(
            r#"{"id":"u-1","email":"a@b.hu","user_metadata":{"is_vip":true}}"#,
            7,
        )
        .unwrap();
        assert_eq!(identity.id.as_deref(), Some("u-1"));
        assert!(identity.is_vip());
    }

    #[test]
    fn parse_identity_empty_answers() {
        for body in ["null", "[]"] {
            assert_eq!(parse_identity(body, 7).unwrap(), CustomerIdentity::not_found());
        }
    }

    #[test]
    fn parse_identity_first_row_of_array() {
        let identity = parse_identity(r#"[{"id":"u-1"},{"id":"u-2"}]"#, 7).unwrap();
        assert_eq!(identity.id.as_deref(), Some("u-1"));
    }

    #[test]
    fn parse_identity_rejects_garbage() {
        let err = parse_identity("<html>", 7).unwrap_err();
        assert!(matches!(err, DirectoryError::Deserialize { .. }));

        let err = parse_identity(r#""u-1""#, 7).unwrap_err();
        assert!(matches!(err, DirectoryError::Deserialize { .. }));
    }
}
