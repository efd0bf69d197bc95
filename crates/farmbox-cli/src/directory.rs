//! Customer directory selection for CLI runs.

use std::path::Path;

use farmbox_core::{
    AppConfig, CustomerDirectory, CustomerIdentity, DirectoryError, InMemoryDirectory,
};
use farmbox_supabase::SupabaseDirectory;
use serde::Deserialize;

/// The directory backend chosen for a run.
pub(crate) enum Directory {
    Offline(InMemoryDirectory),
    Supabase(SupabaseDirectory),
}

impl CustomerDirectory for Directory {
    async fn get_user_by_woo_id(
        &self,
        woo_customer_id: i64,
    ) -> Result<CustomerIdentity, DirectoryError> {
        match self {
            Self::Offline(directory) => directory.get_user_by_woo_id(woo_customer_id).await,
            Self::Supabase(directory) => directory.get_user_by_woo_id(woo_customer_id).await,
        }
    }
}

/// One row of an offline customer file.
#[derive(Debug, Deserialize)]
struct CustomerRecord {
    woo_id: i64,
    #[serde(flatten)]
    identity: CustomerIdentity,
}

/// Parses an offline customer file: a JSON array of
/// `{"woo_id": 42, "id": "...", "email": "...", "user_metadata": {...}}`.
pub(crate) fn parse_customers(raw: &str) -> anyhow::Result<InMemoryDirectory> {
    let records: Vec<CustomerRecord> = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("invalid customer file: {e}"))?;
    let mut directory = InMemoryDirectory::default();
    for record in records {
        directory.insert(record.woo_id, record.identity);
    }
    Ok(directory)
}

/// Uses the offline file when given, Supabase otherwise.
pub(crate) fn build_directory(
    config: &AppConfig,
    customers: Option<&Path>,
) -> anyhow::Result<Directory> {
    if let Some(path) = customers {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let directory = parse_customers(&raw)?;
        tracing::info!(
            customers = directory.len(),
            path = %path.display(),
            "loaded offline customer directory"
        );
        return Ok(Directory::Offline(directory));
    }

    let (url, key) = config
        .supabase_credentials()
        .map_err(|e| anyhow::anyhow!("{e} (or pass --customers for an offline run)"))?;
    let directory = SupabaseDirectory::new(url, key, config.lookup_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build Supabase directory: {e}"))?;
    Ok(Directory::Supabase(directory))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn customer_file_populates_directory() {
        let directory = parse_customers(
            r#"[
                {"woo_id": 12, "id": "user-12", "email": "a@b.hu", "user_metadata": {"is_vip": true}},
                {"woo_id": 13, "id": "user-13"}
            ]"#,
        )
        .unwrap();
        assert_eq!(directory.len(), 2);

        let identity = directory.get_user_by_woo_id(12).await.unwrap();
        assert_eq!(identity.id.as_deref(), Some("user-12"));
        assert!(identity.is_vip());

        let missing = directory.get_user_by_woo_id(99).await.unwrap();
        assert!(!missing.is_resolved());
    }

    #[test]
    fn customer_file_requires_woo_id() {
        assert!(parse_customers(r#"[{"id": "user-1"}]"#).is_err());
    }

    #[test]
    fn missing_service_key_is_named() {
        let config = AppConfig {
            env: farmbox_core::Environment::Test,
            log_level: "info".to_string(),
            supabase_url: Some("https://abc.supabase.co".to_string()),
            supabase_service_role_key: None,
            lookup_timeout_secs: 30,
            migration_concurrency: 4,
        };
        let err = build_directory(&config, None).err().unwrap().to_string();
        assert!(err.contains("SUPABASE_SERVICE_ROLE_KEY"));
        assert!(err.contains("--customers"));
    }

    #[tokio::test]
    async fn offline_variant_delegates() {
        let mut offline = InMemoryDirectory::default();
        offline.insert(
            4,
            CustomerIdentity {
                id: Some("user-4".to_string()),
                ..CustomerIdentity::default()
            },
        );
        let directory = Directory::Offline(offline);
        let identity = directory.get_user_by_woo_id(4).await.unwrap();
        assert_eq!(identity.id.as_deref(), Some("user-4"));
    }
}
