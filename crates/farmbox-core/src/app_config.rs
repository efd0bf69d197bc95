use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the order migration tooling.
///
/// The Supabase pair is optional: offline migrations resolve customers from a
/// local file and never talk to the backend.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub lookup_timeout_secs: u64,
    pub migration_concurrency: usize,
}

impl AppConfig {
    /// Returns the Supabase URL and service key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first of the pair
    /// that is unset.
    pub fn supabase_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .supabase_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?;
        let key = self
            .supabase_service_role_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_SERVICE_ROLE_KEY".to_string()))?;
        Ok((url, key))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_service_role_key",
                &self.supabase_service_role_key.as_ref().map(|_| "[redacted]"),
            )
            .field("lookup_timeout_secs", &self.lookup_timeout_secs)
            .field("migration_concurrency", &self.migration_concurrency)
            .finish()
    }
}
