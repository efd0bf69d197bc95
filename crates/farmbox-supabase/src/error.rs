use thiserror::Error;

/// Errors from constructing a [`crate::SupabaseDirectory`].
///
/// Failures during a lookup are reported as
/// [`farmbox_core::DirectoryError`] instead.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid Supabase base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
