pub mod client;
pub mod error;

pub use client::SupabaseDirectory;
pub use error::SupabaseError;
