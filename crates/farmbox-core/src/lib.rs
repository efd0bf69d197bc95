pub mod app_config;
pub mod config;
pub mod customers;
pub mod orders;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use customers::{
    CustomerDirectory, CustomerIdentity, DirectoryError, InMemoryDirectory, UserMetadata,
};
pub use orders::{
    AddressType, CustomerSegments, InternalOrder, OrderAddress, OrderHistoryEntry, OrderItem,
    OrderStatus, ParseConfidence, ParsedAddress, PaymentMethod, PaymentMethodKind, PaymentStatus,
    ShippingMethod,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
