pub mod address;
pub mod error;
pub mod methods;
pub mod money;
pub mod normalize;
pub mod schedule;
pub mod status;
pub mod types;

pub use address::parse_address;
pub use error::ConvertError;
pub use normalize::convert;
pub use status::{map_order_status, map_payment_status};
pub use types::{LineItemKind, MetaValue, WooAddress, WooLineItem, WooOrder, WooOrderStatus};
