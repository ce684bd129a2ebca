pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{ApiResponse, WooApi};
pub use client::WooCommerceClient;
pub use error::ClientError;
