pub mod config;
pub mod error;
pub mod products;

pub use config::{load_config, TargetConfig};
pub use error::{ConfigError, InputFileError};
pub use products::{load_products, products_file, ImageRecord, ProductRecord, VariantRecord};
