pub mod config;
pub mod config_loader;
pub mod error;

pub use config::{AnalysisConfig, AppConfig, DatabaseConfig, GeneratorConfig};
pub use config_loader::ConfigLoader;
pub use error::StoreError;
