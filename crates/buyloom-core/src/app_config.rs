use std::path::PathBuf;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Default `tracing` filter, used when `RUST_LOG` is not set.
    pub log_level: String,
    /// JSON file holding the product catalog.
    pub catalog_path: PathBuf,
    /// Largest CSV file accepted for import, in bytes.
    pub import_max_bytes: u64,
}
