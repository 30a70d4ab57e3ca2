use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Structural failure while turning one CSV line into a record.
///
/// These never abort a parse; the orchestrator converts them into a single
/// row-level error on an otherwise empty record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("column '{column}' is {len} bytes, exceeding the {limit}-byte cell limit")]
    CellTooLarge {
        column: String,
        len: usize,
        limit: usize,
    },
}
