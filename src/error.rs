use std::io;
use thiserror::Error;

/// Rejected layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("zoom widths must satisfy day > week > month > 0 (got day={day}, week={week}, month={month})")]
    ZoomOrder { day: u32, week: u32, month: u32 },

    #[error("{name} must not be negative (got {value})")]
    NegativePadding { name: &'static str, value: i64 },

    #[error("{name} must be at most {max} days (got {value})")]
    PaddingTooLarge {
        name: &'static str,
        value: i64,
        max: i64,
    },

    #[error("{name} must be at least 1")]
    ZeroOverflowLimit { name: &'static str },

    #[error("work calendar requires at least one working day")]
    NoWorkingDays,
}

/// Errors raised outside the pure layout core: loading snapshots and config files.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
