use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write metric report: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown scheduler type: {0}")]
    UnknownSchedulerType(String),

    #[error("Tick {tick} is outside the simulation range (tick count: {tick_count})")]
    OutOfRangeNavigation { tick: i64, tick_count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
