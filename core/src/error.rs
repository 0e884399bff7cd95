use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No participation records found in source text")]
    NoRecords,

    #[error("Parsed {rows} rows but none produced a usable name")]
    EmptyBuild { rows: usize },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

pub type PoolResult<T> = Result<T, PoolError>;
