use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocvizError>;

#[derive(Error, Debug)]
pub enum LocvizError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date in record {record}: {value}")]
    InvalidDate { record: u64, value: String },
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
