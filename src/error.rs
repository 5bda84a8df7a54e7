use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Malformed timing line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Timestamp out of range on line {line}: {timestamp} shifted past the day boundary")]
    TimestampOutOfRange { line: usize, timestamp: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShiftError>;
