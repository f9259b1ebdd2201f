use thiserror::Error;

#[derive(Error, Debug)]
pub enum WastecastError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("refusing to overwrite existing file: {0}")]
    OutputExists(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, WastecastError>;
