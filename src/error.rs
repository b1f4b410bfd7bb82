use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP server error: {0}")]
    Http(#[from] hyper::Error),

    #[error("Invalid listen address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {message}")]
    Storage { message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
