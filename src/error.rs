use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API Key not found")]
    MissingApiKey,

    #[error("{0}")]
    InvalidUrl(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Response blocked by provider: {0}")]
    Blocked(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
