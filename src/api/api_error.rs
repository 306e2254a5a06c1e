use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Config(String),
    Network(String),
    RateLimited,
    Http(u16, String),
    JsonParse(String),
    MissingField(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "Config error: {msg}"),
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::RateLimited => write!(f, "Rate limited (HTTP 429)"),
            ApiError::Http(status, msg) => write!(f, "HTTP {status}: {msg}"),
            ApiError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ApiError::MissingField(field) => write!(f, "Missing required field: {field}"),
        }
    }
}

impl Error for ApiError {}
