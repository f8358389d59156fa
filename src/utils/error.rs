use thiserror::Error;

/// Main error type for kc
#[derive(Debug, Error)]
pub enum KcError {
    #[error("IP lookup error: {0}")]
    Ip(#[from] IpError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving or copying the public address
#[derive(Debug, Error)]
pub enum IpError {
    #[error("Request to trace endpoint failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Clipboard(String),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type alias for kc operations
pub type KcResult<T> = Result<T, KcError>;
