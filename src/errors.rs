use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Value: {0}")]
    Value(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError::Value(e.to_string())
    }
}

/// Classification of a failed forecast fetch
///
/// Both variants are recovered by the forecast cache, they never terminate the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("FetchError::Unreachable: {0}")]
    Unreachable(String),
    #[error("FetchError::MalformedPayload: {0}")]
    MalformedPayload(String),
}
impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        FetchError::Unreachable(e.to_string())
    }
}
impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::MalformedPayload(e.to_string())
    }
}

#[derive(Error, Debug)]
#[error("error writing to display: {0}")]
pub struct DisplayError(#[from] pub std::io::Error);

#[derive(Error, Debug)]
#[error("error setting up logger: {0}")]
pub struct LoggingError(pub String);
impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self {
        LoggingError(e.to_string())
    }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self {
        LoggingError(e.to_string())
    }
}
impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self {
        LoggingError(e.to_string())
    }
}
