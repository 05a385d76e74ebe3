use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("No exception category for status code {0}")]
    UnmappedStatus(u16),

    #[error("Unknown exception category: {0}")]
    UnknownCategory(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: String, value: String },
}

impl FilterError {
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }
}
