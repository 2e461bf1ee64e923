// src/domain/errors.rs
use thiserror::Error;

pub type SlugResult<T> = Result<T, SlugError>;

#[derive(Debug, Error)]
pub enum SlugError {
    #[error("\"{0}\" is not a valid slugify strategy")]
    InvalidStrategy(String),
    #[error("\"{0}\" database is not supported for the dbIncrement strategy")]
    UnsupportedDialect(String),
    #[error("invalid slugify configuration: {0}")]
    Config(String),
    #[error("model \"{model}\" has no column definition for \"{field}\"")]
    UnknownField { model: String, field: String },
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl SlugError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Stable identifier callers can match on without parsing the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidStrategy(_) => "E_INVALID_SLUGIFY_STRATEGY",
            Self::UnsupportedDialect(_) => "E_UNSUPPORTED_DBINCREMENT_DIALECT",
            Self::Config(_) => "E_INVALID_SLUGIFY_CONFIG",
            Self::UnknownField { .. } => "E_UNKNOWN_SLUGIFY_FIELD",
            Self::Persistence(_) => "E_SLUGIFY_PERSISTENCE",
        }
    }

    /// Every slugify failure is a server-side fault.
    pub fn status(&self) -> u16 {
        500
    }
}
