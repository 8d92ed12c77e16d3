use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("server url '{url}' uses cleartext transport but server.cleartext is false")]
    InsecureTransportConflict { url: String },

    #[error("schema validation failed: {0}")]
    Schema(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),
}

impl ConfigurationError {
    /// Stable machine-readable code, used by JSON output envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidField { .. } => "invalid_field",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InsecureTransportConflict { .. } => "insecure_transport_conflict",
            Self::Schema(_) => "schema_violation",
            Self::Parse(_) => "parse_error",
            Self::Io(_) => "io_error",
        }
    }
}
