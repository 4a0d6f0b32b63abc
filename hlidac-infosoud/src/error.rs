use hlidac_http::HttpError;
use thiserror::Error;

/// Failures raised while reading a case out of the InfoSoud registry.
#[derive(Debug, Error)]
pub enum InfosoudError {
    /// The registry itself says the case reference does not exist.
    #[error("case reference {reference} does not exist")]
    CaseNotFound { reference: String },

    /// A region of the fixed page layout is missing or has the wrong shape.
    #[error("malformed page: {0}")]
    MalformedPage(String),

    #[error("invalid date {value:?}, expected format {format}")]
    InvalidDate { value: String, format: &'static str },

    /// The case history breaks an assumption about the registry's own data,
    /// e.g. two initiation events.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("failed to read page: {0}")]
    Io(#[from] std::io::Error),
}

impl InfosoudError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        InfosoudError::MalformedPage(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, InfosoudError>;
