use std::fmt;
use thiserror::Error;

/// The error type for signing operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    parameter: Option<&'static str>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input is absent or empty
    MissingParameter,

    /// A query pair does not decompose into exactly one key and one value
    InvalidQueryString,

    /// The `Date` header can't be parsed as a timestamp
    InvalidDate,

    /// A header value is not valid text
    InvalidHeaderValue,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            parameter: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Name of the missing parameter, if this is a [`ErrorKind::MissingParameter`] error.
    pub fn parameter(&self) -> Option<&'static str> {
        self.parameter
    }
}

// Convenience constructors
impl Error {
    /// Create a missing parameter error for the named field
    pub fn missing_parameter(name: &'static str) -> Self {
        let mut err = Self::new(ErrorKind::MissingParameter, format!("missing {name}"));
        err.parameter = Some(name);
        err
    }

    /// Create an invalid query string error
    pub fn invalid_query_string(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidQueryString, message)
    }

    /// Create an invalid date error
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDate, message)
    }

    /// Create an invalid header value error
    pub fn invalid_header_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidHeaderValue, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingParameter => write!(f, "missing parameter"),
            ErrorKind::InvalidQueryString => write!(f, "invalid query string"),
            ErrorKind::InvalidDate => write!(f, "invalid date"),
            ErrorKind::InvalidHeaderValue => write!(f, "invalid header value"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_header_value(err.to_string()).with_source(err)
    }
}
