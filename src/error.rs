//! Errors of the request client

use thiserror::Error;

/// Why a request did not produce usable data.
///
/// The `Display` implementation is the message shown to the user.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server could not be reached at all
    #[error("Cannot connect to server")]
    Unreachable { detail: String },

    /// The server answered something that is not JSON (typically an HTML error page or a login redirect)
    #[error("Received status={status}")]
    UnexpectedContentType { status: u16 },

    /// The server answered with an explicit error message
    #[error("{0}")]
    Server(String),

    /// The server answered JSON without an error message, but with an unexpected HTTP status
    #[error("Received status={status}")]
    UnexpectedStatus { status: u16 },

    /// The JSON body does not have the expected shape
    #[error("Received malformed data (status={status})")]
    Malformed {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RequestError {
    /// Whether the request never reached the server
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, RequestError::Unreachable { .. })
    }

    /// The HTTP status that came with this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::UnexpectedContentType { status } => Some(*status),
            RequestError::UnexpectedStatus { status } => Some(*status),
            RequestError::Malformed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
