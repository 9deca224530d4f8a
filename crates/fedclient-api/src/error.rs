use thiserror::Error;

/// Failures talking to the backend. Every variant degrades to an empty
/// state in the UI; none is fatal.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {code}")]
    Status { code: u16 },

    #[error("response read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("response exceeded {limit} bytes")]
    TooLarge { limit: usize },

    #[error("response decode error: {0}")]
    Decode(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status { code },
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

impl From<fedclient_protocol::ProtocolError> for ApiError {
    fn from(err: fedclient_protocol::ProtocolError) -> Self {
        Self::Decode(err.to_string())
    }
}
