use thiserror::Error;

/// Errors returned by [`EventClient`](crate::EventClient)
///
/// `E` is the error type of the transport in use, `reqwest::Error` by default.
#[derive(Debug, Error)]
pub enum ClientError<E = reqwest::Error> {
    /// A required configuration value was empty
    #[error("invalid client configuration: {0} must not be empty")]
    Configuration(&'static str),

    /// The endpoint answered with a non-2XX status code
    #[error("Failed to send event(s): {status} {status_text} - {body}")]
    Delivery {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The events could not be serialized to JSON
    ///
    /// Reserved for the serializer boundary: events built from
    /// `serde_json::Value` fields always serialize, so `send` does not produce
    /// this today. Raised before the transport is called.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// The transport failed; the original error is kept as is
    #[error(transparent)]
    Transport(E),
}

impl<E> ClientError<E> {
    /// The transport error, if this failure came from the transport
    pub fn transport_error(&self) -> Option<&E> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }

    /// Unwrap the original transport error, handing `self` back otherwise
    pub fn into_transport_error(self) -> Result<E, Self> {
        match self {
            ClientError::Transport(e) => Ok(e),
            other => Err(other),
        }
    }

    /// HTTP status of a rejected delivery
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Delivery { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T, E = reqwest::Error> = Result<T, ClientError<E>>;
