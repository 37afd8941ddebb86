use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Request never produced a response: connection refused, timeout, DNS failure.
    #[error("{message}")]
    Transport { message: String },

    /// Service answered with anything but `200 OK`.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
}

impl EmbeddingError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}
