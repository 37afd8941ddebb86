use embedding::EmbeddingError;
use thiserror::Error;

use crate::probe::ProbePhase;

/// Reason a probe run stopped. The `Display` text is the diagnostic printed to the console.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Cannot connect to service: {0}")]
    ServiceUnreachable(#[source] EmbeddingError),

    #[error("Service returned status code: {0}")]
    ServiceStatus(u16),

    #[error("Test {test}: Request failed: {source}")]
    GenerationRequest {
        test: usize,
        #[source]
        source: EmbeddingError,
    },

    #[error("Test {test}: Failed with status {status}\n   Response: {body}")]
    GenerationStatus {
        test: usize,
        status: u16,
        body: String,
    },

    #[error("Load balancing test {request} failed: {source}")]
    LoadRequest {
        request: usize,
        #[source]
        source: EmbeddingError,
    },

    #[error("Load balancing test {request} failed with status {status}")]
    LoadStatus { request: usize, status: u16 },

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl ProbeError {
    pub(crate) fn liveness(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Status { status, .. } => Self::ServiceStatus(status),
            err => Self::ServiceUnreachable(err),
        }
    }

    pub(crate) fn generation(test: usize, err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Status { status, body } => Self::GenerationStatus { test, status, body },
            source => Self::GenerationRequest { test, source },
        }
    }

    pub(crate) fn load(request: usize, err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Status { status, .. } => Self::LoadStatus { request, status },
            source => Self::LoadRequest { request, source },
        }
    }

    /// Phase the run was in when it failed. `None` when only writing the report failed.
    pub fn phase(&self) -> Option<ProbePhase> {
        match self {
            Self::ServiceUnreachable(_) | Self::ServiceStatus(_) => Some(ProbePhase::Liveness),
            Self::GenerationRequest { .. } | Self::GenerationStatus { .. } => {
                Some(ProbePhase::Generation)
            }
            Self::LoadRequest { .. } | Self::LoadStatus { .. } => Some(ProbePhase::Load),
            Self::Output(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
