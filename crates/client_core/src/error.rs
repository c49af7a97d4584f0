use shared::domain::StudentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure on {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("malformed response envelope from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("student {0} not found")]
    NotFound(StudentId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Transport,
    Status,
    Decode,
    NotFound,
}

impl FailureCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureCategory::Transport => "transport",
            FailureCategory::Status => "status",
            FailureCategory::Decode => "decode",
            FailureCategory::NotFound => "not_found",
        }
    }
}

impl ClientError {
    pub fn category(&self) -> FailureCategory {
        match self {
            ClientError::Transport { .. } => FailureCategory::Transport,
            ClientError::Status { .. } => FailureCategory::Status,
            ClientError::Decode { .. } => FailureCategory::Decode,
            ClientError::NotFound(_) => FailureCategory::NotFound,
        }
    }

    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
