//! Error types for the dombratab library

use std::io;

/// Library error type for dombratab operations
///
/// Every variant carries owned strings so errors can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DombraError {
    /// Audio clip above the upload limit, detected before any request
    #[error("audio clip too large: {size} bytes (max {max})")]
    ClipTooLarge { size: u64, max: u64 },

    /// Request could not be sent, timed out or the backend is down
    #[error("backend not reachable: {0}")]
    BackendUnreachable(String),

    /// Backend answered with a non-success HTTP status
    #[error("backend returned {status}: {body}")]
    BackendStatus { status: u16, body: String },

    /// Backend answered with a body that does not match the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl DombraError {
    /// Short message meant for the person using the application.
    pub fn user_message(&self) -> String {
        match self {
            Self::ClipTooLarge { .. } => "Keep it short (≤15 s).".to_string(),
            Self::BackendUnreachable(_) => {
                "Backend not reachable. Is the transcription service running?".to_string()
            }
            Self::BackendStatus { .. } | Self::MalformedResponse(_) => {
                format!("Backend returned an unexpected response: {self}")
            }
            Self::ConfigError(_) | Self::IoError(_) => self.to_string(),
        }
    }
}

impl From<io::Error> for DombraError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for DombraError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedResponse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_for_oversized_clip() {
        let err = DombraError::ClipTooLarge {
            size: 2_000_001,
            max: 2_000_000,
        };
        assert_eq!(err.user_message(), "Keep it short (≤15 s).");
        assert_eq!(
            err.to_string(),
            "audio clip too large: 2000001 bytes (max 2000000)"
        );
    }

    #[test]
    fn user_message_hides_transport_details() {
        let err = DombraError::BackendUnreachable("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "Backend not reachable. Is the transcription service running?"
        );
    }

    #[test]
    fn user_message_keeps_status_details() {
        let err = DombraError::BackendStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Backend returned an unexpected response: backend returned 500: boom"
        );
    }
}
