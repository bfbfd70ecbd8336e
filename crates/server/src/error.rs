// crates/server/src/error.rs
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use pickban_core::TranslationError;

/// Outbound websocket failures. Logged by the supervisor; recovery is the
/// reconnect that follows every close.
#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Invalid websocket url: {0}")]
    InvalidUrl(String),

    #[error("TCP connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TCP connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("WebSocket handshake timed out after {0:?}")]
    HandshakeTimeout(Duration),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced from one controller update.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Socket error: {0}")]
    Socket(#[from] SocketError),
}

/// Errors reading or writing recorded provider events
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Recording not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed event at line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Controller channel closed")]
    ChannelClosed,
}

impl ProviderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickban_types::Team;

    #[test]
    fn test_controller_error_from_translation() {
        let err: ControllerError = TranslationError::MissingDisplayName {
            team: Team::Blue,
            num: 1,
        }
        .into();
        assert!(matches!(err, ControllerError::Translation(_)));
        assert!(err.to_string().contains("display name"));
    }

    #[test]
    fn test_provider_error_io_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            ProviderError::io("/tmp/rec.jsonl", io_err),
            ProviderError::NotFound { .. }
        ));
    }
}
