// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use pickban_types::Team;

/// Errors raised while turning an [`Action`](pickban_types::Action) into a wire event.
///
/// These point at a normalization defect upstream, so callers surface them
/// instead of retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Cannot translate an action with state `none`")]
    NoAction,

    #[error("Action {team:?}#{num} has no display name")]
    MissingDisplayName { team: Team, num: u32 },

    #[error("Action {team:?}#{num} has no champion")]
    MissingChampion { team: Team, num: u32 },
}

/// Errors that can occur when loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Permission denied reading config: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed TOML in config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors that can occur when loading champion metadata
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Champion data not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error reading champion data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed champion data: {message}")]
    MalformedJson { message: String },
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors from the summoner identity cache
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummonerError {
    #[error("Champ select session has no cells to cache")]
    EmptySession,

    #[error("Summoner cache lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_error_display() {
        let err = TranslationError::MissingChampion {
            team: Team::Red,
            num: 3,
        };
        assert!(err.to_string().contains("Red#3"));
        assert!(err.to_string().contains("no champion"));
    }

    #[test]
    fn test_config_error_io_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::io("/etc/pickban.toml", io_err);
        assert!(matches!(err, ConfigError::PermissionDenied { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
        let err = ConfigError::io("/etc/pickban.toml", io_err);
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_catalog_error_io_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = CatalogError::io("/data/champion.json", io_err);
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert!(err.to_string().contains("/data/champion.json"));
    }
}
