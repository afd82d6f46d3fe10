//! Errors raised while reading or checking `imagebuilder.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {0} does not exist (run `imagebuilder config init` to create one)")]
    NotFound(PathBuf),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A value parsed but cannot drive a build, e.g. a `base_url` without a host.
    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = ConfigError::Parse {
            path: PathBuf::from("hub.toml"),
            message: "expected `]`".to_string(),
        };
        assert_eq!(err.to_string(), "invalid TOML in hub.toml: expected `]`");

        let err = ConfigError::NotFound(PathBuf::from("missing.toml"));
        assert!(err.to_string().contains("imagebuilder config init"));
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/imagebuilder.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("cannot read config file /etc/imagebuilder.toml"));
        assert!(err.source().is_some());
    }
}
