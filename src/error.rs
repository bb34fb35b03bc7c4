use thiserror::Error;

#[derive(Error, Debug)]
pub enum PotListError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source root not found: {path}")]
    RootNotFound { path: String },

    #[error("Source root is not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to traverse source tree at {path}")]
    Traversal {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to write manifest: {path}")]
    ManifestWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot determine project root: {message}")]
    ProjectRoot { message: String },
}

impl PotListError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PotListError::Config { .. } => 2,
            PotListError::RootNotFound { .. } | PotListError::NotADirectory { .. } => 3,
            PotListError::Traversal { .. } => 4,
            PotListError::ManifestWrite { .. } => 5,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PotListError {
    fn user_message(&self) -> String {
        match self {
            PotListError::RootNotFound { path } => {
                format!("Source root does not exist: {}", path)
            }
            PotListError::NotADirectory { path } => {
                format!("Source root is not a directory: {}", path)
            }
            PotListError::Traversal { path, source } => {
                format!("Failed to read {}: {}", path, source)
            }
            PotListError::ManifestWrite { path, source } => {
                format!("Failed to write manifest {}: {}", path, source)
            }
            PotListError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            PotListError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            PotListError::ProjectRoot { message } => {
                format!("Cannot determine project root: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PotListError::RootNotFound { .. } | PotListError::NotADirectory { .. } => Some(
                "Pass the project source directory explicitly with --root.".to_string()
            ),
            PotListError::ProjectRoot { .. } => Some(
                "Install the binary two levels below the project root (e.g. <root>/scripts/potlist) or pass --root.".to_string()
            ),
            PotListError::Traversal { .. } => Some(
                "Check that every directory under the project root is readable.".to_string()
            ),
            PotListError::ManifestWrite { .. } => Some(
                "Ensure the manifest's parent directory exists and is writable, or choose another location with --output.".to_string()
            ),
            PotListError::InvalidPath { .. } => Some(
                "Manifest entries must be valid UTF-8; rename the offending file or exclude it with an exclude pattern.".to_string()
            ),
            PotListError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PotListError {
    fn from(error: toml::de::Error) -> Self {
        PotListError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PotListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = PotListError::RootNotFound {
            path: "/nowhere".to_string(),
        };
        assert!(error.user_message().contains("/nowhere"));
        assert!(error.suggestion().unwrap().contains("--root"));
    }

    #[test]
    fn test_exit_codes() {
        let config = PotListError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 2);

        let missing = PotListError::NotADirectory {
            path: "file.txt".to_string(),
        };
        assert_eq!(missing.exit_code(), 3);

        let write = PotListError::ManifestWrite {
            path: "list.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(write.exit_code(), 5);

        let io = PotListError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let error = PotListError::from(toml_error);
        assert!(matches!(error, PotListError::Config { .. }));
    }

    #[test]
    fn test_write_error_keeps_source() {
        use std::error::Error as _;

        let error = PotListError::ManifestWrite {
            path: "out/list.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.source().is_some());
        assert!(error.user_message().contains("denied"));
    }
}
