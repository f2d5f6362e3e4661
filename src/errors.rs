use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in Tomodachi
///
/// None of these are fatal once the program is running: front ends report
/// them and carry on with the pet untouched.
#[derive(Error, Debug)]
pub enum TomodachiError {
    /// Error when a save file could not be read
    #[error("File access error for {path}: {message}")]
    FileAccess { path: PathBuf, message: Arc<String> },

    /// Error when a save file could not be written
    #[error("Failed to write file {path}: {message}")]
    FileWrite { path: PathBuf, message: Arc<String> },

    /// Error when a save file is not valid JSON or lacks a field
    #[error("Malformed save file {path}: {message}")]
    SnapshotParse { path: PathBuf, message: Arc<String> },

    /// Error when a save file parses but holds values a pet cannot have
    #[error("Invalid save data in field '{field}': {message}")]
    InvalidSnapshot { field: Arc<String>, message: Arc<String> },

    /// Error when the terminal loop receives a command it does not know
    #[error("Unknown command: {0}. Type 'help' for the list of commands.")]
    UnknownCommand(Arc<String>),

    /// Error when a command argument cannot be parsed
    #[error("Invalid argument for '{command}': {message}")]
    InvalidArgument {
        command: Arc<String>,
        message: Arc<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(Arc<String>),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(Arc<String>),
}

/// Type alias for Result with TomodachiError
pub type Result<T> = std::result::Result<T, TomodachiError>;

impl TomodachiError {
    pub fn file_access(path: &Path, err: &std::io::Error) -> Self {
        Self::FileAccess {
            path: path.to_path_buf(),
            message: Arc::new(err.to_string()),
        }
    }

    pub fn file_write(path: &Path, message: impl Into<String>) -> Self {
        Self::FileWrite {
            path: path.to_path_buf(),
            message: Arc::new(message.into()),
        }
    }

    pub fn invalid_snapshot(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            field: Arc::new(field.to_string()),
            message: Arc::new(message.into()),
        }
    }

    pub fn invalid_argument(command: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command: Arc::new(command.to_string()),
            message: Arc::new(message.into()),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(Arc::new(message.into()))
    }

    /// Suggest a fix for common file system errors
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::FileAccess { path, message } => {
                if message.contains("No such file or directory") || message.contains("not found") {
                    Some(format!(
                        "'{}' does not exist. Save your pet there first.",
                        path.display()
                    ))
                } else if message.contains("Permission denied") {
                    Some(format!("Permission denied for '{}'.", path.display()))
                } else if message.contains("Is a directory") {
                    Some(format!(
                        "'{}' is a directory, not a file. Specify a file path instead.",
                        path.display()
                    ))
                } else {
                    None
                }
            }
            Self::FileWrite { path, message } => {
                if message.contains("No space left on device") {
                    Some(format!(
                        "No space left on device while writing to '{}'.",
                        path.display()
                    ))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Clone for TomodachiError {
    fn clone(&self) -> Self {
        match self {
            Self::FileAccess { path, message } => Self::FileAccess {
                path: path.clone(),
                message: Arc::clone(message),
            },
            Self::FileWrite { path, message } => Self::FileWrite {
                path: path.clone(),
                message: Arc::clone(message),
            },
            Self::SnapshotParse { path, message } => Self::SnapshotParse {
                path: path.clone(),
                message: Arc::clone(message),
            },
            Self::InvalidSnapshot { field, message } => Self::InvalidSnapshot {
                field: Arc::clone(field),
                message: Arc::clone(message),
            },
            Self::UnknownCommand(cmd) => Self::UnknownCommand(Arc::clone(cmd)),
            Self::InvalidArgument { command, message } => Self::InvalidArgument {
                command: Arc::clone(command),
                message: Arc::clone(message),
            },
            Self::Configuration(msg) => Self::Configuration(Arc::clone(msg)),
            Self::Serialization(msg) => Self::Serialization(Arc::clone(msg)),
        }
    }
}
