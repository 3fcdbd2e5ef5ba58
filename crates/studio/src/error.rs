//! Errors raised at the studio's outer surfaces.

use std::fmt;

/// Failure of a command, export, or persistence call
#[derive(Debug, Clone, PartialEq)]
pub enum StudioError {
    /// Malformed model, export or command JSON
    Parse(String),
    /// No mass with this ID
    UnknownMass(String),
    /// Material ID not in the catalog
    UnknownMaterial(String),
    /// No snapshot with this key
    UnknownSnapshot(u64),
    /// Grid module must be a positive, finite length
    InvalidGridModule(f64),
    /// Heights must be positive and finite
    InvalidHeight(f64),
    /// Reading or writing a file failed
    Io(String),
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::Parse(msg) => write!(f, "JSON parse error: {msg}"),
            StudioError::UnknownMass(id) => write!(f, "Unknown mass: {id}"),
            StudioError::UnknownMaterial(id) => write!(f, "Unknown material: {id}"),
            StudioError::UnknownSnapshot(key) => write!(f, "Unknown snapshot: {key}"),
            StudioError::InvalidGridModule(v) => write!(f, "Invalid grid module: {v}"),
            StudioError::InvalidHeight(v) => write!(f, "Invalid height: {v}"),
            StudioError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StudioError {}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for StudioError {
    fn from(e: std::io::Error) -> Self {
        StudioError::Io(e.to_string())
    }
}
