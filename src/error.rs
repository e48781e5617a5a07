//! Errors that abort a grammar build

use crate::formats::FormatError;
use crate::grammar::UnsupportedKeywordError;
use crate::keywords::MalformedTableError;
use std::fmt;
use std::path::PathBuf;

/// Every failure that can stop a build. None of them are retried.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Source workbook or keyword artifact is missing
    InputNotFound(PathBuf),
    MalformedTable(MalformedTableError),
    UnsupportedKeyword(UnsupportedKeywordError),
    /// The workbook exists but could not be read
    Workbook(String),
    Io(String),
    Serialization(String),
    Config(String),
    Format(FormatError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InputNotFound(path) => {
                write!(f, "Input not found: {}", path.display())
            }
            BuildError::MalformedTable(e) => write!(f, "Malformed keyword table: {}", e),
            BuildError::UnsupportedKeyword(e) => write!(f, "Unsupported keyword: {}", e),
            BuildError::Workbook(msg) => write!(f, "Workbook error: {}", msg),
            BuildError::Io(msg) => write!(f, "IO error: {}", msg),
            BuildError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            BuildError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BuildError::Format(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<MalformedTableError> for BuildError {
    fn from(e: MalformedTableError) -> Self {
        BuildError::MalformedTable(e)
    }
}

impl From<UnsupportedKeywordError> for BuildError {
    fn from(e: UnsupportedKeywordError) -> Self {
        BuildError::UnsupportedKeyword(e)
    }
}

impl From<FormatError> for BuildError {
    fn from(e: FormatError) -> Self {
        BuildError::Format(e)
    }
}

impl From<config::ConfigError> for BuildError {
    fn from(e: config::ConfigError) -> Self {
        BuildError::Config(e.to_string())
    }
}
