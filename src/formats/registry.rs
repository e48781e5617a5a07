//! Grammar notations by name
//!
//! `output.format` names one of the registered [`Formatter`]s. An unknown name
//! fails the build before anything is written and reports the known names.

use crate::grammar::GrammarDocument;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No notation registered under the requested name
    FormatNotFound {
        name: String,
        available: Vec<String>,
    },
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound { name, available } => write!(
                f,
                "Format '{}' not found (available: {})",
                name,
                available.join(", ")
            ),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders a grammar document in one notation.
pub trait Formatter: Send + Sync {
    /// Name used by `output.format` and `--format`
    fn name(&self) -> &str;

    fn serialize(&self, doc: &GrammarDocument) -> Result<String, FormatError>;
}

/// Notations available to a build, keyed by name.
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    fn empty() -> Self {
        FormatRegistry {
            formatters: BTreeMap::new(),
        }
    }

    /// Registry holding the CSON and TextMate JSON notations.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(super::CsonFormatter);
        registry.register(super::JsonFormatter);
        registry
    }

    /// Add a notation, replacing any registered under the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Render `doc` in the notation called `format`.
    pub fn serialize(&self, doc: &GrammarDocument, format: &str) -> Result<String, FormatError> {
        let formatter = self.get(format).ok_or_else(|| FormatError::FormatNotFound {
            name: format.to_string(),
            available: self.names(),
        })?;
        formatter.serialize(doc)
    }

    /// Registered names, sorted
    fn names(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }
}
