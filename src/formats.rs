//! Output notations for grammar documents
//!
//! - `cson`: the indentation-based notation read by the editor package
//! - `json`: TextMate JSON, as read by VS Code style hosts

pub mod cson;
pub mod json;
pub mod registry;

pub use cson::CsonFormatter;
pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
