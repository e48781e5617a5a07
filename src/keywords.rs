//! Keyword tables: module → command → sub-keywords
//!
//! The table is built once from the keyword workbook (one sheet per module) and
//! treated as read-only afterwards. It can be persisted to and reloaded from the
//! intermediate JSON artifact via [`store`].

pub mod store;
pub mod table;
pub mod workbook;

pub use table::{build_table, Cell, KeywordTable, MalformedTableError, Module, Row};
