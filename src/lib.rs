//! # sofistik-grammar
//!
//! Generates the SOFiSTiK syntax-highlighting grammar from the keyword
//! workbook.
//!
//! The workbook holds one sheet per module; each row starts a command in its
//! leading column and lists the command's sub-keywords after it. The build:
//!
//! 1. reads the workbook into a [`keywords::KeywordTable`];
//! 2. saves the table as JSON for other tooling ([`keywords::store`]);
//! 3. generates module regions and per-command scoped rules
//!    ([`grammar::rules`]) from optimized keyword alternations ([`patterns`]);
//! 4. assembles them with the generic lexical rules ([`grammar::assembler`]);
//! 5. renders the grammar ([`formats`]) and writes it ([`pipeline`]).

pub mod artifact;
pub mod config;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod keywords;
pub mod patterns;
pub mod pipeline;

pub use error::BuildError;
pub use pipeline::{BuildSummary, GrammarBuild};
