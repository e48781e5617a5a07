//! Grammar generation
//!
//! The keyword table flows through three stages:
//!
//! 1. [`rules`] turns each module into a module region plus one scoped rule per
//!    command, using the alternations from [`crate::patterns`];
//! 2. [`lexical`] provides the generic rules every module falls through to;
//! 3. [`assembler`] stitches header, module regions and repository together.
//!
//! The resulting [`GrammarDocument`] is rendered by [`crate::formats`].

pub mod assembler;
pub mod lexical;
pub mod model;
pub mod rules;

pub use assembler::assemble;
pub use lexical::FixedRuleSet;
pub use model::{Capture, GrammarDocument, MatchRule, RegionRule, Rule};
pub use rules::{ModuleRules, ScopedCommandRule, UnsupportedKeywordError};

use crate::keywords::KeywordTable;

/// Language suffix appended to every scope name.
pub const SCOPE_SUFFIX: &str = "sofistik";

/// `keyword.control` → `keyword.control.sofistik`
pub fn scope(base: &str) -> String {
    format!("{}.{}", base, SCOPE_SUFFIX)
}

/// Generate the complete grammar for a keyword table.
pub fn generate(table: &KeywordTable) -> Result<GrammarDocument, UnsupportedKeywordError> {
    let modules = rules::generate_modules(table)?;
    let shared = FixedRuleSet::standard().with_base_commands(rules::base_command_rule(table)?);
    Ok(assemble(&modules, shared))
}
