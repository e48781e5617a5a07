//! Scoped rule generation
//!
//! Every module gets a region opened by its module statement (`PROG AQUA`) and
//! closed, zero-width, at the next module statement. Inside that region every
//! command gets one rule:
//!
//! - a command without sub-keywords is a plain match on the command token;
//! - a command with sub-keywords opens a nested region at the command token
//!   that ends, zero-width, at the first of: another command of the module at
//!   line start, a `;` separator, or a module statement. Its sub-keywords are
//!   only tagged inside that region.
//!
//! The matching itself happens in the host editor; these rules only encode the
//! boundaries.
//!
//! Keyword text is embedded without regex escaping. Text that cannot be part
//! of a valid alternation, or that contains control characters, is rejected
//! with [`UnsupportedKeywordError`]. Other metacharacters pass through.

use super::lexical::NORMAL_TEXT;
use super::model::{Capture, MatchRule, RegionRule, Rule};
use super::scope;
use crate::keywords::{KeywordTable, Module};
use crate::patterns;
use std::fmt;

/// Module whose commands are not scoped: they join the generic rule set.
pub const BASE_MODULE: &str = "BASIC";

/// Repository rule placed before the command rules of every module, so that
/// `#DEFINE` lines are never read as commands.
const LEADING_RULE: &str = "defA";

pub fn is_base_module(name: &str) -> bool {
    name == BASE_MODULE
}

/// Modules that receive region rules, in table order.
pub fn scoped_modules(table: &KeywordTable) -> impl Iterator<Item = (&str, &Module)> {
    table.modules().filter(|(name, _)| !is_base_module(name))
}

/// Keyword or command text that cannot be embedded in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedKeywordError {
    pub module: String,
    pub keyword: String,
    pub reason: String,
}

impl fmt::Display for UnsupportedKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' in module '{}' {}",
            self.keyword.escape_debug(),
            self.module,
            self.reason
        )
    }
}

impl std::error::Error for UnsupportedKeywordError {}

/// Reject text that would corrupt the pattern it is embedded in.
pub fn check_keyword(module: &str, keyword: &str) -> Result<(), UnsupportedKeywordError> {
    let unsupported = |reason: String| UnsupportedKeywordError {
        module: module.to_string(),
        keyword: keyword.to_string(),
        reason,
    };

    if let Some(c) = keyword.chars().find(|c| c.is_control()) {
        return Err(unsupported(format!("contains control character {:?}", c)));
    }
    // `A)|(B` compiles once wrapped but would split the enclosing group.
    for pattern in [keyword.to_string(), format!("(?:{})", keyword)] {
        fancy_regex::Regex::new(&pattern)
            .map_err(|e| unsupported(format!("is not a valid pattern alternative: {}", e)))?;
    }
    Ok(())
}

/// Highlighting rule for one command of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedCommandRule {
    pub command: String,
    /// Recognizes the command token
    pub activation: String,
    /// Ends the command context; `None` when the command has no sub-keywords
    pub deactivation: Option<String>,
    /// Whole-token sub-keyword match applied inside the context
    pub sub_pattern: Option<String>,
}

impl ScopedCommandRule {
    /// `module_commands` is the optimized alternation of every command of the
    /// module, used for the deactivation boundary.
    pub fn new(command: &str, sub_keywords: &[String], module_commands: &str) -> Self {
        let activation = patterns::command_token(command);
        let alternation = patterns::optimize(sub_keywords);

        if alternation.is_empty() {
            return Self {
                command: command.to_string(),
                activation,
                deactivation: None,
                sub_pattern: None,
            };
        }

        Self {
            command: command.to_string(),
            activation,
            deactivation: Some(patterns::command_end(module_commands)),
            sub_pattern: Some(patterns::whole_token(&alternation)),
        }
    }

    /// Whether the rule opens a nested region
    pub fn is_region(&self) -> bool {
        self.deactivation.is_some()
    }

    pub fn to_rule(&self) -> Rule {
        let command_scope = Capture::named(scope("keyword.control"));

        match (&self.deactivation, &self.sub_pattern) {
            (Some(end), Some(sub_pattern)) => {
                let sub_keywords = MatchRule::new(sub_pattern.as_str())
                    .named(scope("entity.name.function"))
                    .into();

                RegionRule::new(self.activation.as_str(), end.as_str())
                    .begin_capture(1, command_scope)
                    .named(scope("meta.command"))
                    .with_patterns(vec![sub_keywords, Rule::reference(NORMAL_TEXT)])
                    .into()
            }
            _ => MatchRule::new(self.activation.as_str())
                .capture(1, command_scope)
                .into(),
        }
    }
}

/// All rules generated for one module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRules {
    pub module: String,
    pub region: RegionRule,
    pub commands: Vec<ScopedCommandRule>,
}

impl ModuleRules {
    pub fn generate(name: &str, module: &Module) -> Result<Self, UnsupportedKeywordError> {
        check_keyword(name, name)?;
        for (command, sub_keywords) in module {
            check_keyword(name, command)?;
            for keyword in sub_keywords {
                check_keyword(name, keyword)?;
            }
        }

        let command_names: Vec<&str> = module.keys().map(String::as_str).collect();
        let module_commands = patterns::optimize(&command_names);

        let commands = module
            .iter()
            .map(|(command, sub_keywords)| {
                ScopedCommandRule::new(command, sub_keywords, &module_commands)
            })
            .collect();

        Ok(Self {
            module: name.to_string(),
            region: module_region(name),
            commands,
        })
    }

    /// Repository entry holding the module's command rules.
    pub fn repository_entry(&self) -> Rule {
        let mut patterns = Vec::with_capacity(self.commands.len() + 2);
        patterns.push(Rule::reference(LEADING_RULE));
        patterns.extend(self.commands.iter().map(ScopedCommandRule::to_rule));
        patterns.push(Rule::reference(NORMAL_TEXT));
        Rule::group(patterns)
    }

    pub fn region_rule(&self) -> Rule {
        Rule::Region(self.region.clone())
    }
}

/// Region of one module: from its module statement up to the next one.
pub fn module_region(name: &str) -> RegionRule {
    let lower = name.to_lowercase();
    let class = scope(&format!("support.class.{}", lower));

    RegionRule::new(patterns::module_statement(name), patterns::next_module())
        .begin_capture(1, Capture::named(class.clone()))
        .begin_capture(2, Capture::named(class))
        .begin_capture(
            3,
            Capture::named(scope(&format!("comment.line.{}", lower)))
                .with_patterns(vec![Rule::include("text.todo")]),
        )
        .named(scope(&format!("module.{}", lower)))
        .with_patterns(vec![Rule::reference(name)])
}

/// Rules for every module except the base module.
pub fn generate_modules(table: &KeywordTable) -> Result<Vec<ModuleRules>, UnsupportedKeywordError> {
    scoped_modules(table)
        .map(|(name, module)| {
            ModuleRules::generate(name, module).inspect(|rules| {
                tracing::debug!(
                    module = name,
                    commands = rules.commands.len(),
                    regions = rules.commands.iter().filter(|c| c.is_region()).count(),
                    "generated module rules"
                );
            })
        })
        .collect()
}

/// Single rule tagging the base module's commands wherever generic text is
/// highlighted. `None` when the table has no (or an empty) base module.
pub fn base_command_rule(table: &KeywordTable) -> Result<Option<Rule>, UnsupportedKeywordError> {
    let Some(module) = table.module(BASE_MODULE) else {
        return Ok(None);
    };
    for command in module.keys() {
        check_keyword(BASE_MODULE, command)?;
    }

    let commands: Vec<&str> = module.keys().map(String::as_str).collect();
    let alternation = patterns::optimize(&commands);
    if alternation.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        MatchRule::new(patterns::command_token(&alternation))
            .capture(1, Capture::named(scope("keyword.control")))
            .into(),
    ))
}
