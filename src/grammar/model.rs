//! Grammar document model
//!
//! Mirrors the TextMate grammar structure: match rules, begin/end region rules,
//! includes and pattern groups, plus a named repository of reusable rules. The
//! serde representation is the TextMate JSON layout.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Capture group number → scope assignment.
pub type Captures = BTreeMap<u32, Capture>;

/// A complete grammar: header metadata, top-level patterns and repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarDocument {
    pub scope_name: String,
    pub name: String,
    pub file_types: Vec<String>,
    /// Links emitted as a comment block by notations that support comments
    #[serde(skip)]
    pub references: Vec<String>,
    pub patterns: Vec<Rule>,
    pub repository: IndexMap<String, Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rule {
    Include { include: String },
    Match(MatchRule),
    Region(RegionRule),
    /// Repository entry that only bundles other rules
    Group { patterns: Vec<Rule> },
}

impl Rule {
    pub fn include(target: impl Into<String>) -> Self {
        Rule::Include {
            include: target.into(),
        }
    }

    /// Include a repository entry by name.
    pub fn reference(name: &str) -> Self {
        Rule::include(format!("#{}", name))
    }

    pub fn group(patterns: Vec<Rule>) -> Self {
        Rule::Group { patterns }
    }
}

/// Single-line match rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRule {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub captures: Captures,
}

impl MatchRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
            captures: Captures::new(),
        }
    }

    pub fn named(mut self, scope: impl Into<String>) -> Self {
        self.name = Some(scope.into());
        self
    }

    pub fn capture(mut self, group: u32, capture: Capture) -> Self {
        self.captures.insert(group, capture);
        self
    }
}

impl From<MatchRule> for Rule {
    fn from(rule: MatchRule) -> Self {
        Rule::Match(rule)
    }
}

/// Begin/end region rule scoping `patterns` to the text between the two.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRule {
    pub begin: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub begin_captures: Captures,
    pub end: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub end_captures: Captures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<Rule>,
}

impl RegionRule {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            begin_captures: Captures::new(),
            end: end.into(),
            end_captures: Captures::new(),
            name: None,
            patterns: Vec::new(),
        }
    }

    pub fn named(mut self, scope: impl Into<String>) -> Self {
        self.name = Some(scope.into());
        self
    }

    pub fn begin_capture(mut self, group: u32, capture: Capture) -> Self {
        self.begin_captures.insert(group, capture);
        self
    }

    pub fn end_capture(mut self, group: u32, capture: Capture) -> Self {
        self.end_captures.insert(group, capture);
        self
    }

    pub fn with_patterns(mut self, patterns: Vec<Rule>) -> Self {
        self.patterns = patterns;
        self
    }
}

impl From<RegionRule> for Rule {
    fn from(rule: RegionRule) -> Self {
        Rule::Region(rule)
    }
}

/// Scope and nested patterns applied to one capture group.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Capture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<Rule>,
}

impl Capture {
    pub fn named(scope: impl Into<String>) -> Self {
        Self {
            name: Some(scope.into()),
            patterns: Vec::new(),
        }
    }

    pub fn patterns(patterns: Vec<Rule>) -> Self {
        Self {
            name: None,
            patterns,
        }
    }

    pub fn with_patterns(mut self, patterns: Vec<Rule>) -> Self {
        self.patterns = patterns;
        self
    }
}
