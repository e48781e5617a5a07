//! CSON grammar notation
//!
//! Indentation-based blocks with `key: value` pairs, list literals in `[...]`
//! and single-quoted strings. Rule objects are braced, one field per line;
//! includes stay on one line (`{ include: '#normalText' }`). A capture with
//! only a scope name is written inline (`1: name: 'keyword.control.sofistik'`).

use super::registry::{FormatError, Formatter};
use crate::grammar::model::{Captures, GrammarDocument, MatchRule, RegionRule, Rule};
use once_cell::sync::Lazy;
use regex::Regex;

/// Indentation step
const STEP: usize = 2;

/// Keys that can be written without quotes
static PLAIN_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

pub struct CsonFormatter;

impl Formatter for CsonFormatter {
    fn name(&self) -> &str {
        "cson"
    }

    fn serialize(&self, doc: &GrammarDocument) -> Result<String, FormatError> {
        Ok(to_cson(doc))
    }
}

/// Render a complete grammar document.
pub fn to_cson(doc: &GrammarDocument) -> String {
    let mut writer = CsonWriter::default();
    writer.document(doc);
    writer.out
}

#[derive(Default)]
struct CsonWriter {
    out: String,
}

impl CsonWriter {
    fn document(&mut self, doc: &GrammarDocument) {
        if !doc.references.is_empty() {
            self.line(0, "# ***** References *****");
            for reference in &doc.references {
                self.line(0, &format!("# {}", reference));
            }
            self.out.push('\n');
        }

        self.field(0, "scopeName", &doc.scope_name);
        self.field(0, "name", &doc.name);
        let file_types: Vec<String> = doc.file_types.iter().map(|t| quote(t)).collect();
        self.line(0, &format!("fileTypes: [{}]", file_types.join(",")));

        self.line(0, "patterns: [");
        for rule in &doc.patterns {
            self.indent(STEP);
            self.rule(rule, STEP);
            self.out.push('\n');
        }
        self.line(0, "]");

        self.line(0, "repository:");
        for (name, rule) in &doc.repository {
            self.indent(STEP);
            self.out.push_str(&key(name));
            self.out.push_str(": ");
            self.rule(rule, STEP);
            self.out.push('\n');
        }
    }

    /// Write a rule whose first line has already been indented.
    fn rule(&mut self, rule: &Rule, indent: usize) {
        match rule {
            Rule::Include { include } => {
                self.out.push_str(&format!("{{ include: {} }}", quote(include)));
            }
            Rule::Match(rule) => self.braced(indent, |w, inner| w.match_fields(rule, inner)),
            Rule::Region(rule) => self.braced(indent, |w, inner| w.region_fields(rule, inner)),
            Rule::Group { patterns } => {
                self.braced(indent, |w, inner| w.patterns(inner, patterns))
            }
        }
    }

    fn braced(&mut self, indent: usize, fields: impl FnOnce(&mut Self, usize)) {
        self.out.push_str("{\n");
        fields(self, indent + STEP);
        self.indent(indent);
        self.out.push('}');
    }

    fn match_fields(&mut self, rule: &MatchRule, indent: usize) {
        self.field(indent, "match", &rule.pattern);
        if let Some(name) = &rule.name {
            self.field(indent, "name", name);
        }
        self.captures(indent, "captures", &rule.captures);
    }

    fn region_fields(&mut self, rule: &RegionRule, indent: usize) {
        self.field(indent, "begin", &rule.begin);
        self.captures(indent, "beginCaptures", &rule.begin_captures);
        self.field(indent, "end", &rule.end);
        self.captures(indent, "endCaptures", &rule.end_captures);
        if let Some(name) = &rule.name {
            self.field(indent, "name", name);
        }
        if !rule.patterns.is_empty() {
            self.patterns(indent, &rule.patterns);
        }
    }

    fn captures(&mut self, indent: usize, label: &str, captures: &Captures) {
        if captures.is_empty() {
            return;
        }
        self.line(indent, &format!("{}:", label));
        let inner = indent + STEP;
        for (group, capture) in captures {
            match (&capture.name, capture.patterns.is_empty()) {
                (Some(name), true) => {
                    self.line(inner, &format!("{}: name: {}", group, quote(name)));
                }
                (None, false) if is_single_include(&capture.patterns) => {
                    self.indent(inner);
                    self.out.push_str(&format!("{}: ", group));
                    self.pattern_list(inner, &capture.patterns);
                    self.out.push('\n');
                }
                _ => {
                    self.line(inner, &format!("{}:", group));
                    if let Some(name) = &capture.name {
                        self.field(inner + STEP, "name", name);
                    }
                    if !capture.patterns.is_empty() {
                        self.patterns(inner + STEP, &capture.patterns);
                    }
                }
            }
        }
    }

    fn patterns(&mut self, indent: usize, patterns: &[Rule]) {
        self.indent(indent);
        self.pattern_list(indent, patterns);
        self.out.push('\n');
    }

    /// `patterns: [...]`, inline for a single include.
    fn pattern_list(&mut self, indent: usize, patterns: &[Rule]) {
        self.out.push_str("patterns: [");
        if is_single_include(patterns) {
            for rule in patterns {
                self.rule(rule, indent);
            }
            self.out.push(']');
            return;
        }

        self.out.push('\n');
        for rule in patterns {
            self.indent(indent + STEP);
            self.rule(rule, indent + STEP);
            self.out.push('\n');
        }
        self.indent(indent);
        self.out.push(']');
    }

    fn field(&mut self, indent: usize, name: &str, value: &str) {
        self.line(indent, &format!("{}: {}", name, quote(value)));
    }

    fn line(&mut self, indent: usize, text: &str) {
        self.indent(indent);
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn indent(&mut self, width: usize) {
        self.out.extend(std::iter::repeat(' ').take(width));
    }
}

fn is_single_include(patterns: &[Rule]) -> bool {
    matches!(patterns, [Rule::Include { .. }])
}

/// Single-quoted string literal.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Object key, quoted unless it is a plain identifier.
fn key(name: &str) -> String {
    if PLAIN_KEY.is_match(name) {
        name.to_string()
    } else {
        quote(name)
    }
}
