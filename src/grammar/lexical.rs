//! Generic lexical rules shared by every module
//!
//! Text blocks, preprocessor directives, comments, strings, variable
//! references, control-flow keywords, `=` expressions and bracketed units.
//! They are bundled under the `normalText` repository entry, which every module
//! and command region falls through to.

use super::model::{Capture, MatchRule, RegionRule, Rule};
use super::scope;
use indexmap::IndexMap;

/// Repository name of the bundle including every generic rule.
pub const NORMAL_TEXT: &str = "normalText";

/// Repository name of the absorbed base-module commands.
pub const BASE_COMMANDS: &str = "baseCommands";

/// Order in which `normalText` includes the generic rules.
const NORMAL_TEXT_ORDER: &[&str] = &[
    "textcmds", "defA", "defB", "defC", "defD", "inc1", "text", "comments", "str1", "str2",
    "var1", "var2", "keys1", "keys2", "expr", "units",
];

/// Rules nested inside `#DEFINE` values.
const DEFINE_VALUE_RULES: &[&str] = &[
    "inc1", "comments", "str1", "str2", "var1", "var2", "keys1", "keys2", "expr", "units",
];

/// Named generic rules plus the subset bundled by `normalText`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRuleSet {
    rules: IndexMap<String, Rule>,
    bundled: Vec<String>,
}

impl FixedRuleSet {
    /// The standard generic rules.
    pub fn standard() -> Self {
        let mut rules = IndexMap::new();
        rules.insert("textcmds".to_string(), textcmds());
        rules.insert("text".to_string(), text_block());
        rules.insert("edit".to_string(), edit_block());
        rules.insert("defA".to_string(), define());
        rules.insert("defB".to_string(), include_directive());
        rules.insert("defC".to_string(), apply_sys());
        rules.insert("defD".to_string(), conditional());
        rules.insert("inc1".to_string(), substitution());
        rules.insert("comments".to_string(), comments());
        rules.insert("str1".to_string(), string_rule('"', "string.double"));
        rules.insert("str2".to_string(), string_rule('\'', "string.single"));
        rules.insert("var1".to_string(), statement_keywords("LET|STO|DEL|DBG|PRT", r"(?!\w)"));
        rules.insert("var2".to_string(), variables());
        rules.insert("keys1".to_string(), statement_keywords("LOOP", r"(?!\w)"));
        rules.insert(
            "keys2".to_string(),
            statement_keywords("IF|ELSEIF|ELSE|ENDIF|ENDLOOP|END", r"(?=\s|$)"),
        );
        rules.insert("expr".to_string(), expression());
        rules.insert("units".to_string(), units());

        Self {
            rules,
            bundled: NORMAL_TEXT_ORDER.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Add the base module's command rule to the bundle, after the fixed rules.
    pub fn with_base_commands(mut self, rule: Option<Rule>) -> Self {
        if let Some(rule) = rule {
            self.rules.insert(BASE_COMMANDS.to_string(), rule);
            self.bundled.push(BASE_COMMANDS.to_string());
        }
        self
    }

    /// Repository entries: the `normalText` bundle first, then every rule.
    pub fn into_repository(self) -> IndexMap<String, Rule> {
        let bundle = Rule::group(self.bundled.iter().map(|name| Rule::reference(name)).collect());

        let mut repository = IndexMap::with_capacity(self.rules.len() + 1);
        repository.insert(NORMAL_TEXT.to_string(), bundle);
        repository.extend(self.rules);
        repository
    }
}

fn references(names: &[&str]) -> Vec<Rule> {
    names.iter().map(|name| Rule::reference(name)).collect()
}

fn textcmds() -> Rule {
    MatchRule::new(r"(?i)(^ *)(HEAD|TXB|TXE)( .+?$| *$)")
        .capture(1, Capture::named(scope("support.type")))
        .capture(2, Capture::named(scope("keyword.control")))
        .into()
}

fn text_block() -> Rule {
    RegionRule::new(
        r"(?i)^[ ]*(<TEXT>|<TEXT,FILE=\+?(.+)>)(?= |$)",
        r"(?i)^[ ]*(<\/TEXT>)(?= |$)",
    )
    .begin_capture(1, Capture::named(scope("support.function")))
    .begin_capture(2, Capture::named(scope("string.other")))
    .end_capture(1, Capture::named(scope("support.function")))
    .with_patterns(references(&["inc1", "var2", "edit"]))
    .into()
}

fn edit_block() -> Rule {
    RegionRule::new(r"(?i)(<EDIT:.+?>)", r"(?i)(<\/EDIT>)")
        .begin_capture(1, Capture::named(scope("support.function")))
        .end_capture(1, Capture::named(scope("support.function")))
        .with_patterns(references(&["var2", "inc1"]))
        .into()
}

fn define() -> Rule {
    MatchRule::new(r"(?i)^[ ]*(#DEFINE|#ENDDEF) *(.+?)?(?: *= *(.*))?$")
        .capture(1, Capture::named(scope("entity.name.section")))
        .capture(2, Capture::named(scope("string.other")))
        .capture(3, Capture::patterns(references(DEFINE_VALUE_RULES)))
        .into()
}

fn include_directive() -> Rule {
    MatchRule::new(r"(?i)^[ ]*(#INCLUDE) +(.+)")
        .capture(1, Capture::named(scope("entity.name.section")))
        .capture(
            2,
            Capture::named(scope("string.other")).with_patterns(references(&["inc1"])),
        )
        .into()
}

fn apply_sys() -> Rule {
    MatchRule::new(r"(?i)^[ ]*([\$\+-]?APPLY|[\+-]?SYS)( +.+)")
        .capture(1, Capture::named(scope("support.class")))
        .capture(
            2,
            Capture::named(scope("string.other")).with_patterns(references(&["inc1", "comments"])),
        )
        .into()
}

fn conditional() -> Rule {
    MatchRule::new(r"(?i)^[ ]*(#IF|#ELSE|#ENDIF)")
        .capture(1, Capture::named(scope("entity.name.section")))
        .into()
}

fn substitution() -> Rule {
    MatchRule::new(r"(;)?[ ]*(\$\(\S+?\))")
        .capture(1, Capture::named(scope("support.type")))
        .capture(2, Capture::named(scope("variable.other")))
        .into()
}

fn comments() -> Rule {
    MatchRule::new(r"(?i)(?:!|\/\/|\$(?!PROG))(.*)")
        .named(scope("comment.line"))
        .capture(1, Capture::patterns(vec![Rule::include("text.todo")]))
        .into()
}

fn string_rule(quote: char, kind: &str) -> Rule {
    MatchRule::new(format!(r"\{q}(.*?)\{q}", q = quote))
        .named(scope(kind))
        .capture(1, Capture::patterns(references(&["inc1"])))
        .into()
}

/// Statement keywords at line start or after `;`, separator in group 1.
fn statement_keywords(alternation: &str, boundary: &str) -> Rule {
    MatchRule::new(format!(r"(?i)(^|;)[ ]*({}){}", alternation, boundary))
        .capture(1, Capture::named(scope("support.type")))
        .capture(2, Capture::named(scope("keyword.control")))
        .into()
}

fn variables() -> Rule {
    MatchRule::new(r"(#\w+|#\(\w+(?:,\d\.\d)?\))")
        .named(scope("variable.other"))
        .into()
}

fn expression() -> Rule {
    MatchRule::new(r"(?<=\s|^)(=\S+)")
        .capture(
            1,
            Capture::named(scope("entity.name.function")).with_patterns(references(&["var2"])),
        )
        .into()
}

fn units() -> Rule {
    MatchRule::new(r"(?<=\S)\[.*?\]")
        .named(scope("constant.other"))
        .into()
}
