//! Grammar assembly
//!
//! Order of the document: fixed header, the version banner and annotation
//! patterns, `normalText`, one region per module (table order); then the
//! repository with the generic rules followed by one entry per module.

use super::lexical::{FixedRuleSet, NORMAL_TEXT};
use super::model::{GrammarDocument, MatchRule, Rule};
use super::rules::ModuleRules;
use super::scope;

pub const SCOPE_NAME: &str = "source.sofistik";
pub const GRAMMAR_NAME: &str = "SOFiSTiK";
pub const FILE_TYPES: &[&str] = &["dat", "gra", "grb", "results"];

/// Grammar format references, kept as a comment block where possible.
pub const REFERENCES: &[&str] = &[
    "https://pulsar-edit.dev/docs/launch-manual/sections/core-hacking/#creating-a-legacy-textmate-grammar",
    "https://gist.github.com/savetheclocktower/c9607b97477d4817911e4f2f8db89679",
    "http://manual.macromates.com/en/language_grammars/",
    "https://github.com/kkos/oniguruma/blob/master/doc/RE",
    "https://regex101.com/",
];

/// Version banner line (`@ SOFiSTiK 2024-1`) and other annotation lines.
pub fn header_patterns() -> Vec<Rule> {
    vec![
        MatchRule::new(r"(?i)^@ *SOFiSTiK *(\d{4})(-\d\d?)? *$")
            .named(scope("meta.version"))
            .into(),
        MatchRule::new(r"(?i)^@ .+").named(scope("meta")).into(),
    ]
}

pub fn assemble(modules: &[ModuleRules], shared: FixedRuleSet) -> GrammarDocument {
    let mut patterns = header_patterns();
    patterns.push(Rule::reference(NORMAL_TEXT));
    patterns.extend(modules.iter().map(ModuleRules::region_rule));

    let mut repository = shared.into_repository();
    for module in modules {
        if repository.contains_key(&module.module) {
            tracing::warn!(
                module = module.module.as_str(),
                "module name collides with a generic rule; the module entry replaces it"
            );
        }
        repository.insert(module.module.clone(), module.repository_entry());
    }

    GrammarDocument {
        scope_name: SCOPE_NAME.to_string(),
        name: GRAMMAR_NAME.to_string(),
        file_types: FILE_TYPES.iter().map(|t| t.to_string()).collect(),
        references: REFERENCES.iter().map(|r| r.to_string()).collect(),
        patterns,
        repository,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Module;

    fn aqua() -> ModuleRules {
        let mut module = Module::new();
        module.insert("GRP".into(), vec!["NO".into()]);
        ModuleRules::generate("AQUA", &module).unwrap()
    }

    #[test]
    fn test_header() {
        let doc = assemble(&[], FixedRuleSet::standard());
        assert_eq!(doc.scope_name, "source.sofistik");
        assert_eq!(doc.name, "SOFiSTiK");
        assert_eq!(doc.file_types, vec!["dat", "gra", "grb", "results"]);
        assert_eq!(doc.patterns.len(), 3);
        assert_eq!(doc.patterns[2], Rule::reference("normalText"));
    }

    #[test]
    fn test_module_regions_follow_header() {
        let doc = assemble(&[aqua()], FixedRuleSet::standard());
        assert_eq!(doc.patterns.len(), 4);
        assert!(matches!(doc.patterns[3], Rule::Region(_)));

        let keys: Vec<_> = doc.repository.keys().map(String::as_str).collect();
        assert_eq!(keys.first(), Some(&"normalText"));
        assert_eq!(keys.last(), Some(&"AQUA"));
    }

    #[test]
    fn test_version_banner() {
        let banner = match &header_patterns()[0] {
            Rule::Match(rule) => regex::Regex::new(&rule.pattern).unwrap(),
            other => panic!("expected match rule, got {other:?}"),
        };
        assert!(banner.is_match("@ SOFiSTiK 2024-1"));
        assert!(banner.is_match("@sofistik 2020"));
        assert!(!banner.is_match("@ SOFiSTiK latest"));
    }
}
