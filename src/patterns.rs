//! Keyword alternation patterns
//!
//! [`optimize`] turns a keyword list into one alternation. Keywords are grouped
//! by their uppercased first character and ordered longest first inside each
//! group, so a keyword is never shadowed by a shorter keyword that is a prefix
//! of it (`AB` is tried before `A`). Groups with several keywords share their
//! leading character: `ALL, AB, B` becomes `A(?:LL|B)|B`.
//!
//! Keyword text is embedded verbatim. Regex metacharacters are not escaped.
//!
//! The remaining functions build the fixed fragments that the generated rules
//! combine: command tokens, whole-token keyword matches and the module
//! statement boundaries. All patterns are case-insensitive and written for a
//! line-oriented engine where `^` and `$` anchor to the current line.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Marker introducing a module block, with its optional sign prefix.
pub const MODULE_MARKER: &str = r"[\$\+-]?PROG";

/// Build a single alternation matching exactly the given keywords.
///
/// Keywords that differ only in case collapse into one alternative, so the
/// result can have fewer alternatives than the input. An empty list yields an
/// empty pattern.
pub fn optimize<S: AsRef<str>>(keywords: &[S]) -> String {
    let groups = group_by_initial(keywords);
    if groups.len() == 1 {
        return groups
            .into_values()
            .next()
            .map(|group| group.join("|"))
            .unwrap_or_default();
    }

    groups
        .into_values()
        .map(|group| factor_group(&group))
        .collect::<Vec<_>>()
        .join("|")
}

/// Partition keywords by uppercased first character, each group sorted
/// longest first. Keywords differing only in case are kept once.
pub fn group_by_initial<S: AsRef<str>>(keywords: &[S]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for keyword in keywords.iter().map(AsRef::as_ref) {
        let Some(initial) = keyword.chars().next() else {
            continue;
        };
        groups
            .entry(initial.to_uppercase().collect())
            .or_default()
            .push(keyword.to_string());
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| longest_first(a, b));
        group.dedup_by(|a, b| a.to_uppercase() == b.to_uppercase());
    }
    groups
}

/// Descending length, then lexicographic ignoring case, then exact text.
pub fn longest_first(a: &str, b: &str) -> Ordering {
    b.chars()
        .count()
        .cmp(&a.chars().count())
        .then_with(|| a.to_uppercase().cmp(&b.to_uppercase()))
        .then_with(|| a.cmp(b))
}

fn factor_group(group: &[String]) -> String {
    match group {
        [] => String::new(),
        [single] => single.clone(),
        [first, ..] => {
            let lead: String = first.chars().take(1).collect();
            let suffixes: Vec<&str> = group.iter().map(|keyword| after_initial(keyword)).collect();
            format!("{}(?:{})", lead, suffixes.join("|"))
        }
    }
}

fn after_initial(keyword: &str) -> &str {
    keyword
        .char_indices()
        .nth(1)
        .map_or("", |(index, _)| &keyword[index..])
}

/// Prefix a pattern with the case-insensitive flag.
pub fn case_insensitive(pattern: &str) -> String {
    format!("(?i){}", pattern)
}

/// Keyword alternation matched as a whole token, captured in group 1.
pub fn whole_token(alternation: &str) -> String {
    case_insensitive(&format!(r"(?<!\w)({})(?!\w)", alternation))
}

/// A statement-leading token: at line start or after a `;` separator, and
/// followed by a separator, end of line or space. The token is group 1.
pub fn command_token(alternation: &str) -> String {
    case_insensitive(&format!(r"(?:^ *|; *)({})(?=;|$| )", alternation))
}

/// Module statement naming `module`: marker (group 1), module name (group 2)
/// and the rest of the line (group 3).
pub fn module_statement(module: &str) -> String {
    case_insensitive(&format!(r"^ *({})( +{})( .*)?$", MODULE_MARKER, module))
}

/// Zero-width boundary at the start of any module statement. The marker must
/// end at a word boundary: `PROGRESS 1` does not start a module.
pub fn next_module() -> String {
    case_insensitive(&format!("(?={})", module_start()))
}

/// Zero-width boundary ending a command context: another command of the same
/// module at line start, a `;` separator, or a new module statement.
pub fn command_end(command_alternation: &str) -> String {
    let mut boundaries = Vec::with_capacity(3);
    if !command_alternation.is_empty() {
        boundaries.push(format!(r"^ *(?:{})(?=;|$| )", command_alternation));
    }
    boundaries.push(";".to_string());
    boundaries.push(module_start());
    case_insensitive(&format!("(?={})", boundaries.join("|")))
}

fn module_start() -> String {
    format!(r"^ *({})\b", MODULE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;

    fn whole_match(alternation: &str, text: &str) -> bool {
        Regex::new(&format!("(?i)^(?:{})$", alternation))
            .unwrap()
            .is_match(text)
    }

    #[test]
    fn test_optimize_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(optimize(&empty), "");
    }

    #[rstest]
    #[case(&["A"], "A")]
    #[case(&["AB", "A", "ABC"], "ABC|AB|A")]
    #[case(&["ALL", "AB", "B"], "A(?:LL|B)|B")]
    #[case(&["A", "AB", "B"], "A(?:B|)|B")]
    #[case(&["NO", "TITL", "TYPE"], "NO|T(?:ITL|YPE)")]
    #[case(&["B", "A"], "A|B")]
    #[case(&["x", "X", "y"], "X|y")]
    fn test_optimize_shapes(#[case] keywords: &[&str], #[case] expected: &str) {
        assert_eq!(optimize(keywords), expected);
    }

    #[test]
    fn test_single_group_is_plain_alternation() {
        assert_eq!(optimize(&["ABS", "AREA", "AX"]), "AREA|ABS|AX");
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(optimize(&["NO", "NO", "X"]), "NO|X");
    }

    #[test]
    fn test_optimize_is_order_independent() {
        assert_eq!(
            optimize(&["TYPE", "NO", "TITL", "N"]),
            optimize(&["N", "TITL", "NO", "TYPE"])
        );
    }

    #[test]
    fn test_prefix_keyword_matches_in_full() {
        let alternation = optimize(&["A", "AB", "B"]);
        let re = Regex::new(&format!("(?i)(?:{})", alternation)).unwrap();
        assert_eq!(re.find("AB").unwrap().as_str(), "AB");
    }

    #[test]
    fn test_whole_token_set_is_preserved() {
        let keywords = ["GRP", "GRAV", "SECT", "S", "NO"];
        let alternation = optimize(&keywords);

        for keyword in keywords {
            assert!(whole_match(&alternation, keyword), "{keyword} lost");
        }
        for other in ["GR", "SEC", "N", "GRPX", ""] {
            assert!(!whole_match(&alternation, other), "{other} matched");
        }
    }

    #[test]
    fn test_longest_first() {
        let mut words = vec!["A", "ABC", "AB", "AC"];
        words.sort_by(|a, b| longest_first(a, b));
        assert_eq!(words, vec!["ABC", "AB", "AC", "A"]);
    }

    #[test]
    fn test_group_by_initial() {
        let groups = group_by_initial(&["beta", "Bravo", "alpha"]);
        let keys: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(groups["B"], vec!["Bravo", "beta"]);
    }

    #[test]
    fn test_fragments() {
        assert_eq!(whole_token("A|B"), r"(?i)(?<!\w)(A|B)(?!\w)");
        assert_eq!(command_token("GRP"), r"(?i)(?:^ *|; *)(GRP)(?=;|$| )");
        assert_eq!(
            module_statement("AQUA"),
            r"(?i)^ *([\$\+-]?PROG)( +AQUA)( .*)?$"
        );
        assert_eq!(next_module(), r"(?i)(?=^ *([\$\+-]?PROG)\b)");
        assert_eq!(
            command_end("GRP|SECT"),
            r"(?i)(?=^ *(?:GRP|SECT)(?=;|$| )|;|^ *([\$\+-]?PROG)\b)"
        );
    }

    #[test]
    fn test_command_token_needs_boundary() {
        let re = Regex::new(r"(?im)(?:^ *|; *)(GRP)(?:;|$| )").unwrap();
        assert!(re.is_match("GRP 1"));
        assert!(re.is_match("  GRP"));
        assert!(re.is_match("NORM DIN ; GRP 2"));
        assert!(!re.is_match("GRPX 1"));
        assert!(!re.is_match("SECT GRP"));
    }
}
