//! Property-based tests for the keyword alternation optimizer
//!
//! The optimized alternation must match exactly the keyword set, and a keyword
//! must never be shadowed by a shorter keyword that is a prefix of it.

use proptest::prelude::*;
use regex::Regex;
use sofistik_grammar::patterns::{optimize, whole_token};

/// Keywords as they appear in the workbook: upper-case, short, alphanumeric
fn keyword_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{0,5}"
}

fn keyword_set_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(keyword_strategy(), 1..12)
}

fn exact(alternation: &str) -> Regex {
    Regex::new(&format!("(?i)^(?:{})$", alternation)).unwrap()
}

proptest! {
    #[test]
    fn every_keyword_matches(keywords in keyword_set_strategy()) {
        let re = exact(&optimize(&keywords));
        for keyword in &keywords {
            prop_assert!(re.is_match(keyword), "{} not matched", keyword);
            prop_assert!(re.is_match(&keyword.to_lowercase()));
        }
    }

    #[test]
    fn nothing_else_matches(keywords in keyword_set_strategy(), other in keyword_strategy()) {
        prop_assume!(!keywords.iter().any(|k| k.eq_ignore_ascii_case(&other)));
        let re = exact(&optimize(&keywords));
        prop_assert!(!re.is_match(&other), "{} matched", other);
    }

    #[test]
    fn leftmost_match_is_the_whole_keyword(keywords in keyword_set_strategy()) {
        let re = Regex::new(&format!("(?i)(?:{})", optimize(&keywords))).unwrap();
        for keyword in &keywords {
            let found = re.find(keyword).unwrap();
            prop_assert_eq!(found.as_str(), keyword.as_str());
        }
    }

    #[test]
    fn whole_token_finds_keyword_after_command(keywords in keyword_set_strategy()) {
        let re = fancy_regex::Regex::new(&whole_token(&optimize(&keywords))).unwrap();
        for keyword in &keywords {
            let line = format!("CMD {} 1.5", keyword);
            let found = re.find_from_pos(&line, 3).unwrap().unwrap();
            prop_assert_eq!(found.as_str(), keyword.as_str());
        }
    }

    #[test]
    fn optimize_ignores_input_order(mut keywords in keyword_set_strategy()) {
        let forward = optimize(&keywords);
        keywords.reverse();
        prop_assert_eq!(forward, optimize(&keywords));
    }
}
