//! TextMate JSON grammar notation

use super::registry::{FormatError, Formatter};
use crate::grammar::GrammarDocument;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &GrammarDocument) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map(|json| json + "\n")
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{assemble, FixedRuleSet};

    #[test]
    fn test_json_grammar_shape() {
        let doc = assemble(&[], FixedRuleSet::standard());
        let json = JsonFormatter.serialize(&doc).unwrap();
        assert!(json.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scopeName"], "source.sofistik");
        assert_eq!(value["patterns"][2]["include"], "#normalText");
        assert_eq!(
            value["repository"]["keys1"]["captures"]["2"]["name"],
            "keyword.control.sofistik"
        );
        assert!(value["repository"]["normalText"]["patterns"].is_array());
    }
}
