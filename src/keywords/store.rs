//! Intermediate keyword artifact
//!
//! The table is written as pretty-printed JSON (`module → command → [keywords]`)
//! for downstream tooling and can be reloaded to regenerate the grammar without
//! the workbook.

use super::table::KeywordTable;
use crate::artifact;
use crate::error::BuildError;
use std::fs;
use std::path::Path;

/// Serialize a table to its JSON text.
pub fn to_json(table: &KeywordTable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table)
}

/// Parse a table from JSON text, discarding empty entries.
pub fn from_json(text: &str) -> Result<KeywordTable, serde_json::Error> {
    serde_json::from_str::<KeywordTable>(text).map(KeywordTable::discard_empty)
}

/// Write the artifact, replacing any previous file only once fully written.
pub fn save(table: &KeywordTable, path: &Path) -> Result<(), BuildError> {
    let json = to_json(table).map_err(|e| BuildError::Serialization(e.to_string()))?;
    artifact::write_atomic(path, &json)
}

pub fn load(path: &Path) -> Result<KeywordTable, BuildError> {
    if !path.is_file() {
        return Err(BuildError::InputNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|e| BuildError::Io(format!("{}: {}", path.display(), e)))?;
    from_json(&text).map_err(|e| BuildError::Serialization(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Module;

    fn sample() -> KeywordTable {
        let mut module = Module::new();
        module.insert("CMD1".into(), vec!["X".into(), "Y".into()]);
        module.insert("CMD2".into(), vec![]);
        let mut table = KeywordTable::new();
        table.insert_module("MOD", module);
        table
    }

    #[test]
    fn test_json_layout() {
        let json = to_json(&sample()).unwrap();
        let expected = r#"{
  "MOD": {
    "CMD1": [
      "X",
      "Y"
    ],
    "CMD2": []
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("keywords.json");

        save(&sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BuildError::InputNotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, BuildError::Serialization(_)));
    }

    #[test]
    fn test_from_json_discards_empty_keywords() {
        let table = from_json(r#"{"MOD": {"CMD": ["A", ""], "": ["B"]}}"#).unwrap();
        let module = table.module("MOD").unwrap();
        assert_eq!(module.len(), 1);
        assert_eq!(module["CMD"], vec!["A"]);
    }
}
