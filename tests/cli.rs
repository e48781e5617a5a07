use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn regenerate_grammar_from_keyword_table() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("grammars").join("sofistik.cson");

    let mut cmd = cargo_bin_cmd!("sofistik-grammar");
    cmd.current_dir(dir.path())
        .arg("--from-keywords")
        .arg("--keywords")
        .arg(fixture_path("keywords.json"))
        .arg("--output")
        .arg(&grammar);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("wrote grammar"));

    let text = fs::read_to_string(&grammar).unwrap();
    assert!(text.starts_with("# ***** References *****"));
    assert!(text.contains("scopeName: 'source.sofistik'"));
    assert!(text.contains("  AQUA: {\n"));
    assert!(text.contains("  SOFIMSHC: {\n"));
    assert!(text.contains("  baseCommands: {\n"));
    assert!(!text.contains("  BASIC: {\n"));
}

#[test]
fn json_format_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("sofistik.tmLanguage.json");

    let mut cmd = cargo_bin_cmd!("sofistik-grammar");
    cmd.current_dir(dir.path())
        .arg("--from-keywords")
        .arg("--keywords")
        .arg(fixture_path("keywords.json"))
        .arg("--output")
        .arg(&grammar)
        .arg("--format")
        .arg("json");

    cmd.assert().success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&grammar).unwrap()).unwrap();
    assert_eq!(value["scopeName"], "source.sofistik");
    assert!(value["repository"]["AQUA"]["patterns"].is_array());
}

#[test]
fn missing_workbook_fails() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("sofistik.cson");

    let mut cmd = cargo_bin_cmd!("sofistik-grammar");
    cmd.current_dir(dir.path())
        .arg("--workbook")
        .arg("missing.xlsx")
        .arg("--output")
        .arg(&grammar);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Input not found: missing.xlsx"));
    assert!(!grammar.exists());
}

#[test]
fn unknown_format_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("sofistik-grammar");
    cmd.current_dir(dir.path())
        .arg("--from-keywords")
        .arg("--keywords")
        .arg(fixture_path("keywords.json"))
        .arg("--format")
        .arg("yaml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Format 'yaml' not found (available: cson, json)",
        ));
}

#[test]
fn config_file_sets_paths() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("from-config.cson");
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        format!(
            "[paths]\nkeywords = {:?}\ngrammar = {:?}\n\n[source]\nkind = \"keywords\"\n",
            fixture_path("keywords.json").display().to_string(),
            grammar.display().to_string()
        ),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("sofistik-grammar");
    cmd.current_dir(dir.path()).arg("--config").arg(&config);

    cmd.assert().success();
    assert!(grammar.exists());
}
