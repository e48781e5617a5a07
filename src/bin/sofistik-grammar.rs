//! Command-line interface for sofistik-grammar
//! Builds the SOFiSTiK grammar from the keyword workbook.
//!
//! Usage:
//!   sofistik-grammar                          - Workbook → keywords.json → grammar
//!   sofistik-grammar --from-keywords          - Regenerate the grammar from keywords.json
//!   sofistik-grammar --format json            - Write a TextMate JSON grammar instead
//!   sofistik-grammar --config `<file>`          - Layer a configuration file over the defaults

use clap::{Arg, ArgAction, ArgMatches, Command};
use sofistik_grammar::config::{Loader, LOCAL_CONFIG};
use sofistik_grammar::{BuildError, GrammarBuild};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("sofistik-grammar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate the SOFiSTiK syntax-highlighting grammar from the keyword workbook")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("workbook")
                .long("workbook")
                .help("Keyword workbook (one sheet per module)"),
        )
        .arg(
            Arg::new("keywords")
                .long("keywords")
                .help("Intermediate keyword table (JSON)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Grammar file to write"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Grammar format ('cson' or 'json')"),
        )
        .arg(
            Arg::new("from-keywords")
                .long("from-keywords")
                .action(ArgAction::SetTrue)
                .help("Read the keyword table instead of the workbook"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log every generated module"),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), BuildError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let overrides = [
        ("workbook", "paths.workbook"),
        ("keywords", "paths.keywords"),
        ("output", "paths.grammar"),
        ("format", "output.format"),
    ];
    for (arg, key) in overrides {
        if let Some(value) = matches.get_one::<String>(arg) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    if matches.get_flag("from-keywords") {
        loader = loader.set_override("source.kind", "keywords")?;
    }

    let summary = GrammarBuild::new(loader.build()?).run()?;
    tracing::info!(
        modules = summary.modules,
        scoped = summary.scoped_modules,
        commands = summary.commands,
        "grammar build finished"
    );
    Ok(())
}
