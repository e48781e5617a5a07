//! Grammar build pipeline
//!
//! Load the keyword table, save the intermediate artifact, generate the
//! grammar, render it and write it. Any error aborts the build before the
//! grammar is written; artifacts are replaced atomically, so an existing
//! grammar is never left half-written.

use crate::artifact;
use crate::config::{BuildConfig, SourceKind};
use crate::error::BuildError;
use crate::formats::FormatRegistry;
use crate::grammar::{self, rules};
use crate::keywords::{store, workbook, KeywordTable};
use std::path::PathBuf;
use tracing::{info, warn};

/// Counts reported after a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub modules: usize,
    pub commands: usize,
    /// Modules that received region rules
    pub scoped_modules: usize,
    pub grammar: PathBuf,
    /// Intermediate artifact written during this build, if any
    pub keywords: Option<PathBuf>,
}

/// Runs a configured grammar build
pub struct GrammarBuild {
    config: BuildConfig,
    registry: FormatRegistry,
}

impl GrammarBuild {
    /// Create a build with the default output formats
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            registry: FormatRegistry::with_defaults(),
        }
    }

    /// Run every step and write the artifacts.
    pub fn run(&self) -> Result<BuildSummary, BuildError> {
        let paths = &self.config.paths;
        let table = self.load_table()?;
        info!(
            modules = table.len(),
            commands = table.command_count(),
            "loaded keyword table"
        );

        let keywords = match self.config.source.kind {
            SourceKind::Workbook => {
                store::save(&table, &paths.keywords)?;
                info!(path = %paths.keywords.display(), "wrote keyword table");
                Some(paths.keywords.clone())
            }
            SourceKind::Keywords => None,
        };

        let text = self.render(&table)?;
        artifact::write_atomic(&paths.grammar, &text)?;
        info!(path = %paths.grammar.display(), "wrote grammar");

        Ok(BuildSummary {
            modules: table.len(),
            commands: table.command_count(),
            scoped_modules: rules::scoped_modules(&table).count(),
            grammar: paths.grammar.clone(),
            keywords,
        })
    }

    /// Read the keyword table from the configured source.
    pub fn load_table(&self) -> Result<KeywordTable, BuildError> {
        let paths = &self.config.paths;
        match self.config.source.kind {
            SourceKind::Workbook => {
                info!(path = %paths.workbook.display(), "reading keyword workbook");
                workbook::load_table(&paths.workbook)
            }
            SourceKind::Keywords => {
                info!(path = %paths.keywords.display(), "reading keyword table");
                store::load(&paths.keywords)
            }
        }
    }

    /// Generate the grammar for a table and render it in the configured format.
    pub fn render(&self, table: &KeywordTable) -> Result<String, BuildError> {
        if table.module(rules::BASE_MODULE).is_none() {
            warn!(
                module = rules::BASE_MODULE,
                "base module missing; no base commands in the generic rules"
            );
        }
        for (name, module) in rules::scoped_modules(table) {
            if module.is_empty() {
                warn!(module = name, "module has no commands");
            }
        }

        let document = grammar::generate(table)?;
        Ok(self.registry.serialize(&document, &self.config.output.format)?)
    }
}
