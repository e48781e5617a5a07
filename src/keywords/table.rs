//! In-memory keyword table and its construction from sheet rows
//!
//! A sheet row is a sequence of optional cells. A populated cell in the leading
//! column starts a new command; every populated cell in a later column is a
//! sub-keyword of the command most recently started in that sheet, including
//! cells on continuation rows whose leading column is empty.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands of one module, in sheet order, each with its sub-keywords.
pub type Module = IndexMap<String, Vec<String>>;

/// One spreadsheet cell. `None` is an absent cell.
pub type Cell = Option<String>;

/// One spreadsheet row, indexed by absolute column.
pub type Row = Vec<Cell>;

/// Mapping from module name to its commands.
///
/// Iteration order is the order modules were inserted (sheet order), which
/// keeps generated output reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable {
    modules: IndexMap<String, Module>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a module.
    pub fn insert_module(&mut self, name: impl Into<String>, module: Module) {
        self.modules.insert(name.into(), module);
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Iterate modules in insertion order
    pub fn modules(&self) -> impl Iterator<Item = (&str, &Module)> {
        self.modules.iter().map(|(name, module)| (name.as_str(), module))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total number of commands across all modules
    pub fn command_count(&self) -> usize {
        self.modules.values().map(|module| module.len()).sum()
    }

    /// Drop empty command names and empty sub-keywords.
    ///
    /// Tables built from sheets never contain them; tables deserialized from a
    /// hand-edited artifact might.
    pub fn discard_empty(mut self) -> Self {
        for module in self.modules.values_mut() {
            module.retain(|command, _| !is_blank(command));
            for keywords in module.values_mut() {
                keywords.retain(|keyword| !is_blank(keyword));
            }
        }
        self
    }
}

impl FromIterator<(String, Module)> for KeywordTable {
    fn from_iter<I: IntoIterator<Item = (String, Module)>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}

/// A sub-keyword cell appeared before any command cell in a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTableError {
    pub module: String,
    /// Zero-based row index within the sheet
    pub row: usize,
    /// Zero-based column index within the sheet
    pub column: usize,
    pub keyword: String,
}

impl fmt::Display for MalformedTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sheet '{}': keyword '{}' at row {}, column {} precedes any command",
            self.module,
            self.keyword,
            self.row + 1,
            self.column + 1
        )
    }
}

impl std::error::Error for MalformedTableError {}

/// Build a keyword table from the rows of each module's sheet.
pub fn build_table<I>(rows_by_module: I) -> Result<KeywordTable, MalformedTableError>
where
    I: IntoIterator<Item = (String, Vec<Row>)>,
{
    rows_by_module
        .into_iter()
        .map(|(name, rows)| build_module(&name, &rows).map(|module| (name, module)))
        .collect()
}

/// Fold one sheet's rows into its command map.
pub fn build_module(name: &str, rows: &[Row]) -> Result<Module, MalformedTableError> {
    let mut cells = rows.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter_map(move |(column, cell)| populated(cell).map(|text| (row, column, text)))
    });

    cells
        .try_fold(ModuleFold::default(), |state, (row, column, text)| {
            if column == 0 {
                Ok(state.start_command(text))
            } else {
                state.push_keyword(text).ok_or_else(|| MalformedTableError {
                    module: name.to_string(),
                    row,
                    column,
                    keyword: text.to_string(),
                })
            }
        })
        .map(|state| state.commands)
}

/// Fold state: the command currently accumulating keywords plus the partial map.
#[derive(Default)]
struct ModuleFold {
    current: Option<String>,
    commands: Module,
}

impl ModuleFold {
    /// Redefining a command resets its list but keeps its original position.
    fn start_command(mut self, name: &str) -> Self {
        self.commands.insert(name.to_string(), Vec::new());
        self.current = Some(name.to_string());
        self
    }

    fn push_keyword(mut self, keyword: &str) -> Option<Self> {
        let current = self.current.as_deref()?;
        self.commands.get_mut(current)?.push(keyword.to_string());
        Some(self)
    }
}

fn populated(cell: &Cell) -> Option<&str> {
    cell.as_deref().filter(|text| !is_blank(text))
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
