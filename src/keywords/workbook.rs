//! Keyword workbook import
//!
//! Each worksheet is one module; the sheet name is the module name. Cells are
//! reported by absolute column so that the leading column of the sheet is
//! always column 0, even when the used range starts further right.

use super::table::{build_table, Cell, KeywordTable, Row};
use crate::error::BuildError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Read every sheet of a workbook as `(sheet name, rows)` in workbook order.
pub fn read_sheets(path: &Path) -> Result<Vec<(String, Vec<Row>)>, BuildError> {
    if !path.is_file() {
        return Err(BuildError::InputNotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| BuildError::Workbook(format!("{}: {}", path.display(), e)))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| BuildError::Workbook(format!("sheet '{}': {}", name, e)))?;
        sheets.push((name, sheet_rows(&range)));
    }
    Ok(sheets)
}

/// Read a workbook straight into a keyword table.
pub fn load_table(path: &Path) -> Result<KeywordTable, BuildError> {
    let sheets = read_sheets(path)?;
    Ok(build_table(sheets)?)
}

/// Convert a used range into absolutely-indexed rows.
pub fn sheet_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_column)) = range.start() else {
        return Vec::new();
    };

    let leading_rows = (0..start_row).map(|_| Row::new());
    let used_rows = range.rows().map(|cells| {
        let offset = (0..start_column).map(|_| None);
        offset.chain(cells.iter().map(cell_text)).collect()
    });
    leading_rows.chain(used_rows).collect()
}

fn cell_text(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
