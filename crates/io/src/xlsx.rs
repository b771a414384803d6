// Excel import (xlsx, xlsm, xls, xlsb, ods) - first sheet only

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use hrdesk_recon::dates::from_excel_serial;
use hrdesk_recon::RawTable;

use crate::error::StoreError;

/// Rows beyond this are ignored; a roster is a few hundred people at most.
const MAX_ROWS: usize = 65536;

/// Read the first worksheet of a workbook into a raw table.
///
/// Leading blank rows are skipped; the first non-blank row is the header.
/// Fully blank data rows are skipped as well.
pub fn read_first_sheet(path: &Path) -> Result<RawTable, StoreError> {
    let workbook_err = |message: String| StoreError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| workbook_err(format!("failed to open: {e}")))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_err("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| workbook_err(format!("failed to read sheet '{first}': {e}")))?;

    let mut rows = range
        .rows()
        .take(MAX_ROWS)
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>())
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));

    let Some(header) = rows.next() else {
        log::debug!("sheet '{first}' in {} is empty", path.display());
        return Ok(RawTable::new());
    };
    let headers = header.into_iter().map(|h| h.trim().to_string()).collect();

    if range.height() > MAX_ROWS {
        log::warn!(
            "sheet '{first}' truncated from {} to {MAX_ROWS} rows",
            range.height()
        );
    }

    Ok(RawTable::from_rows(headers, rows.collect()))
}

/// Render a cell the way it would appear in a CSV export.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Integers without decimals: phone columns typed as numbers come through here
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            match from_excel_serial(serial) {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => format!("{serial}"),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_render_without_decimals() {
        assert_eq!(cell_to_string(&Data::Float(501112222.0)), "501112222");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("0501112222".into())), "0501112222");
    }
}
