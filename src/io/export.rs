//! Export named integer columns to a one-sheet `.xlsx` workbook.
//!
//! Row 0 holds the headers; data follows one row per index, in the order the
//! columns are given. Rows are never reordered.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::AppError;

/// Write equal-length columns to `path`.
pub fn write_table_xlsx(path: &Path, columns: &[(&str, &[i64])]) -> Result<(), AppError> {
    let n_rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
    if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != n_rows) {
        return Err(AppError::new(
            4,
            format!(
                "Refusing to write '{}': column '{name}' has {} rows, expected {n_rows}.",
                path.display(),
                values.len()
            ),
        ));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, (name, values)) in columns.iter().enumerate() {
        let col = u16::try_from(col)
            .map_err(|_| AppError::new(4, format!("Too many columns for a worksheet: {}", columns.len())))?;

        worksheet
            .write_string(0, col, *name)
            .map_err(|e| AppError::new(4, format!("Failed to write header '{name}': {e}")))?;

        for (idx, value) in values.iter().enumerate() {
            let row = u32::try_from(idx + 1)
                .map_err(|_| AppError::new(4, format!("Too many rows for a worksheet: {n_rows}")))?;
            worksheet
                .write_number(row, col, *value as f64)
                .map_err(|e| AppError::new(4, format!("Failed to write '{name}' row {row}: {e}")))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| AppError::new(4, format!("Failed to save workbook '{}': {e}", path.display())))?;

    info!(path = %path.display(), columns = columns.len(), rows = n_rows, "workbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use calamine::{Reader, Xlsx, open_workbook};

    use super::*;

    /// Cell text of the first sheet, row by row.
    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn writes_a_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_table.xlsx");

        let trial: [i64; 3] = [0, 1, 2];
        let rt: [i64; 3] = [310, 0, 295];
        write_table_xlsx(&path, &[("trial", &trial), ("RT 1", &rt)]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn headers_then_one_row_per_index_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_rat.xlsx");

        let trial: [i64; 3] = [0, 1, 2];
        let subj_b: [i64; 3] = [7, 0, 0];
        let subj_a: [i64; 3] = [12, -4, 9];
        write_table_xlsx(&path, &[("trial", &trial), ("subjB", &subj_b), ("subjA", &subj_a)]).unwrap();

        let expected: Vec<Vec<String>> = [
            ["trial", "subjB", "subjA"],
            ["0", "7", "12"],
            ["1", "0", "-4"],
            ["2", "0", "9"],
        ]
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
        assert_eq!(read_back(&path), expected);
    }

    #[test]
    fn empty_columns_write_headers_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headers.xlsx");

        let empty: [i64; 0] = [];
        write_table_xlsx(&path, &[("trial", &empty), ("k", &empty)]).unwrap();

        assert_eq!(read_back(&path), vec![vec!["trial".to_string(), "k".to_string()]]);
    }

    #[test]
    fn rejects_ragged_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.xlsx");

        let err = write_table_xlsx(&path, &[("a", &[1, 2]), ("b", &[1])]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(!path.exists());
    }
}
