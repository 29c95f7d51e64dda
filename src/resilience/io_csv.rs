// Primitives for reading CSV files.

use resilience_scoring::Cell;

use crate::resilience::*;

/// Reads all the records of a CSV file, the header included.
///
/// Records may have different lengths. Empty fields are absent cells.
pub fn read_csv_survey(path: &str) -> AnResult<Vec<Vec<Cell>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let row: Vec<Cell> = line.iter().map(read_field).collect();
        debug!("read_csv_survey: lineno: {:?} row: {:?}", lineno, &row);
        res.push(row);
    }
    Ok(res)
}

fn read_field(s: &str) -> Cell {
    if s.trim().is_empty() {
        Cell::Absent
    } else {
        Cell::Text(s.to_string())
    }
}
