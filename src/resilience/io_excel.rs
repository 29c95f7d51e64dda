// Primitives for reading Excel workbooks.

use calamine::{open_workbook_auto, DataType, Range, Reader};

use resilience_scoring::Cell;

use crate::resilience::*;

/// Reads the survey from a worksheet of a workbook, the header included.
///
/// Without a worksheet name, the first worksheet is used.
pub fn read_excel_survey(path: &str, worksheet_name: Option<&str>) -> AnResult<Vec<Vec<Cell>>> {
    debug!(
        "read_excel_survey: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningWorkbookSnafu { path })?;

    let wrange = if let Some(sheet) = worksheet_name {
        workbook
            .worksheet_range(sheet)
            .context(MissingWorksheetSnafu { path, sheet })?
            .context(OpeningWorkbookSnafu { path })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(MissingWorksheetSnafu {
                path,
                sheet: "<first>",
            })?
            .context(OpeningWorkbookSnafu { path })?
    };
    Ok(range_to_rows(&wrange))
}

/// Converts a worksheet to rows of cells.
pub fn range_to_rows(wrange: &Range<DataType>) -> Vec<Vec<Cell>> {
    wrange
        .rows()
        .map(|row| row.iter().map(read_cell).collect())
        .collect()
}

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(s) if s.trim().is_empty() => Cell::Absent,
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Float(f) => Cell::Number(*f),
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        DataType::Empty => Cell::Absent,
        // Formula errors carry no answer.
        _ => Cell::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(
            read_cell(&DataType::String("Agree".to_string())),
            Cell::Text("Agree".to_string())
        );
        assert_eq!(read_cell(&DataType::String(" ".to_string())), Cell::Absent);
        assert_eq!(read_cell(&DataType::Int(4)), Cell::Number(4.0));
        assert_eq!(read_cell(&DataType::Float(2.0)), Cell::Number(2.0));
        assert_eq!(read_cell(&DataType::Empty), Cell::Absent);
    }

    #[test]
    fn range_rows() {
        let mut r: Range<DataType> = Range::new((0, 0), (1, 2));
        r.set_value((0, 0), DataType::String("id".to_string()));
        r.set_value((0, 2), DataType::String("q1".to_string()));
        r.set_value((1, 2), DataType::Float(5.0));
        let rows = range_to_rows(&r);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                Cell::Text("id".to_string()),
                Cell::Absent,
                Cell::Text("q1".to_string())
            ]
        );
        assert_eq!(rows[1], vec![Cell::Absent, Cell::Absent, Cell::Number(5.0)]);
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_survey("/nonexistent/survey.xlsx", None);
        assert!(matches!(res, Err(AnalyzerError::OpeningWorkbook { .. })));
    }
}
