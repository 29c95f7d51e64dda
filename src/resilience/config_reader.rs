use std::collections::HashMap;

use calamine::{open_workbook_auto, Reader};

use resilience_scoring::builder::Builder;
use resilience_scoring::{check_likert_score, Cell, ScoringErrors, SurveyConfig};

use serde::{Deserialize, Serialize};

use crate::resilience::io_common::file_extension;
use crate::resilience::io_excel::range_to_rows;
use crate::resilience::*;

pub const SETTINGS_SHEET: &str = "Settings";
pub const LIKERT_SHEET: &str = "Likert_Mapping";
pub const QUESTIONS_SHEET: &str = "Question_Mapping";
pub const COLORS_SHEET: &str = "Colors";

const START_COLUMN_MARKERS: [&str; 3] = ["start", "begin", "起始"];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonLikertEntry {
    pub answer: String,
    pub score: i64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonQuestion {
    #[serde(alias = "dimension")]
    pub potential: String,
    pub focus: String,
}

/// The configuration of a survey, in JSON format.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonSurveyConfig {
    #[serde(rename = "startColumn")]
    pub start_column: usize,
    #[serde(rename = "likertMap")]
    pub likert_map: Vec<JsonLikertEntry>,
    pub questions: Vec<JsonQuestion>,
    pub colors: Option<HashMap<String, String>>,
}

/// The content of the sheets of a configuration workbook.
#[derive(PartialEq, Debug, Clone)]
pub struct ConfigSheets {
    pub settings: Vec<Vec<Cell>>,
    pub likert: Vec<Vec<Cell>>,
    pub questions: Vec<Vec<Cell>>,
    pub colors: Option<Vec<Vec<Cell>>>,
}

/// Reads a configuration, either from a JSON file (`.json` extension) or from a workbook.
pub fn read_config(path: &str) -> AnResult<SurveyConfig> {
    info!("Attempting to read configuration file {:?}", path);
    match file_extension(path).as_deref() {
        Some("json") => read_json_config(path),
        _ => read_workbook_config(path),
    }
}

fn read_json_config(path: &str) -> AnResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let jc: JsonSurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_json_config: {:?}", jc);

    let mut builder = Builder::new(jc.start_column);
    for e in jc.likert_map.iter() {
        builder.likert(&e.answer, e.score);
    }
    for q in jc.questions.iter() {
        builder
            .question(&q.potential, &q.focus)
            .context(InvalidConfigSnafu { path })?;
    }
    for (dim, color) in jc.colors.iter().flatten() {
        builder.color(dim, color);
    }
    builder.build().context(InvalidConfigSnafu { path })
}

fn read_workbook_config(path: &str) -> AnResult<SurveyConfig> {
    let mut workbook = open_workbook_auto(path).context(OpeningWorkbookSnafu { path })?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    debug!("read_workbook_config: sheets: {:?}", sheet_names);

    let missing: Vec<&str> = [SETTINGS_SHEET, LIKERT_SHEET, QUESTIONS_SHEET]
        .iter()
        .filter(|s| !sheet_names.iter().any(|n| n == *s))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return MissingSheetsSnafu {
            sheets: missing.join(", "),
        }
        .fail();
    }

    let mut sheet_rows = |sheet: &str| -> AnResult<Vec<Vec<Cell>>> {
        let wrange = workbook
            .worksheet_range(sheet)
            .context(MissingWorksheetSnafu { path, sheet })?
            .context(OpeningWorkbookSnafu { path })?;
        Ok(range_to_rows(&wrange))
    };

    let sheets = ConfigSheets {
        settings: sheet_rows(SETTINGS_SHEET)?,
        likert: sheet_rows(LIKERT_SHEET)?,
        questions: sheet_rows(QUESTIONS_SHEET)?,
        colors: if sheet_names.iter().any(|n| n == COLORS_SHEET) {
            Some(sheet_rows(COLORS_SHEET)?)
        } else {
            None
        },
    };
    parse_config_sheets(&sheets)
}

/// Builds the configuration out of the content of the sheets of a workbook.
pub fn parse_config_sheets(sheets: &ConfigSheets) -> AnResult<SurveyConfig> {
    let start_column = read_start_column(&sheets.settings)?;
    debug!("parse_config_sheets: start column: {}", start_column);
    let mut builder = Builder::new(start_column);

    let num_labels = read_likert(&sheets.likert, &mut builder)?;
    if num_labels == 0 {
        return Err(AnalyzerError::InvalidSheet {
            sheet: LIKERT_SHEET.to_string(),
            source: ScoringErrors::EmptyLikertMapping,
        });
    }

    let num_questions = read_questions(&sheets.questions, &mut builder)?;
    if num_questions == 0 {
        return Err(AnalyzerError::InvalidSheet {
            sheet: QUESTIONS_SHEET.to_string(),
            source: ScoringErrors::NoQuestions,
        });
    }

    if let Some(rows) = sheets.colors.as_ref() {
        read_colors(rows, &mut builder);
    }

    builder.build().context(InvalidSheetSnafu {
        sheet: QUESTIONS_SHEET,
    })
}

// The first row mentioning the start column holds its value: the first number of the row,
// or else the first short text that is an integer.
fn read_start_column(rows: &[Vec<Cell>]) -> AnResult<usize> {
    let row = rows
        .iter()
        .find(|row| {
            row.iter().any(|c| match c.answer_text() {
                Some(s) => {
                    let s = s.to_lowercase();
                    START_COLUMN_MARKERS.iter().any(|m| s.contains(m))
                }
                None => false,
            })
        })
        .context(MissingStartColumnSnafu {})?;
    debug!("read_start_column: row: {:?}", row);

    let number = row.iter().find_map(|c| match c {
        Cell::Number(x) => Some(*x),
        _ => None,
    });
    if let Some(x) = number {
        if x < 0.0 || x.fract() != 0.0 {
            return InvalidStartColumnSnafu {
                value: x.to_string(),
            }
            .fail();
        }
        return Ok(x as usize);
    }

    let parsed = row.iter().find_map(|c| match c {
        Cell::Text(s) if s.trim().chars().count() < 5 => s.trim().parse::<i64>().ok(),
        _ => None,
    });
    match parsed {
        Some(x) if x >= 0 => Ok(x as usize),
        Some(x) => InvalidStartColumnSnafu {
            value: x.to_string(),
        }
        .fail(),
        None => MissingStartColumnSnafu {}.fail(),
    }
}

// Rows with an empty label or a score that is not an integer are skipped.
fn read_likert(rows: &[Vec<Cell>], builder: &mut Builder) -> AnResult<usize> {
    let mut count = 0;
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let label = row.first().and_then(|c| c.answer_text());
        let score = row.get(1).and_then(read_score);
        match (label, score) {
            (Some(label), Some(score)) => {
                check_likert_score(&label, score).context(InvalidLikertScoreSnafu { row: idx + 1 })?;
                builder.likert(&label, score);
                count += 1;
            }
            _ => {
                debug!("read_likert: skipping row {}: {:?}", idx + 1, row);
            }
        }
    }
    Ok(count)
}

fn read_score(cell: &Cell) -> Option<i64> {
    let x = match cell {
        Cell::Number(x) => *x,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        Cell::Absent => return None,
    };
    if x.is_finite() && x.fract() == 0.0 {
        Some(x as i64)
    } else {
        None
    }
}

fn read_questions(rows: &[Vec<Cell>], builder: &mut Builder) -> AnResult<usize> {
    let header = match rows.first() {
        Some(h) => h,
        None => return Ok(0),
    };
    let find_col = |names: &[&str]| {
        header.iter().position(|c| match c.answer_text() {
            Some(s) => names.contains(&s.trim().to_lowercase().as_str()),
            None => false,
        })
    };
    let potential_col = find_col(&["potential", "dimension"]);
    let focus_col = find_col(&["focus"]);
    debug!(
        "read_questions: potential column: {:?} focus column: {:?}",
        potential_col, focus_col
    );

    let mut count = 0;
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.iter().all(|c| c.is_blank()) {
            continue;
        }
        let lineno = idx + 1;
        let cell_text = |col: Option<usize>| col.and_then(|i| row.get(i)).and_then(|c| c.answer_text());
        let (potential, focus) = match (cell_text(potential_col), cell_text(focus_col)) {
            (Some(p), Some(f)) => (p, f),
            _ => return MissingQuestionColumnsSnafu { row: lineno }.fail(),
        };
        builder
            .question(&potential, &focus)
            .map_err(|_| AnalyzerError::InvalidPotential {
                row: lineno,
                value: potential.trim().to_string(),
            })?;
        count += 1;
    }
    Ok(count)
}

fn read_colors(rows: &[Vec<Cell>], builder: &mut Builder) {
    for row in rows.iter().skip(1) {
        let dim = row.first().and_then(|c| c.answer_text());
        let color = row.get(1).and_then(|c| c.answer_text());
        if let (Some(dim), Some(color)) = (dim, color) {
            builder.color(&dim, &color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resilience_scoring::Dimension;
    use std::fs;

    fn t(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sheets() -> ConfigSheets {
        ConfigSheets {
            settings: vec![
                vec![t("項目"), t("值")],
                vec![t("問題起始欄位"), Cell::Number(2.0)],
            ],
            likert: vec![
                vec![t("回答選項"), t("分數")],
                vec![t("非常不同意"), Cell::Number(1.0)],
                vec![t("Neutral"), t("3")],
                vec![t("Agree")],
                vec![t("Half"), Cell::Number(2.5)],
                vec![Cell::Absent, Cell::Number(4.0)],
                vec![t("Strongly Agree"), Cell::Number(5.0)],
            ],
            questions: vec![
                vec![t("Potential"), t("Focus")],
                vec![t("Response"), t("1.1 Event Response")],
                vec![t("response"), t("1.2 Speed")],
                vec![Cell::Absent, Cell::Absent],
                vec![t("MONITOR"), t("2.1 Indicators")],
            ],
            colors: Some(vec![
                vec![t("Potential"), t("Color (Hex/Name)")],
                vec![t("learn"), t("#000000")],
                vec![t("Recover"), t("#ffffff")],
            ]),
        }
    }

    #[test]
    fn parse_sheets() {
        let config = parse_config_sheets(&sheets()).unwrap();
        assert_eq!(config.start_column, 2);
        assert_eq!(config.likert_map.len(), 3);
        assert_eq!(config.likert_map.lookup("neutral"), Some(3));
        assert_eq!(config.likert_map.lookup("Half"), None);
        assert_eq!(config.questions.len(), 3);
        assert_eq!(config.questions[1].dimension, Dimension::Response);
        assert_eq!(config.questions[2].dimension, Dimension::Monitor);
        assert_eq!(config.questions[2].focus, "2.1 Indicators");
        assert_eq!(config.color(Dimension::Learn), "#000000");
        assert_eq!(config.color(Dimension::Response), "#3b82f6");
    }

    #[test]
    fn start_column() {
        let rows = vec![vec![t("Start Column"), t("3")]];
        assert_eq!(read_start_column(&rows).unwrap(), 3);
        let rows = vec![vec![t("Begin at"), Cell::Number(0.0)]];
        assert_eq!(read_start_column(&rows).unwrap(), 0);
        let rows = vec![vec![t("Start Column"), t("three")]];
        assert!(matches!(
            read_start_column(&rows),
            Err(AnalyzerError::MissingStartColumn {})
        ));
        let rows = vec![vec![t("Other"), Cell::Number(2.0)]];
        assert!(matches!(
            read_start_column(&rows),
            Err(AnalyzerError::MissingStartColumn {})
        ));
        let rows = vec![vec![t("Start Column"), Cell::Number(1.5)]];
        assert!(matches!(
            read_start_column(&rows),
            Err(AnalyzerError::InvalidStartColumn { .. })
        ));
    }

    #[test]
    fn empty_likert_mapping() {
        let mut s = sheets();
        s.likert = vec![vec![t("回答選項"), t("分數")], vec![t("Agree"), t("a lot")]];
        match parse_config_sheets(&s) {
            Err(AnalyzerError::InvalidSheet { sheet, source }) => {
                assert_eq!(sheet, LIKERT_SHEET);
                assert_eq!(source, ScoringErrors::EmptyLikertMapping);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn likert_scores_out_of_range() {
        let mut s = sheets();
        s.likert.push(vec![t("Outstanding"), Cell::Number(10.0)]);
        match parse_config_sheets(&s) {
            Err(AnalyzerError::InvalidLikertScore { row, source }) => {
                assert_eq!(row, 8);
                assert_eq!(
                    source,
                    ScoringErrors::ScoreOutOfRange {
                        label: "Outstanding".to_string(),
                        score: 10
                    }
                );
            }
            x => panic!("unexpected result {:?}", x),
        }

        let mut s = sheets();
        s.likert.insert(1, vec![t("Awful"), t("-5")]);
        assert!(matches!(
            parse_config_sheets(&s),
            Err(AnalyzerError::InvalidLikertScore { row: 2, .. })
        ));
    }

    #[test]
    fn likert_repeated_label() {
        let mut s = sheets();
        s.likert.push(vec![t("neutral"), Cell::Number(4.0)]);
        let config = parse_config_sheets(&s).unwrap();
        assert_eq!(config.likert_map.len(), 3);
        assert_eq!(config.likert_map.lookup("Neutral"), Some(4));
    }

    #[test]
    fn invalid_questions() {
        let mut s = sheets();
        s.questions.push(vec![t("Recover"), t("5.1")]);
        match parse_config_sheets(&s) {
            Err(AnalyzerError::InvalidPotential { row, value }) => {
                assert_eq!(row, 6);
                assert_eq!(value, "Recover");
            }
            x => panic!("unexpected result {:?}", x),
        }

        let mut s = sheets();
        s.questions.push(vec![t("Learn")]);
        assert!(matches!(
            parse_config_sheets(&s),
            Err(AnalyzerError::MissingQuestionColumns { row: 6 })
        ));

        let mut s = sheets();
        s.questions = vec![vec![t("Potential"), t("Focus")]];
        assert!(matches!(
            parse_config_sheets(&s),
            Err(AnalyzerError::InvalidSheet { .. })
        ));
    }

    #[test]
    fn json_config() {
        let dir = std::env::temp_dir().join(format!("rag-resilience-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("config.json");
        fs::write(
            &p,
            r##"{"startColumn": 0,
                "likertMap": [{"answer": "Yes", "score": 5}, {"answer": "No", "score": 1}],
                "questions": [{"dimension": "anticipate", "focus": "3.1 Risk Forecast"}]}"##,
        )
        .unwrap();
        let config = read_config(&p.display().to_string()).unwrap();
        assert_eq!(config.questions[0].dimension, Dimension::Anticipate);
        assert_eq!(config.likert_map.lookup("yes"), Some(5));
        assert_eq!(config.colors, None);

        let bad = dir.join("bad.json");
        fs::write(
            &bad,
            r#"{"startColumn": 0, "likertMap": [], "questions": [{"potential": "Learn", "focus": "4.1"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            read_config(&bad.display().to_string()),
            Err(AnalyzerError::InvalidConfig { .. })
        ));
        let above = dir.join("above.json");
        fs::write(
            &above,
            r#"{"startColumn": 0, "likertMap": [{"answer": "Outstanding", "score": 10}], "questions": [{"potential": "Learn", "focus": "4.1"}]}"#,
        )
        .unwrap();
        match read_config(&above.display().to_string()) {
            Err(AnalyzerError::InvalidConfig { source, .. }) => assert_eq!(
                source,
                ScoringErrors::ScoreOutOfRange {
                    label: "Outstanding".to_string(),
                    score: 10
                }
            ),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn missing_workbook() {
        assert!(matches!(
            read_config("/nonexistent/config.xlsx"),
            Err(AnalyzerError::OpeningWorkbook { .. })
        ));
    }
}
