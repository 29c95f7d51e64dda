mod config;
pub mod builder;
pub mod manual;
mod normalize;
mod polygon;
mod rating;
mod stats;

use log::{debug, info};

use std::collections::HashSet;

pub use crate::config::*;
pub use crate::normalize::normalize;
pub use crate::polygon::polygon_area;
pub use crate::rating::{Rating, ResilienceLevel};
pub use crate::stats::{describe, mean, round2};

// **** Private structures ****

// The scores and the unmapped answers found in the column of one question.
#[derive(PartialEq, Debug, Clone)]
struct ColumnScan {
    scores: Vec<f64>,
    unmapped: Vec<String>,
}

/// Checks that the configuration can be applied to the survey.
///
/// Arguments:
/// * `rows` the survey, the first row being the header
/// * `config` the configuration of the survey
pub fn validate_survey(rows: &[Vec<Cell>], config: &SurveyConfig) -> Result<(), ScoringErrors> {
    config.validate()?;
    let header = rows.first().ok_or(ScoringErrors::EmptySurvey)?;
    if rows.len() < 2 {
        return Err(ScoringErrors::NoResponses);
    }
    config.check_columns(header.len())
}

/// Runs the analysis of a survey.
///
/// The first row is the header and is only used to check the number of columns.
/// Rows without any answer are not counted as respondents.
///
/// Arguments:
/// * `rows` the survey, the first row being the header
/// * `config` the configuration of the survey
pub fn aggregate(rows: &[Vec<Cell>], config: &SurveyConfig) -> Result<OverallResult, ScoringErrors> {
    validate_survey(rows, config)?;

    let responses: Vec<&Vec<Cell>> = rows[1..]
        .iter()
        .filter(|row| !row.iter().all(|c| c.is_blank()))
        .collect();
    info!(
        "aggregate: processing {} respondents ({} data rows), {} questions",
        responses.len(),
        rows.len() - 1,
        config.questions.len()
    );

    let scans: Vec<(QuestionResult, ColumnScan)> = config
        .questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let scan = scan_column(&responses, config.start_column + idx, &config.likert_map);
            let qr = QuestionResult {
                id: idx + 1,
                dimension: q.dimension,
                focus: q.focus.clone(),
                average_score: round2(mean(&scan.scores)),
                stats: describe(&scan.scores).rounded(),
            };
            debug!("aggregate: question {:?}", qr);
            (qr, scan)
        })
        .collect();

    let warnings = merge_warnings(scans.iter().map(|(_, scan)| scan.unmapped.as_slice()));
    let questions: Vec<QuestionResult> = scans.into_iter().map(|(qr, _)| qr).collect();

    let dimensions: Vec<DimensionResult> = Dimension::ALL
        .iter()
        .map(|d| score_dimension(*d, &questions))
        .collect();

    let total_area: f64 = dimensions.iter().map(|d| d.area).sum();
    let total_max_area: f64 = dimensions.iter().map(|d| d.max_area).sum();
    let overall_resilience = if total_max_area > 0.0 {
        total_area / total_max_area * 100.0
    } else {
        0.0
    };
    info!(
        "aggregate: overall resilience {:.2}% ({} unmapped answers)",
        overall_resilience,
        warnings.len()
    );

    Ok(OverallResult {
        dimensions,
        overall_resilience,
        total_respondents: responses.len(),
        warnings,
    })
}

fn scan_column(responses: &[&Vec<Cell>], column: usize, likert_map: &LikertMapping) -> ColumnScan {
    let mut scores: Vec<f64> = Vec::new();
    let mut unmapped: Vec<String> = Vec::new();
    let absent = Cell::Absent;
    for row in responses.iter() {
        // Short rows simply did not answer this question.
        let cell = row.get(column).unwrap_or(&absent);
        match (normalize(cell, likert_map), cell.answer_text()) {
            (Some(score), _) => scores.push(score as f64),
            (None, Some(raw)) => unmapped.push(raw),
            (None, None) => {}
        }
    }
    debug!(
        "scan_column: column {}: {} scores, {} unmapped",
        column,
        scores.len(),
        unmapped.len()
    );
    ColumnScan { scores, unmapped }
}

// Keeps the first occurrence of each answer.
fn merge_warnings<'a>(lists: impl Iterator<Item = &'a [String]>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for list in lists {
        for raw in list {
            if seen.insert(raw.as_str()) {
                res.push(raw.clone());
            }
        }
    }
    res
}

fn score_dimension(dimension: Dimension, questions: &[QuestionResult]) -> DimensionResult {
    let dim_questions: Vec<QuestionResult> = questions
        .iter()
        .filter(|q| q.dimension == dimension)
        .cloned()
        .collect();
    let scores: Vec<f64> = dim_questions.iter().map(|q| q.average_score).collect();
    let max_scores: Vec<f64> = vec![MAX_LIKERT_SCORE; scores.len()];

    let area = polygon_area(&scores);
    let max_area = polygon_area(&max_scores);
    let score = if max_area > 0.0 {
        area / max_area * 100.0
    } else {
        0.0
    };
    debug!(
        "score_dimension: {}: {} questions, area {:.4} / {:.4}",
        dimension,
        dim_questions.len(),
        area,
        max_area
    );
    DimensionResult {
        name: dimension,
        score,
        questions: dim_questions,
        area,
        max_area,
    }
}
