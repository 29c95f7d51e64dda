use log::{debug, info, warn};

use resilience_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::resilience::config_reader::read_config;
use crate::resilience::io_common::{simplify_file_name, InputType};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum AnalyzerError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Workbook {path} has no worksheet {sheet}"))]
    MissingWorksheet { path: String, sheet: String },
    #[snafu(display("Configuration file is missing sheets: {sheets}"))]
    MissingSheets { sheets: String },
    #[snafu(display(
        "Sheet 'Settings': could not locate a valid 'Start Column' value. It must be a number."
    ))]
    MissingStartColumn {},
    #[snafu(display(
        "Sheet 'Settings': the start column must be a non-negative integer, found {value}"
    ))]
    InvalidStartColumn { value: String },
    #[snafu(display("Sheet 'Question_Mapping': missing 'Potential' or 'Focus' column in row {row}"))]
    MissingQuestionColumns { row: usize },
    #[snafu(display(
        "Sheet 'Question_Mapping' row {row}: invalid potential '{value}'. Allowed: Response, Monitor, Anticipate, Learn."
    ))]
    InvalidPotential { row: usize, value: String },
    #[snafu(display("Sheet 'Likert_Mapping', row {row}: {source}"))]
    InvalidLikertScore { row: usize, source: ScoringErrors },
    #[snafu(display("Sheet '{sheet}': {source}"))]
    InvalidSheet {
        sheet: String,
        source: ScoringErrors,
    },
    #[snafu(display("Invalid configuration {path}: {source}"))]
    InvalidConfig {
        path: String,
        source: ScoringErrors,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of CSV file {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing argument --{name}"))]
    MissingArgument { name: String },
    #[snafu(display("Unknown input type {input_type:?} (expected xlsx or csv)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Survey data mismatch: {source}"))]
    Scoring { source: ScoringErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AnResult<T> = Result<T, AnalyzerError>;

/// The description of the run, written at the top of the summary.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub survey: String,
    pub configuration: String,
    #[serde(rename = "startColumn")]
    pub start_column: usize,
    pub questions: usize,
}

fn stats_to_json(stats: &QuestionStats) -> JSValue {
    json!({
        "n": stats.n,
        "median": stats.median,
        "mode": stats.mode,
        "stdDev": stats.std_dev,
        "min": stats.min,
        "max": stats.max,
    })
}

fn dimension_to_json(config: &SurveyConfig, dr: &DimensionResult) -> JSValue {
    let questions: Vec<JSValue> = dr
        .questions
        .iter()
        .map(|q| {
            json!({
                "id": q.id,
                "potential": q.dimension.name(),
                "focus": q.focus,
                "averageScore": q.average_score,
                "stats": stats_to_json(&q.stats),
            })
        })
        .collect();
    json!({
        "name": dr.name.name(),
        "score": round2(dr.score),
        "rating": Rating::from_score(dr.score).to_string(),
        "color": config.color(dr.name),
        "area": round2(dr.area),
        "maxArea": round2(dr.max_area),
        "questions": questions,
    })
}

fn result_to_json(config: &SurveyConfig, res: &OverallResult) -> JSValue {
    let dimensions: Vec<JSValue> = res
        .dimensions
        .iter()
        .map(|dr| dimension_to_json(config, dr))
        .collect();
    let strengths: Vec<&str> = res.strengths().iter().map(|d| d.name()).collect();
    let weaknesses: Vec<&str> = res.weaknesses().iter().map(|d| d.name()).collect();
    json!({
        "overallResilience": round2(res.overall_resilience),
        "level": res.level().to_string(),
        "totalRespondents": res.total_respondents,
        "warnings": res.warnings,
        "strengths": strengths,
        "weaknesses": weaknesses,
        "dimensions": dimensions,
    })
}

fn build_summary_js(
    survey_path: &str,
    config_path: &str,
    config: &SurveyConfig,
    res: &OverallResult,
) -> JSValue {
    let c = OutputConfig {
        survey: simplify_file_name(survey_path),
        configuration: simplify_file_name(config_path),
        start_column: config.start_column,
        questions: config.questions.len(),
    };
    json!({
        "config": c,
        "results": result_to_json(config, res) })
}

pub fn read_summary(path: &str) -> AnResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

/// Reads the survey, as rows of cells. The first row is the header.
fn read_survey(
    path: &str,
    input_type: Option<&str>,
    worksheet: Option<&str>,
) -> AnResult<Vec<Vec<Cell>>> {
    let it = match input_type {
        Some(s) => InputType::parse(s).context(UnknownInputTypeSnafu { input_type: s })?,
        None => InputType::from_path(path),
    };
    info!("Attempting to read survey file {:?} as {:?}", path, it);
    let rows = match it {
        InputType::Excel => io_excel::read_excel_survey(path, worksheet)?,
        InputType::Csv => io_csv::read_csv_survey(path)?,
    };
    debug!("read_survey: {} rows", rows.len());
    Ok(rows)
}

fn log_result(res: &OverallResult) {
    info!(
        "Overall resilience: {:.1}% ({}), {} respondents",
        res.overall_resilience,
        res.level(),
        res.total_respondents
    );
    for dr in res.dimensions.iter() {
        info!(
            "{:>12}: {:5.1}% {} ({} questions)",
            dr.name.name(),
            dr.score,
            Rating::from_score(dr.score),
            dr.questions.len()
        );
    }
    for raw in res.warnings.iter() {
        warn!(
            "Unmapped answer {:?}: excluded from the calculation, add it to the Likert mapping if it is valid",
            raw
        );
    }
}

/// Runs the analysis described by the arguments.
pub fn run_analysis(args: &Args) -> AnResult<()> {
    let config_path = args
        .config
        .clone()
        .context(MissingArgumentSnafu { name: "config" })?;
    let survey_path = args
        .input
        .clone()
        .context(MissingArgumentSnafu { name: "input" })?;

    let config = read_config(&config_path)?;
    info!(
        "config: start column {}, {} questions, {} Likert labels",
        config.start_column,
        config.questions.len(),
        config.likert_map.len()
    );

    let rows = read_survey(
        &survey_path,
        args.input_type.as_deref(),
        args.excel_worksheet_name.as_deref(),
    )?;

    let result = aggregate(&rows, &config).context(ScoringSnafu {})?;
    log_result(&result);

    let result_js = build_summary_js(&survey_path, &config_path, &config, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js)
        .context(ParsingJsonSnafu { path: "<summary>" })?;

    match args.out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(out_path) => {
            info!("Writing summary to {:?}", out_path);
            fs::write(out_path, &pretty_js_stats).context(WritingSummarySnafu { path: out_path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.as_deref() {
        check_reference(summary_p, &pretty_js_stats)?;
    }

    Ok(())
}

fn check_reference(summary_path: &str, pretty_js_stats: &str) -> AnResult<()> {
    let summary_ref = read_summary(summary_path)?;
    let pretty_js_summary_ref = serde_json::to_string_pretty(&summary_ref)
        .context(ParsingJsonSnafu { path: summary_path })?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary {:?}", summary_path);
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("Summary matches the reference {:?}", summary_path);
    Ok(())
}
