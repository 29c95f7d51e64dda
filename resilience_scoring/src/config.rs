// ********* Input data structures ***********

use log::warn;

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The highest score of the Likert scale.
///
/// Maximum areas are computed as if every question had been answered with this score.
pub const MAX_LIKERT_SCORE: f64 = 5.0;

/// Checks that the score of an answer label lies between 0 and `MAX_LIKERT_SCORE`.
pub fn check_likert_score(label: &str, score: i64) -> Result<(), ScoringErrors> {
    if score < 0 || score as f64 > MAX_LIKERT_SCORE {
        return Err(ScoringErrors::ScoreOutOfRange {
            label: label.trim().to_string(),
            score,
        });
    }
    Ok(())
}

/// The four resilience potentials a question can be assigned to.
///
/// The order of the variants is the canonical order used in all the outputs.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Dimension {
    Response,
    Monitor,
    Anticipate,
    Learn,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Response,
        Dimension::Monitor,
        Dimension::Anticipate,
        Dimension::Learn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Response => "Response",
            Dimension::Monitor => "Monitor",
            Dimension::Anticipate => "Anticipate",
            Dimension::Learn => "Learn",
        }
    }

    /// Parses a dimension tag, ignoring surrounding whitespace and case.
    pub fn parse(tag: &str) -> Option<Dimension> {
        let lower = tag.trim().to_lowercase();
        Dimension::ALL
            .iter()
            .find(|d| d.name().to_lowercase() == lower)
            .cloned()
    }

    /// The color used when the configuration does not provide one.
    pub fn default_color(&self) -> &'static str {
        match self {
            Dimension::Response => "#3b82f6",
            Dimension::Monitor => "#ef4444",
            Dimension::Anticipate => "#f97316",
            Dimension::Learn => "#22c55e",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The content of one cell of the survey, as read from a spreadsheet or a CSV file.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Absent,
    Text(String),
    Number(f64),
}

impl Cell {
    /// The raw string form of this cell, if it carries an answer.
    ///
    /// Blank cells and cells that only contain whitespace do not carry an answer.
    /// Integral numbers are written without a fractional part.
    pub fn answer_text(&self) -> Option<String> {
        let s = match self {
            Cell::Absent => return None,
            Cell::Text(s) => s.clone(),
            Cell::Number(x) if x.fract() == 0.0 && x.abs() < 1e15 => format!("{}", *x as i64),
            Cell::Number(x) => x.to_string(),
        };
        if s.trim().is_empty() {
            None
        } else {
            Some(s)
        }
    }

    pub fn is_blank(&self) -> bool {
        self.answer_text().is_none()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct LikertEntry {
    label: String,
    key: String,
    score: i64,
}

/// The mapping from the text of an answer to its score.
///
/// The labels are kept as entered (trimmed). Lookups ignore case and surrounding whitespace.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LikertMapping {
    entries: Vec<LikertEntry>,
}

impl LikertMapping {
    pub fn new() -> LikertMapping {
        LikertMapping {
            entries: Vec::new(),
        }
    }

    /// Adds an entry. Labels that are empty after trimming are ignored and false is returned.
    ///
    /// A label that is already present (up to case) takes the new score.
    pub fn insert(&mut self, label: &str, score: i64) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        let key = label.to_lowercase();
        if let Some(e) = self.entries.iter_mut().find(|e| e.key == key) {
            warn!(
                "LikertMapping: label {:?} is repeated, score {} replaced by {}",
                label, e.score, score
            );
            e.label = label.to_string();
            e.score = score;
            return true;
        }
        self.entries.push(LikertEntry {
            label: label.to_string(),
            key,
            score,
        });
        true
    }

    /// The score of the entry whose label matches exactly, up to case and whitespace.
    pub fn lookup(&self, answer: &str) -> Option<i64> {
        let key = answer.trim().to_lowercase();
        self.entries.iter().find(|e| e.key == key).map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|e| (e.label.as_str(), e.score))
    }
}

impl<S: AsRef<str>> FromIterator<(S, i64)> for LikertMapping {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut lm = LikertMapping::new();
        for (label, score) in iter {
            lm.insert(label.as_ref(), score);
        }
        lm
    }
}

/// One question of the survey.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionMapping {
    pub dimension: Dimension,
    pub focus: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyConfig {
    /// The 0-based column of the answers to the first question.
    pub start_column: usize,
    pub likert_map: LikertMapping,
    /// The questions, in the order of the columns of the survey.
    pub questions: Vec<QuestionMapping>,
    pub colors: Option<HashMap<Dimension, String>>,
}

impl SurveyConfig {
    /// Checks the structure of the configuration, independently of any survey.
    pub fn validate(&self) -> Result<(), ScoringErrors> {
        if self.questions.is_empty() {
            return Err(ScoringErrors::NoQuestions);
        }
        if self.likert_map.is_empty() {
            return Err(ScoringErrors::EmptyLikertMapping);
        }
        for (label, score) in self.likert_map.iter() {
            check_likert_score(label, score)?;
        }
        Ok(())
    }

    /// Checks that a survey with the given number of header columns holds all the questions.
    pub fn check_columns(&self, columns: usize) -> Result<(), ScoringErrors> {
        if self.start_column >= columns {
            return Err(ScoringErrors::StartColumnOutOfRange {
                start_column: self.start_column,
                columns,
            });
        }
        let required = self.start_column + self.questions.len();
        if required > columns {
            return Err(ScoringErrors::NotEnoughColumns {
                start_column: self.start_column,
                questions: self.questions.len(),
                required,
                columns,
            });
        }
        Ok(())
    }

    /// The display color of a dimension, falling back to the default palette.
    pub fn color(&self, dimension: Dimension) -> String {
        self.colors
            .as_ref()
            .and_then(|cs| cs.get(&dimension))
            .cloned()
            .unwrap_or_else(|| dimension.default_color().to_string())
    }
}

// ******** Output data structures *********

/// Descriptive statistics of the valid scores of one question.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct QuestionStats {
    pub n: usize,
    pub median: f64,
    pub mode: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct QuestionResult {
    /// 1-based position of the question in the configuration.
    pub id: usize,
    pub dimension: Dimension,
    pub focus: String,
    pub average_score: f64,
    pub stats: QuestionStats,
}

#[derive(PartialEq, Debug, Clone)]
pub struct DimensionResult {
    pub name: Dimension,
    /// Percentage of the maximum area, between 0 and 100.
    pub score: f64,
    pub questions: Vec<QuestionResult>,
    pub area: f64,
    pub max_area: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct OverallResult {
    /// One entry per dimension, in canonical order.
    pub dimensions: Vec<DimensionResult>,
    pub overall_resilience: f64,
    pub total_respondents: usize,
    /// The answers that could not be mapped to a score, without duplicates.
    pub warnings: Vec<String>,
}

impl OverallResult {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionResult> {
        self.dimensions.iter().find(|d| d.name == dimension)
    }
}

/// Errors that prevent the analysis from running.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    NoQuestions,
    EmptyLikertMapping,
    /// A dimension tag that is not one of the four potentials.
    /// The position is the 1-based index of the question.
    InvalidDimension {
        position: usize,
        tag: String,
    },
    /// The score of an answer label is negative or above `MAX_LIKERT_SCORE`.
    ScoreOutOfRange {
        label: String,
        score: i64,
    },
    EmptySurvey,
    NoResponses,
    StartColumnOutOfRange {
        start_column: usize,
        columns: usize,
    },
    NotEnoughColumns {
        start_column: usize,
        questions: usize,
        required: usize,
        columns: usize,
    },
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::NoQuestions => write!(f, "the configuration declares no questions"),
            ScoringErrors::EmptyLikertMapping => {
                write!(f, "the Likert mapping has no valid entries")
            }
            ScoringErrors::InvalidDimension { position, tag } => write!(
                f,
                "question {}: invalid potential '{}' (allowed: Response, Monitor, Anticipate, Learn)",
                position, tag
            ),
            ScoringErrors::ScoreOutOfRange { label, score } => write!(
                f,
                "the answer '{}' has the score {}, outside of the range 0 to {}",
                label, score, MAX_LIKERT_SCORE
            ),
            ScoringErrors::EmptySurvey => write!(f, "the survey has no header row"),
            ScoringErrors::NoResponses => {
                write!(f, "the survey only contains a header row")
            }
            ScoringErrors::StartColumnOutOfRange {
                start_column,
                columns,
            } => write!(
                f,
                "the start column is set to {}, but the survey only has {} columns",
                start_column, columns
            ),
            ScoringErrors::NotEnoughColumns {
                start_column,
                questions,
                required,
                columns,
            } => write!(
                f,
                "the configuration expects {} questions starting at column {} (requires {} columns), but the survey only has {} columns",
                questions, start_column, required, columns
            ),
        }
    }
}
