use std::collections::HashMap;

pub use crate::config::*;

/// A builder for survey configurations.
///
/// The configuration readers go through the builder so that all the configurations
/// are validated the same way.
///
/// ```
/// use resilience_scoring::builder::Builder;
/// # use resilience_scoring::ScoringErrors;
///
/// let mut builder = Builder::new(2);
/// builder.likert("Agree", 4).likert("Strongly Agree", 5);
/// builder.question("response", "1.1 Event Response")?;
/// builder.color("Response", "#123456");
///
/// let config = builder.build()?;
/// assert_eq!(config.questions.len(), 1);
///
/// # Ok::<(), ScoringErrors>(())
/// ```
pub struct Builder {
    start_column: usize,
    likert_map: LikertMapping,
    questions: Vec<QuestionMapping>,
    colors: HashMap<Dimension, String>,
}

impl Builder {
    pub fn new(start_column: usize) -> Builder {
        Builder {
            start_column,
            likert_map: LikertMapping::new(),
            questions: Vec::new(),
            colors: HashMap::new(),
        }
    }

    /// Adds an answer label with its score. Empty labels are dropped.
    pub fn likert(&mut self, label: &str, score: i64) -> &mut Builder {
        self.likert_map.insert(label, score);
        self
    }

    /// Adds the next question of the survey.
    ///
    /// The dimension tag is case-insensitive and must be one of the four potentials.
    pub fn question(&mut self, dimension: &str, focus: &str) -> Result<&mut Builder, ScoringErrors> {
        let dim = Dimension::parse(dimension).ok_or_else(|| ScoringErrors::InvalidDimension {
            position: self.questions.len() + 1,
            tag: dimension.trim().to_string(),
        })?;
        self.questions.push(QuestionMapping {
            dimension: dim,
            focus: focus.trim().to_string(),
        });
        Ok(self)
    }

    /// Sets the display color of a dimension. Unknown dimension tags are ignored.
    pub fn color(&mut self, dimension: &str, color: &str) -> &mut Builder {
        let color = color.trim();
        if let Some(dim) = Dimension::parse(dimension) {
            if !color.is_empty() {
                self.colors.insert(dim, color.to_string());
            }
        }
        self
    }

    pub fn build(self) -> Result<SurveyConfig, ScoringErrors> {
        let config = SurveyConfig {
            start_column: self.start_column,
            likert_map: self.likert_map,
            questions: self.questions,
            colors: if self.colors.is_empty() {
                None
            } else {
                Some(self.colors)
            },
        };
        config.validate()?;
        Ok(config)
    }
}
