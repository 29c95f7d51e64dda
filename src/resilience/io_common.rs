use std::path::Path;

/// The formats of survey files.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Excel,
    Csv,
}

impl InputType {
    pub fn parse(s: &str) -> Option<InputType> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "ods" | "excel" => Some(InputType::Excel),
            "csv" => Some(InputType::Csv),
            _ => None,
        }
    }

    /// Guesses the format from the extension. Anything but `.csv` is read as a workbook.
    pub fn from_path(path: &str) -> InputType {
        match file_extension(path).as_deref() {
            Some("csv") => InputType::Csv,
            _ => InputType::Excel,
        }
    }
}

pub fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_types() {
        assert_eq!(InputType::parse("XLSX"), Some(InputType::Excel));
        assert_eq!(InputType::parse("csv"), Some(InputType::Csv));
        assert_eq!(InputType::parse("pdf"), None);
        assert_eq!(InputType::from_path("/tmp/Survey.CSV"), InputType::Csv);
        assert_eq!(InputType::from_path("survey.xlsx"), InputType::Excel);
        assert_eq!(InputType::from_path("survey"), InputType::Excel);
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/a/b/survey.xlsx"), "survey.xlsx");
        assert_eq!(simplify_file_name("survey.csv"), "survey.csv");
        assert_eq!(file_extension("config.JSON"), Some("json".to_string()));
    }
}
