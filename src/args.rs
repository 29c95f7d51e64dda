use clap::Parser;

/// Resilience analysis of survey results, using the polygon-area method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The configuration of the survey: an Excel workbook with the sheets
    /// Settings, Likert_Mapping, Question_Mapping (and optionally Colors), or a JSON file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The survey results, as an Excel workbook or a CSV file. The first row
    /// must be the header.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv, optional) The type of the survey file. If not provided, it is deduced
    /// from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file for the survey, indicates the name
    /// of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an analysis in JSON format. If
    /// provided, the computed summary is checked against the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
