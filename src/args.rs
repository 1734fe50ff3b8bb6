use clap::Parser;

/// Produces per-topic reports from a course feedback survey export.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the survey export, the topics and the output.
    /// Relative paths in this file are resolved against its directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The survey export. Setting this option overrides the path that may be specified
    /// with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first worksheet
    /// is used otherwise.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (topic name, repeatable) The topics to report on: GSI, AI, Lab, Ed, "Office Hours", Lecture,
    /// Resources or all. All the topics are reported by default.
    #[clap(short, long, value_parser)]
    pub topic: Option<Vec<String>>,

    /// (file path, 'stdout' or empty) If specified, the summary of the reports will be written in
    /// JSON format to the given location. With 'stdout', only the JSON summary is printed.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, the computed summary is
    /// checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
