use crate::survey::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Course Feedback Analysis";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportTitle")]
    pub report_title: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyFileSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "surveyFileSource")]
    pub survey_file_source: Option<SurveyFileSource>,
    pub topics: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Csv,
    Xlsx,
}

impl Provider {
    pub fn from_name(name: &str) -> SurveyResult<Provider> {
        match name.trim().to_lowercase().as_str() {
            "csv" => Ok(Provider::Csv),
            "xlsx" | "excel" => Ok(Provider::Xlsx),
            _ => UnknownProviderSnafu { provider: name }.fail(),
        }
    }

    /// Guesses the provider from the file extension, CSV by default.
    pub fn from_path(path: &str) -> Provider {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") => Provider::Xlsx,
            _ => Provider::Csv,
        }
    }
}

/// Everything needed to run a report, once the configuration file and the
/// command line have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportSettings {
    pub title: String,
    pub input_path: String,
    pub provider: Provider,
    pub worksheet: Option<String>,
    pub topics: Vec<Topic>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub fn read_config(path: &str) -> SurveyResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Reads a summary produced by an earlier run, for comparison.
pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Parses topic names, expanding `all` into every named topic. Duplicates
/// are dropped, the first occurrence sets the order.
pub fn parse_topics(names: &[String]) -> SurveyResult<Vec<Topic>> {
    let mut res: Vec<Topic> = Vec::new();
    for name in names {
        let topic = Topic::from_name(name).context(UnknownTopicSnafu { name })?;
        let expanded: Vec<Topic> = if topic == Topic::All {
            Topic::NAMED.to_vec()
        } else {
            vec![topic]
        };
        for t in expanded {
            if !res.contains(&t) {
                res.push(t);
            }
        }
    }
    Ok(res)
}
