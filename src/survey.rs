use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topic_report::schema::SurveySchema;
use topic_report::*;

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;
use crate::survey::io_common::{resolve_path, simplify_file_name};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod render;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no worksheet or the worksheet is empty"))]
    EmptyExcel {},
    #[snafu(display("The workbook has no worksheet named {name:?}"))]
    MissingWorksheet { name: String },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown input type {provider:?} (expected csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown topic {name:?}"))]
    UnknownTopic { name: String },
    #[snafu(display("No survey export provided: use --input or a configuration file"))]
    MissingInput {},
    #[snafu(display("The layout of {path} does not match the survey"))]
    Schema { source: ReportError, path: String },
    #[snafu(display("{failed} topic report(s) could not be produced"))]
    TopicsFailed { failed: usize },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Merges the configuration file (if any) with the command line. Command
/// line options win.
pub fn settings_from_args(args: &Args) -> SurveyResult<ReportSettings> {
    let (config, config_root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path).parent().map(|p| p.to_path_buf());
            (Some(config), root)
        }
        None => (None, None),
    };
    let source = config.as_ref().and_then(|c| c.survey_file_source.clone());
    let output = config.as_ref().and_then(|c| c.output_settings.clone());

    let input_path = match (&args.input, &source) {
        (Some(p), _) => p.clone(),
        (None, Some(src)) => resolve_path(config_root.as_deref(), &src.file_path),
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    let provider_name = args
        .input_type
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.provider.clone()));
    let provider = match provider_name {
        Some(name) => Provider::from_name(&name)?,
        None => Provider::from_path(&input_path),
    };

    let worksheet = args
        .excel_worksheet_name
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.excel_worksheet_name.clone()));

    let topic_names: Option<Vec<String>> = args
        .topic
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.topics.clone()));
    let topics = match topic_names {
        Some(names) if !names.is_empty() => parse_topics(&names)?,
        _ => Topic::NAMED.to_vec(),
    };

    let out = args.out.clone().or_else(|| {
        output
            .as_ref()
            .and_then(|o| o.output_path.clone())
            .map(|p| resolve_path(config_root.as_deref(), &p))
    });
    let title = output
        .as_ref()
        .and_then(|o| o.report_title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(ReportSettings {
        title,
        input_path,
        provider,
        worksheet,
        topics,
        out,
        reference: args.reference.clone(),
    })
}

pub fn read_survey(settings: &ReportSettings) -> SurveyResult<SurveyTable> {
    info!(
        "Attempting to read survey file {:?} ({:?})",
        settings.input_path, settings.provider
    );
    let table = match settings.provider {
        Provider::Csv => io_csv::read_csv_survey(&settings.input_path),
        Provider::Xlsx => {
            io_excel::read_excel_survey(&settings.input_path, settings.worksheet.as_deref())
        }
    }?;
    // Readers already check, this covers tables built elsewhere.
    SurveySchema::course_feedback()
        .check(&table)
        .context(SchemaSnafu {
            path: settings.input_path.clone(),
        })?;
    Ok(table)
}

fn counts_to_json(counts: &OptionCounts) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (option, count) in counts {
        m.insert(option.clone(), json!(count));
    }
    JSValue::Object(m)
}

fn discussion_to_json(feedback: &DiscussionFeedback) -> JSValue {
    json!({
        "improvement": feedback.improvement,
        "other_feedback": feedback.other_feedback,
        "experienced": counts_to_json(&feedback.experienced),
        "elaborate": feedback.elaborate,
    })
}

/// The JSON form of a report. Undefined statistics become `null`.
pub fn report_to_json(report: &TopicReport) -> JSValue {
    let mut numbers: JSMap<String, JSValue> = JSMap::new();
    for (name, stats) in report.numbers.iter() {
        numbers.insert(name.clone(), json!({"mean": stats.mean, "std": stats.std}));
    }
    let numbers = JSValue::Object(numbers);
    match &report.details {
        TopicDetails::Gsi { name, good, bad } => json!({
            "numbers": numbers,
            "name": name,
            "feedback": {"good": good, "bad": bad},
        }),
        TopicDetails::Ai { feedback } | TopicDetails::Lab { feedback } => json!({
            "numbers": numbers,
            "feedback": feedback,
        }),
        TopicDetails::Ed { feedback } => json!({
            "numbers": numbers,
            "feedback": discussion_to_json(feedback),
        }),
        TopicDetails::OfficeHours { feedback, mode } => json!({
            "numbers": numbers,
            "feedback": discussion_to_json(feedback),
            "mode": counts_to_json(mode),
        }),
        TopicDetails::Lecture { comments, absorb } => json!({
            "numbers": numbers,
            "feedback": {"comments": comments, "absorb": counts_to_json(absorb)},
        }),
        TopicDetails::Resources { resources } => json!({
            "numbers": numbers,
            "resources": counts_to_json(resources),
        }),
    }
}

fn build_summary_js(
    settings: &ReportSettings,
    table: &SurveyTable,
    outcomes: &[(Topic, Result<TopicReport, ReportError>)],
) -> JSValue {
    let mut reports: JSMap<String, JSValue> = JSMap::new();
    let mut errors: JSMap<String, JSValue> = JSMap::new();
    for (topic, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                reports.insert(topic.label().to_string(), report_to_json(report));
            }
            Err(e) => {
                errors.insert(topic.label().to_string(), json!(e.to_string()));
            }
        }
    }
    json!({
        "title": settings.title,
        "source": simplify_file_name(&settings.input_path),
        "responses": table.num_rows(),
        "reports": reports,
        "errors": errors,
    })
}

/// Computes every requested topic. A failing topic does not stop the others.
pub fn build_reports(
    table: &SurveyTable,
    topics: &[Topic],
) -> Vec<(Topic, Result<TopicReport, ReportError>)> {
    topics
        .iter()
        .map(|topic| {
            let outcome = build_topic_report(table, *topic);
            if let Err(e) = &outcome {
                warn!("The {} report failed: {}", topic, e);
            }
            (*topic, outcome)
        })
        .collect()
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between the computed summary and the reference summary")
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run_report(settings: &ReportSettings) -> SurveyResult<()> {
    debug!("run_report: settings: {:?}", settings);
    let table = read_survey(settings)?;

    let outcomes = build_reports(&table, &settings.topics);

    let result_js = build_summary_js(settings, &table, &outcomes);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match settings.out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(out_path) => {
            print!("{}", render::render_markdown(&settings.title, &outcomes));
            fs::write(out_path, &pretty_js_stats).context(WritingOutputSnafu { path: out_path })?;
            info!("Summary written to {:?}", out_path);
        }
        None => print!("{}", render::render_markdown(&settings.title, &outcomes)),
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    let failed = outcomes.iter().filter(|(_, o)| o.is_err()).count();
    if failed > 0 {
        return TopicsFailedSnafu { failed }.fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_report::builder::TableBuilder;

    fn ai_table() -> SurveyTable {
        let mut builder = TableBuilder::with_width(70);
        builder
            .add_row_at(&[(65, "Excellent"), (66, "Good"), (68, "Slower")])
            .unwrap();
        builder.add_row_at(&[(65, "Average"), (28, "4")]).unwrap();
        builder.build().unwrap()
    }

    fn args(input: &str) -> Args {
        Args {
            config: None,
            input: Some(input.to_string()),
            input_type: None,
            excel_worksheet_name: None,
            topic: None,
            out: None,
            reference: None,
            verbose: false,
        }
    }

    #[test]
    fn report_json_shape() {
        let table = ai_table();
        let report = build_topic_report(&table, Topic::Resources).unwrap();
        let js = report_to_json(&report);
        let textbook = &js["numbers"]["How Helpful is the textbook?"];
        assert_eq!(textbook["mean"], json!(0.8));
        // A single answer has no standard deviation.
        assert_eq!(textbook["std"], JSValue::Null);
        assert_eq!(js["resources"], json!({}));
    }

    #[test]
    fn report_json_keeps_the_report_order() {
        let mut builder = TableBuilder::with_width(70);
        builder
            .add_row_at(&[(1, "Zeta, Alpha"), (65, "Excellent"), (66, "Average")])
            .unwrap();
        builder.add_row_at(&[(1, "Zeta"), (67, "Excellent")]).unwrap();
        let table = builder.build().unwrap();

        let resources = report_to_json(&build_topic_report(&table, Topic::Resources).unwrap());
        let options: Vec<(&String, &JSValue)> =
            resources["resources"].as_object().unwrap().iter().collect();
        assert_eq!(
            options,
            vec![(&"Zeta".to_string(), &json!(2)), (&"Alpha".to_string(), &json!(1))]
        );

        let ai = report_to_json(&build_topic_report(&table, Topic::Ai).unwrap());
        let metrics: Vec<&String> = ai["numbers"].as_object().unwrap().keys().collect();
        assert_eq!(metrics, vec!["Approachability", "Helpfulness", "Clarity"]);
    }

    #[test]
    fn failing_topics_are_listed_separately() {
        let table = ai_table();
        let outcomes = build_reports(&table, &[Topic::Ai, Topic::Resources]);
        assert!(outcomes[0].1.is_err());
        assert!(outcomes[1].1.is_ok());
        let settings = settings_from_args(&args("exports/responses.csv")).unwrap();
        let js = build_summary_js(&settings, &table, &outcomes);
        assert_eq!(js["source"], json!("responses.csv"));
        assert_eq!(js["responses"], json!(2));
        assert!(js["errors"]["AI"].as_str().unwrap().contains("Good"));
        assert!(js["reports"]["Resources"].is_object());
        assert!(js["reports"].get("AI").is_none());
    }

    #[test]
    fn settings_defaults() {
        let settings = settings_from_args(&args("responses.xlsx")).unwrap();
        assert_eq!(settings.provider, Provider::Xlsx);
        assert_eq!(settings.topics, Topic::NAMED.to_vec());
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(settings.out, None);
    }

    #[test]
    fn settings_need_an_input() {
        let mut a = args("x.csv");
        a.input = None;
        assert!(matches!(
            settings_from_args(&a),
            Err(SurveyError::MissingInput {})
        ));
    }

    #[test]
    fn settings_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("report.json");
        fs::write(
            &config_path,
            r#"{"surveyFileSource": {"filePath": "responses.txt", "provider": "csv"},
                "outputSettings": {"reportTitle": "Fall feedback"},
                "topics": ["lab", "AI"]}"#,
        )
        .unwrap();
        let mut a = args("unused");
        a.input = None;
        a.config = Some(config_path.display().to_string());
        a.topic = Some(vec!["Lecture".to_string()]);
        let settings = settings_from_args(&a).unwrap();
        assert_eq!(
            settings.input_path,
            dir.path().join("responses.txt").display().to_string()
        );
        assert_eq!(settings.provider, Provider::Csv);
        assert_eq!(settings.title, "Fall feedback");
        // The command line wins over the configuration.
        assert_eq!(settings.topics, vec![Topic::Lecture]);
    }

    #[test]
    fn run_report_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("responses.csv");
        let mut wtr = csv::Writer::from_path(&input).unwrap();
        let header: Vec<String> = (0..70).map(|i| format!("Q{}", i)).collect();
        wtr.write_record(&header).unwrap();
        for answer in ["Excellent", "Average", "Needs Improvement"] {
            let mut row = vec![String::new(); 70];
            row[0] = "2023-10-02".to_string();
            row[65] = answer.to_string();
            wtr.write_record(&row).unwrap();
        }
        wtr.flush().unwrap();

        let out = dir.path().join("summary.json");
        let mut a = args(input.to_str().unwrap());
        a.topic = Some(vec!["AI".to_string()]);
        a.out = Some(out.display().to_string());
        let settings = settings_from_args(&a).unwrap();
        run_report(&settings).unwrap();

        let js = read_summary(out.to_str().unwrap()).unwrap();
        let approachability = &js["reports"]["AI"]["numbers"]["Approachability"];
        assert_eq!(approachability["mean"], json!(0.5));
        assert_eq!(approachability["std"], json!(0.5));

        // The summary is its own reference.
        let mut again = settings.clone();
        again.out = None;
        again.reference = Some(out.display().to_string());
        run_report(&again).unwrap();
    }

    #[test]
    fn run_report_with_a_failing_topic() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("responses.csv");
        let mut wtr = csv::Writer::from_path(&input).unwrap();
        let header: Vec<String> = (0..70).map(|i| format!("Q{}", i)).collect();
        wtr.write_record(&header).unwrap();
        for (answer, textbook) in [("Excellent", "4"), ("Superb", "5")] {
            let mut row = vec![String::new(); 70];
            row[28] = textbook.to_string();
            row[65] = answer.to_string();
            wtr.write_record(&row).unwrap();
        }
        wtr.flush().unwrap();

        let out = dir.path().join("summary.json");
        let mut a = args(input.to_str().unwrap());
        a.topic = Some(vec!["AI".to_string(), "Resources".to_string()]);
        a.out = Some(out.display().to_string());
        let settings = settings_from_args(&a).unwrap();
        assert!(matches!(
            run_report(&settings),
            Err(SurveyError::TopicsFailed { failed: 1 })
        ));

        // The summary is still written, with the other topic in it.
        let js = read_summary(out.to_str().unwrap()).unwrap();
        assert!(js["errors"]["AI"].as_str().unwrap().contains("Superb"));
        assert!(js["reports"].get("AI").is_none());
        let textbook = &js["reports"]["Resources"]["numbers"]["How Helpful is the textbook?"];
        assert_eq!(textbook["mean"], json!(0.9));
    }
}
