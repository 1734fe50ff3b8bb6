// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The content of one cell of a survey export.
///
/// Readers produce `Missing`, `Number` and `Text`. `Bool` comes out of
/// spreadsheets and out of the pacing recoding, and aggregates as 1 or 0.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Missing,
    Number(f64),
    Bool(bool),
    Text(String),
}

/// The markers that a dataframe reader treats as not available.
const NA_MARKERS: [&str; 11] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "#N/A", "<NA>", "None",
];

impl Cell {
    /// Interprets a raw string read from a text export.
    pub fn parse(raw: &str) -> Cell {
        if NA_MARKERS.contains(&raw) {
            return Cell::Missing;
        }
        match raw.trim().parse::<f64>() {
            Ok(x) if x.is_nan() => Cell::Missing,
            Ok(x) => Cell::Number(x),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// The numeric value of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(x) => Some(*x),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// The text shown for this cell in comment lists. Missing cells have none.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Number(x) => Some(x.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// A survey export: a header and rows of cells, addressed by position.
///
/// The header is kept for display only. It is never matched against the
/// names used by the topics.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct SurveyTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SurveyTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The cells of one column, in row order. Short rows yield `Missing`.
    pub fn column(&self, idx: usize) -> Vec<Cell> {
        self.rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(Cell::Missing))
            .collect()
    }

    /// The sub-table made of the given columns, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<SurveyTable, ReportError> {
        if let Some(max_idx) = indices.iter().max() {
            if *max_idx >= self.width() {
                return Err(ReportError::SchemaMismatch {
                    required: max_idx + 1,
                    found: self.width(),
                    row: None,
                });
            }
        }
        let header = indices.iter().map(|idx| self.header[*idx].clone()).collect();
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut sliced: Vec<Cell> = Vec::new();
            for idx in indices {
                let cell = row.get(*idx).ok_or(ReportError::SchemaMismatch {
                    required: idx + 1,
                    found: row.len(),
                    row: Some(row_idx),
                })?;
                sliced.push(cell.clone());
            }
            rows.push(sliced);
        }
        Ok(SurveyTable { header, rows })
    }
}

/// The feedback categories of the survey.
///
/// `All` covers every analyzed column at once. It can be sliced but has no
/// report of its own.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Topic {
    Gsi,
    Ai,
    Lab,
    Ed,
    OfficeHours,
    Lecture,
    Resources,
    All,
}

impl Topic {
    /// The topics with a report, in display order.
    pub const NAMED: [Topic; 7] = [
        Topic::Gsi,
        Topic::Ai,
        Topic::Lab,
        Topic::Ed,
        Topic::OfficeHours,
        Topic::Lecture,
        Topic::Resources,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Topic::Gsi => "GSI",
            Topic::Ai => "AI",
            Topic::Lab => "Lab",
            Topic::Ed => "Ed",
            Topic::OfficeHours => "Office Hours",
            Topic::Lecture => "Lecture",
            Topic::Resources => "Resources",
            Topic::All => "All",
        }
    }

    /// Parses a topic name. Case is ignored and underscores stand for spaces.
    pub fn from_name(name: &str) -> Option<Topic> {
        let normalized = name.trim().replace('_', " ").to_lowercase();
        match normalized.as_str() {
            "gsi" => Some(Topic::Gsi),
            "ai" => Some(Topic::Ai),
            "lab" => Some(Topic::Lab),
            "ed" => Some(Topic::Ed),
            "office hours" | "oh" => Some(Topic::OfficeHours),
            "lecture" => Some(Topic::Lecture),
            "resources" => Some(Topic::Resources),
            "all" => Some(Topic::All),
            _ => None,
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ******** Output data structures *********

/// Mean and sample standard deviation of one metric.
///
/// `count` is the number of non-missing values. With fewer than two values
/// the standard deviation is NaN, and with none the mean is NaN too.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct MetricStats {
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

impl MetricStats {
    pub fn is_degraded(&self) -> bool {
        self.count < 2
    }
}

/// Occurrences of each distinct option, most frequent first.
pub type OptionCounts = Vec<(String, usize)>;

/// The comment lists shared by the Ed and Office Hours topics.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct DiscussionFeedback {
    pub improvement: Vec<String>,
    pub other_feedback: Vec<String>,
    pub experienced: OptionCounts,
    pub elaborate: Vec<String>,
}

/// The part of a report that differs between topics.
#[derive(PartialEq, Debug, Clone)]
pub enum TopicDetails {
    Gsi {
        name: Option<String>,
        good: Vec<String>,
        bad: Vec<String>,
    },
    Ai {
        feedback: Vec<String>,
    },
    Lab {
        feedback: Vec<String>,
    },
    Ed {
        feedback: DiscussionFeedback,
    },
    OfficeHours {
        feedback: DiscussionFeedback,
        mode: OptionCounts,
    },
    Lecture {
        comments: Vec<String>,
        absorb: OptionCounts,
    },
    Resources {
        resources: OptionCounts,
    },
}

#[derive(PartialEq, Debug, Clone)]
pub struct TopicReport {
    pub topic: Topic,
    /// Statistics per metric, in column order.
    pub numbers: Vec<(String, MetricStats)>,
    pub details: TopicDetails,
}

impl TopicReport {
    pub fn metric(&self, name: &str) -> Option<&MetricStats> {
        self.numbers
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, stats)| stats)
    }
}

/// Errors that prevent a topic report from being produced.
#[derive(PartialEq, Debug, Clone)]
pub enum ReportError {
    /// The table does not have the columns the topics are bound to.
    SchemaMismatch {
        required: usize,
        found: usize,
        /// The data row at fault, or `None` for the header.
        row: Option<usize>,
    },
    /// A categorical answer is neither numeric nor covered by a recoding table.
    UnrecognizedCategory {
        topic: Topic,
        column: String,
        row: usize,
        value: String,
    },
    UnknownColumn {
        topic: Topic,
        column: String,
    },
    NotReportable {
        topic: Topic,
    },
}

impl Error for ReportError {}

impl Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::SchemaMismatch {
                required,
                found,
                row: None,
            } => write!(
                f,
                "schema mismatch: expected at least {} columns, the header has {}",
                required, found
            ),
            ReportError::SchemaMismatch {
                required,
                found,
                row: Some(row),
            } if found > required => write!(
                f,
                "schema mismatch: row {} has {} columns, the header only {}",
                row, found, required
            ),
            ReportError::SchemaMismatch {
                required,
                found,
                row: Some(row),
            } => write!(
                f,
                "schema mismatch: expected at least {} columns, row {} has {}",
                required, row, found
            ),
            ReportError::UnrecognizedCategory {
                topic,
                column,
                row,
                value,
            } => write!(
                f,
                "{}: unrecognized value {:?} in column {:?} (row {})",
                topic, value, column, row
            ),
            ReportError::UnknownColumn { topic, column } => {
                write!(f, "{}: no column named {:?}", topic, column)
            }
            ReportError::NotReportable { topic } => {
                write!(f, "topic {} has no report of its own", topic)
            }
        }
    }
}
