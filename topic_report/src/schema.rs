//! Binding of the topics to the positional columns of the survey export.

use log::debug;

use crate::config::*;

/// Column 0 holds the submission timestamp and is never analyzed.
pub const FIRST_ANALYZED_COLUMN: usize = 1;

const RESOURCES_COLUMNS: [usize; 2] = [1, 28];
const LECTURE_COLUMNS: [usize; 5] = [24, 25, 26, 27, 29];
const LAB_EXTRA_COLUMN: usize = 69;

pub const GSI_NAMES: [&str; 12] = [
    "Name",
    "Worksheet Pacing",
    "Overall",
    "Preparedness",
    "Section Pacing",
    "Clarity",
    "Approachability",
    "Atmosphere",
    "Promotes Discussion",
    "Email Responsiveness",
    "Does Well",
    "Could Improve",
];

pub const AI_NAMES: [&str; 4] = ["Approachability", "Helpfulness", "Clarity", "Improvement"];

pub const LAB_NAMES: [&str; 8] = [
    "Worksheet Helpfulness",
    "Worksheet Length",
    "Worksheet Difficulty",
    "Notebook Helpfulness",
    "Notebook Length",
    "Notebook Difficulty",
    "Minutes Spent on Notebook Outside of Lab",
    "Comments",
];

pub const ED_NAMES: [&str; 14] = [
    "Post Frequency",
    "How Can We Improve",
    "Homework Use",
    "Lab Use",
    "Project Use",
    "Discussion Use",
    "Lecture Use",
    "Clarity",
    "Attitude",
    "Response Time",
    "Experienced",
    "Elaborate",
    "Other Feedback",
    "Quality",
];

pub const OFFICE_HOURS_NAMES: [&str; 22] = [
    "Attended",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Modality",
    "How Can We Improve",
    "Non-project wait",
    "Project wait",
    "Homework Use",
    "Lab Use",
    "Project Use",
    "Discussion Use",
    "Lecture Use",
    "Clarity",
    "Approachability",
    "Atmosphere",
    "Experienced",
    "Elaborate",
    "Other Feedback",
    "Quality",
];

pub const LECTURE_NAMES: [&str; 5] = [
    "Absorb Lecture",
    "Helpfulness",
    "Pacing",
    "Composition (0=all slides, 5=all demo)",
    "Comments",
];

pub const RESOURCES_NAMES: [&str; 2] = [
    "What resources are you aware of?",
    "How Helpful is the textbook?",
];

impl Topic {
    /// The positions of the columns of this topic, in declared order.
    ///
    /// `width` only matters for `All`, which runs to the last column.
    pub fn column_indices(&self, width: usize) -> Vec<usize> {
        match self {
            Topic::Resources => RESOURCES_COLUMNS.to_vec(),
            Topic::OfficeHours => (2..24).collect(),
            Topic::Lecture => LECTURE_COLUMNS.to_vec(),
            Topic::Ed => (30..44).collect(),
            Topic::Lab => (44..51).chain([LAB_EXTRA_COLUMN]).collect(),
            Topic::Gsi => (53..65).collect(),
            Topic::Ai => (65..69).collect(),
            Topic::All => (FIRST_ANALYZED_COLUMN..width).collect(),
        }
    }

    /// The names given to the sliced columns. `All` keeps the export header.
    pub fn column_names(&self) -> Option<&'static [&'static str]> {
        match self {
            Topic::Gsi => Some(&GSI_NAMES),
            Topic::Ai => Some(&AI_NAMES),
            Topic::Lab => Some(&LAB_NAMES),
            Topic::Ed => Some(&ED_NAMES),
            Topic::OfficeHours => Some(&OFFICE_HOURS_NAMES),
            Topic::Lecture => Some(&LECTURE_NAMES),
            Topic::Resources => Some(&RESOURCES_NAMES),
            Topic::All => None,
        }
    }
}

/// The shape a survey export must have for the topics to line up.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SurveySchema {
    pub min_columns: usize,
}

impl SurveySchema {
    /// The schema derived from the topic column bindings.
    pub fn course_feedback() -> SurveySchema {
        let min_columns = Topic::NAMED
            .iter()
            .flat_map(|t| t.column_indices(0))
            .max()
            .map(|idx| idx + 1)
            .unwrap_or(FIRST_ANALYZED_COLUMN);
        SurveySchema { min_columns }
    }

    /// Fails on the header or any row narrower than the schema.
    pub fn check(&self, table: &SurveyTable) -> Result<(), ReportError> {
        debug!(
            "check: width: {:?} rows: {:?} min_columns: {:?}",
            table.width(),
            table.num_rows(),
            self.min_columns
        );
        if table.width() < self.min_columns {
            return Err(ReportError::SchemaMismatch {
                required: self.min_columns,
                found: table.width(),
                row: None,
            });
        }
        for (idx, row) in table.rows.iter().enumerate() {
            if row.len() < self.min_columns {
                return Err(ReportError::SchemaMismatch {
                    required: self.min_columns,
                    found: row.len(),
                    row: Some(idx),
                });
            }
        }
        Ok(())
    }
}

/// The columns of one topic, checked against the schema.
pub fn slice_topic(table: &SurveyTable, topic: Topic) -> Result<SurveyTable, ReportError> {
    SurveySchema::course_feedback().check(table)?;
    let indices = topic.column_indices(table.width());
    debug!("slice_topic: topic: {:?} indices: {:?}", topic, indices);
    table.select(&indices)
}
