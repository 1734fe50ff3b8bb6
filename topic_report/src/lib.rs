mod config;
use log::{debug, info};

pub mod blocks;
pub mod builder;
pub mod feedback;
pub mod frame;
pub mod manual;
pub mod recode;
pub mod schema;
pub mod stats;

pub use crate::config::*;
use crate::feedback::*;
use crate::frame::TopicFrame;
use crate::recode::*;

const FIVE_POINT_SCALE: f64 = 5.0;

const USE_COLUMNS: [&str; 5] = [
    "Homework Use",
    "Lab Use",
    "Project Use",
    "Discussion Use",
    "Lecture Use",
];

/// Builds the report of one topic.
///
/// Arguments:
/// * `table` the full survey export. It is checked against the schema first.
/// * `topic` one of the named topics. `Topic::All` has no report.
pub fn build_topic_report(table: &SurveyTable, topic: Topic) -> Result<TopicReport, ReportError> {
    info!(
        "Building the {} report over {:?} responses",
        topic,
        table.num_rows()
    );
    if topic == Topic::All {
        return Err(ReportError::NotReportable { topic });
    }
    let frame = TopicFrame::from_table(table, topic)?;
    analyze(frame)
}

/// Runs the analysis of a topic on its renamed columns.
pub fn analyze(frame: TopicFrame) -> Result<TopicReport, ReportError> {
    debug!(
        "analyze: topic: {:?} rows: {:?}",
        frame.topic,
        frame.num_rows()
    );
    match frame.topic {
        Topic::Gsi => analyze_gsi(frame),
        Topic::Ai => analyze_ai(frame),
        Topic::Lab => analyze_lab(frame),
        Topic::Ed => analyze_ed(frame),
        Topic::OfficeHours => analyze_office_hours(frame),
        Topic::Lecture => analyze_lecture(frame),
        Topic::Resources => analyze_resources(frame),
        Topic::All => Err(ReportError::NotReportable { topic: Topic::All }),
    }
}

fn analyze_gsi(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let ratings = [
        "Preparedness",
        "Section Pacing",
        "Clarity",
        "Approachability",
        "Atmosphere",
        "Promotes Discussion",
        "Email Responsiveness",
    ];
    // The export repeats the instructor name on every row.
    let name = frame
        .cells("Name")?
        .first()
        .and_then(|c| c.display_text());
    let good = text_list(frame.cells("Does Well")?);
    let bad = text_list(frame.cells("Could Improve")?);

    frame.recode(&["Worksheet Pacing", "Overall"], &RATING)?;
    frame.recode(&ratings, &RATING)?;
    frame.scale("Overall", FIVE_POINT_SCALE)?;
    frame.pacing("Worksheet Pacing")?;

    let mut metrics = vec!["Worksheet Pacing", "Overall"];
    metrics.extend(ratings);
    Ok(TopicReport {
        topic: Topic::Gsi,
        numbers: frame.numbers(&metrics)?,
        details: TopicDetails::Gsi { name, good, bad },
    })
}

fn analyze_ai(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let ratings = ["Approachability", "Helpfulness", "Clarity"];
    let feedback = text_list(frame.cells("Improvement")?);
    frame.recode(&ratings, &RATING)?;
    Ok(TopicReport {
        topic: Topic::Ai,
        numbers: frame.numbers(&ratings)?,
        details: TopicDetails::Ai { feedback },
    })
}

fn analyze_lab(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let ratings = [
        "Worksheet Helpfulness",
        "Worksheet Length",
        "Worksheet Difficulty",
        "Notebook Helpfulness",
        "Notebook Length",
        "Notebook Difficulty",
    ];
    let minutes = "Minutes Spent on Notebook Outside of Lab";
    let feedback = text_list(frame.cells("Comments")?);

    frame.recode(&ratings, &LAB_TIME)?;
    frame.recode(&[minutes], &LAB_TIME)?;
    for name in ratings {
        frame.scale(name, FIVE_POINT_SCALE)?;
    }

    let mut metrics = ratings.to_vec();
    metrics.push(minutes);
    Ok(TopicReport {
        topic: Topic::Lab,
        numbers: frame.numbers(&metrics)?,
        details: TopicDetails::Lab { feedback },
    })
}

fn discussion_feedback(frame: &TopicFrame) -> Result<DiscussionFeedback, ReportError> {
    Ok(DiscussionFeedback {
        improvement: text_list(frame.cells("How Can We Improve")?),
        other_feedback: text_list(frame.cells("Other Feedback")?),
        experienced: option_counts_excluding(frame.cells("Experienced")?, NONE_OF_THE_ABOVE),
        elaborate: text_list(frame.cells("Elaborate")?),
    })
}

// The usage questions run from 1 (most common) to 5 (never); the quality
// question is out of 5.
fn normalize_discussion(frame: &mut TopicFrame, table: &RecodeTable) -> Result<(), ReportError> {
    frame.recode(&USE_COLUMNS, table)?;
    frame.recode(&["Quality"], table)?;
    frame.scale("Quality", FIVE_POINT_SCALE)?;
    for name in USE_COLUMNS {
        frame.map_numeric(name, reverse_score)?;
    }
    Ok(())
}

fn analyze_ed(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let ratings = ["Clarity", "Attitude", "Response Time"];
    let feedback = discussion_feedback(&frame)?;

    frame.recode(&ratings, &DISCUSSION)?;
    normalize_discussion(&mut frame, &DISCUSSION)?;

    let mut metrics = USE_COLUMNS.to_vec();
    metrics.extend(ratings);
    metrics.push("Quality");
    Ok(TopicReport {
        topic: Topic::Ed,
        numbers: frame.numbers(&metrics)?,
        details: TopicDetails::Ed { feedback },
    })
}

fn analyze_office_hours(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let visits = ["Attended", "Non-project wait", "Project wait"];
    let ratings = ["Clarity", "Approachability", "Atmosphere"];
    let feedback = discussion_feedback(&frame)?;
    let mode = value_counts(frame.cells("Modality")?);

    frame.recode(&visits, &OFFICE_HOURS)?;
    frame.recode(&ratings, &OFFICE_HOURS)?;
    normalize_discussion(&mut frame, &OFFICE_HOURS)?;

    let mut metrics = visits.to_vec();
    metrics.extend(USE_COLUMNS);
    metrics.extend(ratings);
    metrics.push("Quality");
    Ok(TopicReport {
        topic: Topic::OfficeHours,
        numbers: frame.numbers(&metrics)?,
        details: TopicDetails::OfficeHours { feedback, mode },
    })
}

fn analyze_lecture(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let ratings = [
        "Helpfulness",
        "Pacing",
        "Composition (0=all slides, 5=all demo)",
    ];
    let comments = text_list(frame.cells("Comments")?);
    let absorb = option_counts(frame.cells("Absorb Lecture")?);
    for name in ratings {
        frame.scale(name, FIVE_POINT_SCALE)?;
    }
    Ok(TopicReport {
        topic: Topic::Lecture,
        numbers: frame.numbers(&ratings)?,
        details: TopicDetails::Lecture { comments, absorb },
    })
}

fn analyze_resources(mut frame: TopicFrame) -> Result<TopicReport, ReportError> {
    let textbook = "How Helpful is the textbook?";
    let resources = option_counts(frame.cells("What resources are you aware of?")?);
    frame.scale(textbook, FIVE_POINT_SCALE)?;
    Ok(TopicReport {
        topic: Topic::Resources,
        numbers: frame.numbers(&[textbook])?,
        details: TopicDetails::Resources { resources },
    })
}
