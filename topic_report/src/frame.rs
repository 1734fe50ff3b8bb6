use log::{debug, warn};

use crate::config::*;
use crate::recode::{pacing_flag, RecodeTable};
use crate::schema::slice_topic;

/// A named column of a topic.
#[derive(PartialEq, Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// The columns of one topic under their topic-specific names.
///
/// Every step of a topic analysis goes through this structure: recoding and
/// normalization rewrite columns in place, extraction and aggregation read
/// them.
#[derive(PartialEq, Debug, Clone)]
pub struct TopicFrame {
    pub topic: Topic,
    pub columns: Vec<Column>,
}

impl TopicFrame {
    /// Slices the topic out of the table and renames its columns.
    pub fn from_table(table: &SurveyTable, topic: Topic) -> Result<TopicFrame, ReportError> {
        let sliced = slice_topic(table, topic)?;
        TopicFrame::from_slice(&sliced, topic)
    }

    /// Renames the columns of an already sliced table.
    pub fn from_slice(sliced: &SurveyTable, topic: Topic) -> Result<TopicFrame, ReportError> {
        let names: Vec<String> = match topic.column_names() {
            Some(names) => names.iter().map(|s| s.to_string()).collect(),
            None => sliced.header.clone(),
        };
        if sliced.width() != names.len() {
            return Err(ReportError::SchemaMismatch {
                required: names.len(),
                found: sliced.width(),
                row: None,
            });
        }
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                name,
                cells: sliced.column(idx),
            })
            .collect();
        Ok(TopicFrame { topic, columns })
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    pub fn cells(&self, name: &str) -> Result<&[Cell], ReportError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.cells.as_slice())
            .ok_or(ReportError::UnknownColumn {
                topic: self.topic,
                column: name.to_string(),
            })
    }

    fn cells_mut(&mut self, name: &str) -> Result<&mut Vec<Cell>, ReportError> {
        let topic = self.topic;
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.cells)
            .ok_or(ReportError::UnknownColumn {
                topic,
                column: name.to_string(),
            })
    }

    pub fn recode(&mut self, names: &[&str], table: &RecodeTable) -> Result<(), ReportError> {
        for name in names {
            let cells = self.cells_mut(name)?;
            *cells = table.apply_all(cells);
        }
        Ok(())
    }

    /// Applies `f` to every non-missing value of the column. Text left over
    /// after recoding cannot be transformed.
    pub fn map_numeric<F: Fn(f64) -> f64>(&mut self, name: &str, f: F) -> Result<(), ReportError> {
        let topic = self.topic;
        let cells = self.cells_mut(name)?;
        for (row, cell) in cells.iter_mut().enumerate() {
            match cell {
                Cell::Missing => {}
                Cell::Text(s) => {
                    return Err(ReportError::UnrecognizedCategory {
                        topic,
                        column: name.to_string(),
                        row,
                        value: s.clone(),
                    });
                }
                _ => {
                    if let Some(x) = cell.as_f64() {
                        *cell = Cell::Number(f(x));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn scale(&mut self, name: &str, divisor: f64) -> Result<(), ReportError> {
        self.map_numeric(name, |x| x / divisor)
    }

    /// Replaces the column with the well-paced flag.
    pub fn pacing(&mut self, name: &str) -> Result<(), ReportError> {
        let cells = self.cells_mut(name)?;
        *cells = cells.iter().map(|c| Cell::Bool(pacing_flag(c))).collect();
        Ok(())
    }

    /// Numeric values of the column, missing values skipped.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>, ReportError> {
        let mut res: Vec<f64> = Vec::new();
        for (row, cell) in self.cells(name)?.iter().enumerate() {
            match cell {
                Cell::Missing => {}
                Cell::Text(s) => {
                    return Err(ReportError::UnrecognizedCategory {
                        topic: self.topic,
                        column: name.to_string(),
                        row,
                        value: s.clone(),
                    });
                }
                _ => {
                    if let Some(x) = cell.as_f64() {
                        res.push(x);
                    }
                }
            }
        }
        Ok(res)
    }

    /// Mean and standard deviation of each named column, in the given order.
    pub fn numbers(&self, names: &[&str]) -> Result<Vec<(String, MetricStats)>, ReportError> {
        let mut res: Vec<(String, MetricStats)> = Vec::new();
        for name in names {
            let values = self.numeric_values(name)?;
            let stats = MetricStats::from_values(&values);
            if stats.is_degraded() {
                warn!(
                    "{}: column {:?} has {} value(s), its standard deviation is undefined",
                    self.topic, name, stats.count
                );
            }
            debug!("numbers: {}: {:?}: {:?}", self.topic, name, stats);
            res.push((name.to_string(), stats));
        }
        Ok(res)
    }
}
