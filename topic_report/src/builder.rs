pub use crate::config::*;
use crate::schema::SurveySchema;

/// A builder for assembling a survey table row by row.
///
/// Readers and tests use it so that every table goes through the schema
/// check before any topic is sliced.
///
/// ```
/// use topic_report::builder::TableBuilder;
/// use topic_report::{build_topic_report, ReportError, Topic};
///
/// let mut builder = TableBuilder::with_width(70);
/// builder.add_row_at(&[(65, "Excellent"), (68, "More examples")])?;
/// builder.add_row_at(&[(65, "Average")])?;
/// let table = builder.build()?;
///
/// let report = build_topic_report(&table, Topic::Ai)?;
/// assert_eq!(report.metric("Approachability").unwrap().mean, 0.75);
///
/// # Ok::<(), ReportError>(())
/// ```
pub struct TableBuilder {
    pub(crate) _schema: SurveySchema,
    pub(crate) _header: Vec<String>,
    pub(crate) _rows: Vec<Vec<Cell>>,
}

impl TableBuilder {
    pub fn new(header: &[String]) -> TableBuilder {
        TableBuilder {
            _schema: SurveySchema::course_feedback(),
            _header: header.to_vec(),
            _rows: Vec::new(),
        }
    }

    /// A builder with placeholder column names `Q0`, `Q1`, ...
    pub fn with_width(width: usize) -> TableBuilder {
        let header: Vec<String> = (0..width).map(|idx| format!("Q{}", idx)).collect();
        TableBuilder::new(&header)
    }

    pub fn schema(self, schema: SurveySchema) -> TableBuilder {
        TableBuilder {
            _schema: schema,
            _header: self._header,
            _rows: self._rows,
        }
    }

    pub fn width(&self) -> usize {
        self._header.len()
    }

    /// Adds a row of raw strings, parsed like a text export.
    pub fn add_row_simple(&mut self, raw: &[&str]) -> Result<(), ReportError> {
        self.add_row(raw.iter().map(|s| Cell::parse(s)).collect())
    }

    /// Adds a row that is missing everywhere except at the given positions.
    pub fn add_row_at(&mut self, values: &[(usize, &str)]) -> Result<(), ReportError> {
        let mut row = vec![Cell::Missing; self.width()];
        for (idx, raw) in values {
            let slot = row.get_mut(*idx).ok_or(ReportError::SchemaMismatch {
                required: idx + 1,
                found: self._header.len(),
                row: Some(self._rows.len()),
            })?;
            *slot = Cell::parse(raw);
        }
        self.add_row(row)
    }

    pub fn add_row(&mut self, row: Vec<Cell>) -> Result<(), ReportError> {
        if row.len() > self.width() {
            return Err(ReportError::SchemaMismatch {
                required: self.width(),
                found: row.len(),
                row: Some(self._rows.len()),
            });
        }
        self._rows.push(row);
        Ok(())
    }

    /// The table, once it passed the schema check.
    pub fn build(self) -> Result<SurveyTable, ReportError> {
        let table = SurveyTable {
            header: self._header,
            rows: self._rows,
        };
        self._schema.check(&table)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_builder_fails_at_build() {
        let mut builder = TableBuilder::with_width(12);
        builder.add_row_simple(&["x"; 12]).unwrap();
        assert!(matches!(
            builder.build(),
            Err(ReportError::SchemaMismatch { required: 70, found: 12, row: None })
        ));
    }

    #[test]
    fn row_wider_than_header_is_rejected() {
        let mut builder = TableBuilder::with_width(3);
        builder.add_row_simple(&["1", "2", "3"]).unwrap();
        let err = builder.add_row_simple(&["1", "2", "3", "4"]).unwrap_err();
        assert_eq!(
            err,
            ReportError::SchemaMismatch {
                required: 3,
                found: 4,
                row: Some(1)
            }
        );
        assert!(err.to_string().contains("row 1 has 4 columns, the header only 3"));
        assert!(builder.add_row_at(&[(5, "x")]).is_err());
    }

    #[test]
    fn custom_schema() {
        let mut builder = TableBuilder::with_width(3).schema(SurveySchema { min_columns: 3 });
        builder.add_row_simple(&["a", "", "2.5"]).unwrap();
        let table = builder.build().unwrap();
        assert_eq!(
            table.rows[0],
            vec![Cell::Text("a".to_string()), Cell::Missing, Cell::Number(2.5)]
        );
    }
}
