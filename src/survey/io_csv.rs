// Primitives for reading CSV exports.

use topic_report::builder::TableBuilder;

use crate::survey::*;

/// Reads a CSV export with a header row. The table is checked against the
/// survey schema before it is returned.
pub fn read_csv_survey(path: &str) -> SurveyResult<SurveyTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_survey: header: {:?}", header);

    let mut builder = TableBuilder::new(&header);
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let row: Vec<Cell> = line.iter().map(Cell::parse).collect();
        debug!("read_csv_survey: lineno: {:?} width: {:?}", lineno, row.len());
        builder.add_row(row).context(SchemaSnafu { path })?;
    }
    let table = builder.build().context(SchemaSnafu { path })?;
    info!(
        "Read {} responses and {} columns from {:?}",
        table.num_rows(),
        table.width(),
        path
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(rows: &[Vec<String>]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(file.path())
            .unwrap();
        for row in rows {
            wtr.write_record(row).unwrap();
        }
        wtr.flush().unwrap();
        file
    }

    fn survey_row(width: usize, values: &[(usize, &str)]) -> Vec<String> {
        let mut row = vec![String::new(); width];
        for (idx, v) in values {
            row[*idx] = v.to_string();
        }
        row
    }

    #[test]
    fn reads_cells_like_a_dataframe() {
        let header: Vec<String> = (0..70).map(|i| format!("Question {}", i)).collect();
        let file = write_csv(&[
            header,
            survey_row(
                70,
                &[(0, "2023/10/02 9:14:00"), (1, "Textbook, Ed"), (28, "4"), (65, "N/A")],
            ),
        ]);
        let table = read_csv_survey(file.path().to_str().unwrap()).unwrap();
        assert_eq!(table.width(), 70);
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.rows[0][1], Cell::Text("Textbook, Ed".to_string()));
        assert_eq!(table.rows[0][28], Cell::Number(4.0));
        assert_eq!(table.rows[0][65], Cell::Missing);
        assert_eq!(table.rows[0][2], Cell::Missing);
    }

    #[test]
    fn narrow_export_is_rejected() {
        let file = write_csv(&[
            vec!["Timestamp".to_string(), "Q1".to_string()],
            vec!["now".to_string(), "4".to_string()],
        ]);
        let res = read_csv_survey(file.path().to_str().unwrap());
        assert!(matches!(
            res,
            Err(SurveyError::Schema {
                source: ReportError::SchemaMismatch { required: 70, found: 2, row: None },
                ..
            })
        ));
    }

    #[test]
    fn short_row_is_rejected() {
        let header: Vec<String> = (0..70).map(|i| format!("Q{}", i)).collect();
        let file = write_csv(&[header, vec!["now".to_string(), "4".to_string()]]);
        let res = read_csv_survey(file.path().to_str().unwrap());
        assert!(matches!(
            res,
            Err(SurveyError::Schema {
                source: ReportError::SchemaMismatch { row: Some(0), .. },
                ..
            })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_survey("/nonexistent/responses.csv"),
            Err(SurveyError::OpeningCsv { .. })
        ));
    }
}
