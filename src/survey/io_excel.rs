use calamine::{open_workbook, DataType, Reader, Xlsx};

use topic_report::builder::TableBuilder;

use crate::survey::*;

/// Reads a survey export saved as an Excel workbook. The first row of the
/// worksheet is the header.
pub fn read_excel_survey(path: &str, worksheet: Option<&str>) -> SurveyResult<SurveyTable> {
    let wrange = get_range(path, worksheet)?;
    // A range starts at its first non-empty cell. Pad the rows back to
    // column A so that the positions match the export.
    let col_offset = wrange.start().map(|(_, c)| c as usize).unwrap_or(0);
    debug!("read_excel_survey: range start: {:?}", wrange.start());

    let mut rows = wrange.rows();
    let header_row = rows.next().context(EmptyExcelSnafu {})?;
    let header: Vec<String> = std::iter::repeat(String::new())
        .take(col_offset)
        .chain(
            header_row
                .iter()
                .map(|dt| read_cell(dt).display_text().unwrap_or_default()),
        )
        .collect();
    debug!("read_excel_survey: header: {:?}", header);

    let mut builder = TableBuilder::new(&header);
    for (idx, row) in rows.enumerate() {
        debug!("read_excel_survey: idx: {:?} row: {:?}", idx, row);
        let cells: Vec<Cell> = std::iter::repeat(Cell::Missing)
            .take(col_offset)
            .chain(row.iter().map(read_cell))
            .collect();
        builder.add_row(cells).context(SchemaSnafu { path })?;
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

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Missing,
        DataType::String(s) => Cell::parse(s),
        DataType::Float(f) if f.is_nan() => Cell::Missing,
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Bool(b) => Cell::Bool(*b),
        // Timestamps are only found in column 0, which is never analyzed.
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::Error(_) => Cell::Missing,
        #[allow(unreachable_patterns)]
        _ => Cell::Missing,
    }
}

fn get_range(path: &str, worksheet: Option<&str>) -> SurveyResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
                Ok(wrange.clone())
            }
            [(worksheet_name, wrange), ..] => {
                warn!(
                    "{:?} has {} worksheets, reading the first one ({:?}). Use --excel-worksheet-name to pick another one.",
                    path,
                    all_worksheets.len(),
                    worksheet_name
                );
                Ok(wrange.clone())
            }
        }
    }
}
