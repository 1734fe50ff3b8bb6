//! Extraction of comments and answer frequencies from non-numeric columns.

use std::collections::HashMap;

use crate::config::{Cell, OptionCounts};

/// The answer that means none of the listed experiences happened.
pub const NONE_OF_THE_ABOVE: &str = "None of the above.";

/// The non-missing answers, in row order.
pub fn text_list(cells: &[Cell]) -> Vec<String> {
    cells.iter().filter_map(|c| c.display_text()).collect()
}

/// Counts whole answers (single choice questions).
pub fn value_counts(cells: &[Cell]) -> OptionCounts {
    count_in_order(cells.iter().filter_map(|c| c.display_text()))
}

/// Counts the options of comma-joined multiple choice answers. Options are
/// trimmed; empty options are dropped.
pub fn option_counts(cells: &[Cell]) -> OptionCounts {
    let options = cells
        .iter()
        .filter_map(|c| c.display_text())
        .flat_map(|s| {
            s.split(',')
                .map(|opt| opt.trim().to_string())
                .filter(|opt| !opt.is_empty())
                .collect::<Vec<String>>()
        });
    count_in_order(options)
}

/// Same as `option_counts`, but rows answering exactly `exclude` are left out.
pub fn option_counts_excluding(cells: &[Cell], exclude: &str) -> OptionCounts {
    let kept: Vec<Cell> = cells
        .iter()
        .filter(|c| !matches!(c, Cell::Text(s) if s == exclude))
        .cloned()
        .collect();
    option_counts(&kept)
}

// Most frequent first, ties in order of first appearance.
fn count_in_order<I: Iterator<Item = String>>(values: I) -> OptionCounts {
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        let e = counts.entry(v.clone()).or_insert(0);
        if *e == 0 {
            first_seen.push(v);
        }
        *e += 1;
    }
    let mut res: OptionCounts = first_seen
        .into_iter()
        .map(|v| {
            let c = counts.get(&v).cloned().unwrap_or(0);
            (v, c)
        })
        .collect();
    // Stable sort keeps the first appearance order among ties.
    res.sort_by(|a, b| b.1.cmp(&a.1));
    res
}
