//! Substitution of categorical answers with numeric scores.

use crate::config::Cell;

/// A mapping from exported answer labels to scores. `None` turns the answer
/// into a missing value.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RecodeTable {
    pub entries: &'static [(&'static str, Option<f64>)],
}

impl RecodeTable {
    pub fn lookup(&self, label: &str) -> Option<Option<f64>> {
        self.entries
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, score)| *score)
    }

    /// Recodes one cell. Labels missing from the table and non-text cells pass
    /// through, so applying a table twice is the same as applying it once.
    pub fn apply(&self, cell: &Cell) -> Cell {
        match cell {
            Cell::Text(s) => match self.lookup(s) {
                Some(Some(score)) => Cell::Number(score),
                Some(None) => Cell::Missing,
                None => cell.clone(),
            },
            _ => cell.clone(),
        }
    }

    pub fn apply_all(&self, cells: &[Cell]) -> Vec<Cell> {
        cells.iter().map(|c| self.apply(c)).collect()
    }
}

/// GSI and AI ratings.
pub const RATING: RecodeTable = RecodeTable {
    entries: &[
        ("Needs Improvement", Some(0.0)),
        ("Average", Some(0.5)),
        ("Excellent", Some(1.0)),
    ],
};

/// Time spent on the lab notebook outside of lab, in minutes.
pub const LAB_TIME: RecodeTable = RecodeTable {
    entries: &[
        ("No time outside of lab", Some(0.0)),
        ("0 - 30 minutes", Some(15.0)),
        ("30 minutes - 1 hour", Some(45.0)),
        ("1 hour - 1.5 hours", Some(75.0)),
        ("1.5 hours - 2 hours", Some(105.0)),
        ("2+ hours", Some(135.0)),
    ],
};

/// Ed: usage frequency scale endpoints and answer quality.
pub const DISCUSSION: RecodeTable = RecodeTable {
    entries: &[
        ("5 (Least common/Never)", Some(5.0)),
        ("1 (Most common)", Some(1.0)),
        ("Excellent", Some(1.0)),
        ("Good", Some(0.5)),
        ("Poor", Some(0.0)),
    ],
};

/// Office hours: the Ed labels, attendance and wait times in minutes.
pub const OFFICE_HOURS: RecodeTable = RecodeTable {
    entries: &[
        ("5 (Least common/Never)", Some(5.0)),
        ("1 (Most common)", Some(1.0)),
        ("Excellent", Some(1.0)),
        ("Good", Some(0.5)),
        ("Poor", Some(0.0)),
        ("Yes", Some(1.0)),
        ("No", Some(0.0)),
        ("I have not attended OH during a non-project week", None),
        ("I have not attended OH during a project week", None),
        ("0-15 minutes", Some(7.5)),
        ("15-30 minutes", Some(22.5)),
        ("30-45 minutes", Some(37.5)),
        ("Over 45 minutes", Some(52.5)),
    ],
};

/// The pacing code that marks a worksheet as well paced.
pub const WELL_PACED_CODE: f64 = 2.0;

/// True only for the numeric well-paced code. Never missing.
pub fn pacing_flag(cell: &Cell) -> bool {
    matches!(cell, Cell::Number(x) if *x == WELL_PACED_CODE)
}

/// Maps a 1 (best) to 5 (worst) answer onto 0..1, best is high.
pub fn reverse_score(x: f64) -> f64 {
    (6.0 - x) / 5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(labels: &[&str]) -> Vec<Cell> {
        labels.iter().map(|s| Cell::Text(s.to_string())).collect()
    }

    #[test]
    fn rating_labels() {
        assert_eq!(
            RATING.apply_all(&texts(&["Excellent", "Average", "Needs Improvement"])),
            vec![Cell::Number(1.0), Cell::Number(0.5), Cell::Number(0.0)]
        );
    }

    #[test]
    fn unknown_labels_and_missing_pass_through() {
        let cells = vec![Cell::Text("Superb".to_string()), Cell::Missing, Cell::Number(3.0)];
        assert_eq!(OFFICE_HOURS.apply_all(&cells), cells);
    }

    #[test]
    fn recoding_is_idempotent() {
        let mut cells = texts(&[
            "Yes",
            "0-15 minutes",
            "I have not attended OH during a project week",
            "Good",
            "something else",
        ]);
        cells.push(Cell::Number(4.0));
        let once = OFFICE_HOURS.apply_all(&cells);
        let twice = OFFICE_HOURS.apply_all(&once);
        assert_eq!(once, twice);
        assert_eq!(once[2], Cell::Missing);
    }

    #[test]
    fn lab_time_buckets() {
        assert_eq!(LAB_TIME.lookup("2+ hours"), Some(Some(135.0)));
        assert_eq!(LAB_TIME.lookup("1 hour - 1.5 hours"), Some(Some(75.0)));
        assert_eq!(LAB_TIME.lookup("3 hours"), None);
    }

    #[test]
    fn pacing_flag_is_true_only_for_code_two() {
        assert!(pacing_flag(&Cell::Number(2.0)));
        assert!(!pacing_flag(&Cell::Number(1.0)));
        assert!(!pacing_flag(&Cell::Number(3.0)));
        assert!(!pacing_flag(&Cell::Missing));
        assert!(!pacing_flag(&Cell::Text("2".to_string())));
    }

    #[test]
    fn reverse_scoring() {
        assert_eq!(reverse_score(1.0), 1.0);
        assert_eq!(reverse_score(5.0), 0.2);
        assert_eq!(reverse_score(3.5), 0.5);
    }
}
