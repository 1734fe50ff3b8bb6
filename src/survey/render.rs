// Markdown rendering of the topic reports.

use topic_report::blocks::Block;
use topic_report::stats::round3;

use crate::survey::*;

pub fn format_stat(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else {
        format!("{}", round3(x))
    }
}

pub fn render_block(block: &Block) -> String {
    let mut s = format!("### {}\n\n", block.title());
    match block {
        Block::Text { value, .. } => {
            s.push_str(&format!("{}\n", value.as_deref().unwrap_or("(none)")));
        }
        Block::Items { items, .. } => {
            for item in items {
                s.push_str(&format!("- {}\n", item));
            }
        }
        Block::Counts { counts, .. } => {
            for (option, count) in counts {
                s.push_str(&format!("- {} ({})\n", option, count));
            }
        }
        Block::Metric { stats, .. } => {
            s.push_str(&format!(
                "Mean: {}  \nStandard Deviation: {}\n",
                format_stat(stats.mean),
                format_stat(stats.std)
            ));
        }
    }
    s.push('\n');
    s
}

pub fn render_outcome(topic: Topic, outcome: &Result<TopicReport, ReportError>) -> String {
    let mut s = format!("## {}\n\n", topic);
    match outcome {
        Ok(report) => {
            for block in report.blocks() {
                s.push_str(&render_block(&block));
            }
        }
        Err(e) => {
            s.push_str(&format!("Report failed: {}\n\n", e));
        }
    }
    s
}

pub fn render_markdown(title: &str, outcomes: &[(Topic, Result<TopicReport, ReportError>)]) -> String {
    let mut s = format!("# {}\n\n", title);
    for (topic, outcome) in outcomes {
        s.push_str(&render_outcome(*topic, outcome));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_rounding() {
        let block = Block::Metric {
            title: "Overall".to_string(),
            stats: MetricStats {
                mean: 2.0 / 3.0,
                std: f64::NAN,
                count: 1,
            },
        };
        assert_eq!(
            render_block(&block),
            "### Overall\n\nMean: 0.667  \nStandard Deviation: NaN\n\n"
        );
    }

    #[test]
    fn counts_and_items() {
        let counts = Block::Counts {
            title: "Modality:".to_string(),
            counts: vec![("In person".to_string(), 3), ("Online".to_string(), 1)],
        };
        assert_eq!(
            render_block(&counts),
            "### Modality:\n\n- In person (3)\n- Online (1)\n\n"
        );
        let items = Block::Items {
            title: "Comments:".to_string(),
            items: vec![],
        };
        assert_eq!(render_block(&items), "### Comments:\n\n\n");
    }

    #[test]
    fn failed_topic() {
        let outcome: Result<TopicReport, ReportError> = Err(ReportError::UnrecognizedCategory {
            topic: Topic::Ai,
            column: "Clarity".to_string(),
            row: 3,
            value: "Superb".to_string(),
        });
        let s = render_outcome(Topic::Ai, &outcome);
        assert!(s.starts_with("## AI\n\nReport failed: "));
        assert!(s.contains("Superb"));
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(format_stat(1.0), "1");
        assert_eq!(format_stat(67.5), "67.5");
        assert_eq!(format_stat(0.12345), "0.123");
    }
}
