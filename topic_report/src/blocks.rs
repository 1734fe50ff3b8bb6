use crate::config::*;

/// One renderable piece of a topic report.
#[derive(PartialEq, Debug, Clone)]
pub enum Block {
    Text {
        title: String,
        value: Option<String>,
    },
    Items {
        title: String,
        items: Vec<String>,
    },
    Counts {
        title: String,
        counts: OptionCounts,
    },
    Metric {
        title: String,
        stats: MetricStats,
    },
}

impl Block {
    pub fn title(&self) -> &str {
        match self {
            Block::Text { title, .. }
            | Block::Items { title, .. }
            | Block::Counts { title, .. }
            | Block::Metric { title, .. } => title,
        }
    }
}

fn items(title: &str, items: &[String]) -> Block {
    Block::Items {
        title: title.to_string(),
        items: items.to_vec(),
    }
}

fn counts(title: &str, counts: &OptionCounts) -> Block {
    Block::Counts {
        title: title.to_string(),
        counts: counts.clone(),
    }
}

fn discussion_blocks(feedback: &DiscussionFeedback) -> Vec<Block> {
    vec![
        items("How Can We Improve:", &feedback.improvement),
        items("Other Feedback:", &feedback.other_feedback),
        counts("Experienced:", &feedback.experienced),
        items("Elaborate:", &feedback.elaborate),
    ]
}

impl TopicReport {
    /// The report as an ordered list of blocks: feedback first, then one
    /// block per metric.
    pub fn blocks(&self) -> Vec<Block> {
        let mut res: Vec<Block> = match &self.details {
            TopicDetails::Gsi { name, good, bad } => vec![
                Block::Text {
                    title: "GSI Name:".to_string(),
                    value: name.clone(),
                },
                items("Does Well:", good),
                items("Could Improve:", bad),
            ],
            TopicDetails::Ai { feedback } => vec![items("Could Improve:", feedback)],
            TopicDetails::Lab { feedback } => vec![items("Comments:", feedback)],
            TopicDetails::Ed { feedback } => discussion_blocks(feedback),
            TopicDetails::OfficeHours { feedback, mode } => {
                let mut l = discussion_blocks(feedback);
                l.push(counts("Modality:", mode));
                l
            }
            TopicDetails::Lecture { comments, absorb } => vec![
                items("Comments:", comments),
                counts("How do you absorb lecture?", absorb),
            ],
            TopicDetails::Resources { resources } => {
                vec![counts("What resources are you aware of?", resources)]
            }
        };
        for (name, stats) in self.numbers.iter() {
            res.push(Block::Metric {
                title: name.clone(),
                stats: *stats,
            });
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> MetricStats {
        MetricStats {
            mean: 0.5,
            std: 0.25,
            count: 4,
        }
    }

    #[test]
    fn office_hours_block_order() {
        let report = TopicReport {
            topic: Topic::OfficeHours,
            numbers: vec![("Attended".to_string(), stats()), ("Quality".to_string(), stats())],
            details: TopicDetails::OfficeHours {
                feedback: DiscussionFeedback::default(),
                mode: vec![("In person".to_string(), 3)],
            },
        };
        let titles: Vec<String> = report.blocks().iter().map(|b| b.title().to_string()).collect();
        assert_eq!(
            titles,
            vec![
                "How Can We Improve:",
                "Other Feedback:",
                "Experienced:",
                "Elaborate:",
                "Modality:",
                "Attended",
                "Quality"
            ]
        );
    }

    #[test]
    fn gsi_name_comes_first() {
        let report = TopicReport {
            topic: Topic::Gsi,
            numbers: vec![],
            details: TopicDetails::Gsi {
                name: Some("Ada".to_string()),
                good: vec!["clear".to_string()],
                bad: vec![],
            },
        };
        let blocks = report.blocks();
        assert_eq!(
            blocks[0],
            Block::Text {
                title: "GSI Name:".to_string(),
                value: Some("Ada".to_string())
            }
        );
        assert_eq!(blocks.len(), 3);
    }
}
