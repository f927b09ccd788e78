use crate::types::IssueRecord;

/// The nine colors Notion multi-select options cycle through. An option's
/// color is a pure function of its first-occurrence index, so it shifts
/// between runs whenever discovery order shifts.
pub const PALETTE: [&str; 9] = [
    "gray", "brown", "orange", "yellow", "green", "blue", "purple", "pink", "red",
];

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Distinct labels, assignees, and creators, each in first-occurrence order
/// across the records in fetch order.
#[derive(Debug, Default, PartialEq)]
pub struct TagUniverse {
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub creators: Vec<String>,
}

pub fn collect(records: &[IssueRecord]) -> TagUniverse {
    let mut universe = TagUniverse::default();

    for record in records {
        for label in &record.labels {
            push_unique(&mut universe.labels, label);
        }
    }

    for record in records {
        if let Some(assignees) = &record.assignees {
            for assignee in assignees {
                push_unique(&mut universe.assignees, assignee);
            }
        }
    }

    for record in records {
        push_unique(&mut universe.creators, &record.creator);
    }

    universe
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
