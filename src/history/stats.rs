use super::ConversationRecord;
use serde::Serialize;
use std::collections::BTreeMap;

pub const UNKNOWN_BRAND: &str = "unknown";

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct UsageStats {
    pub total: usize,
    pub solved: usize,
    pub solve_rate: f32,
    pub by_brand: BTreeMap<String, usize>,
    pub by_issue: BTreeMap<String, usize>,
}

impl UsageStats {
    pub fn from_records(records: &[ConversationRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.solved {
                stats.solved += 1;
            }

            let brand = record.brand.as_deref().unwrap_or(UNKNOWN_BRAND);
            *stats.by_brand.entry(brand.to_string()).or_insert(0) += 1;

            for issue in record.issue_type.split(',').map(str::trim) {
                if !issue.is_empty() {
                    *stats.by_issue.entry(issue.to_string()).or_insert(0) += 1;
                }
            }
        }

        if stats.total > 0 {
            stats.solve_rate = stats.solved as f32 / stats.total as f32;
        }
        stats
    }
}
