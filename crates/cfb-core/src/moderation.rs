use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::board::count_status;
use crate::model::{Category, FeedbackRecord, FeedbackStatus, ParseStatusError};

const BREAKDOWN_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Reviewed,
    Resolved,
}

impl StatusFilter {
    pub fn status(self) -> Option<FeedbackStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(FeedbackStatus::Pending),
            StatusFilter::Reviewed => Some(FeedbackStatus::Reviewed),
            StatusFilter::Resolved => Some(FeedbackStatus::Resolved),
        }
    }

    pub fn admits(self, record: &FeedbackRecord) -> bool {
        self.status().is_none_or(|s| s == record.status)
    }
}

impl From<FeedbackStatus> for StatusFilter {
    fn from(status: FeedbackStatus) -> Self {
        match status {
            FeedbackStatus::Pending => StatusFilter::Pending,
            FeedbackStatus::Reviewed => StatusFilter::Reviewed,
            FeedbackStatus::Resolved => StatusFilter::Resolved,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            Some(status) => f.write_str(status.as_str()),
            None => f.write_str("all"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<FeedbackStatus>().map(StatusFilter::from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    pub resolved: usize,
    pub total_votes: u64,
}

pub fn stats(records: &[FeedbackRecord]) -> DashboardStats {
    DashboardStats {
        total: records.len(),
        pending: count_status(records, FeedbackStatus::Pending),
        reviewed: count_status(records, FeedbackStatus::Reviewed),
        resolved: count_status(records, FeedbackStatus::Resolved),
        total_votes: records.iter().map(|r| u64::from(r.votes)).sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    /// Rounded share of all records, 0..=100.
    pub percent: u32,
}

/// Top categories by record count. Ties keep first-seen order.
pub fn category_breakdown(records: &[FeedbackRecord]) -> Vec<CategoryShare> {
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(cat, _)| *cat == record.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.category, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let total = records.len();
    counts
        .into_iter()
        .take(BREAKDOWN_LIMIT)
        .map(|(category, count)| CategoryShare {
            category,
            count,
            percent: percent_of(count, total),
        })
        .collect()
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub filter: StatusFilter,
    pub stats: DashboardStats,
    pub breakdown: Vec<CategoryShare>,
    pub items: Vec<FeedbackRecord>,
}

pub fn dashboard(records: &[FeedbackRecord], filter: StatusFilter) -> Dashboard {
    Dashboard {
        filter,
        stats: stats(records),
        breakdown: category_breakdown(records),
        items: records
            .iter()
            .filter(|r| filter.admits(r))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewFeedback;
    use crate::random::SeededRandom;
    use crate::seed;

    fn board() -> Vec<FeedbackRecord> {
        seed::records(&mut SeededRandom::new(4), 1_750_000_000_000)
    }

    #[test]
    fn stats_count_each_status() {
        let s = stats(&board());
        assert_eq!(
            s,
            DashboardStats {
                total: 5,
                pending: 2,
                reviewed: 2,
                resolved: 1,
                total_votes: 302,
            }
        );
    }

    #[test]
    fn filter_keeps_collection_order() {
        let view = dashboard(&board(), StatusFilter::Reviewed);
        let ids: Vec<&str> = view.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["fb-001", "fb-005"]);
        assert_eq!(view.stats.total, 5);
        assert_eq!(dashboard(&board(), StatusFilter::All).items.len(), 5);
    }

    #[test]
    fn breakdown_is_capped_and_ranked() {
        let mut records = board();
        let extra = FeedbackRecord::new(
            "fb-x".into(),
            NewFeedback {
                category: Category::Safety,
                title: "t".into(),
                message: "m".into(),
            },
            0,
            String::new(),
            0,
            FeedbackStatus::Pending,
        );
        records.push(extra);
        let breakdown = category_breakdown(&records);
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[0].category, Category::Safety);
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[0].percent, 33);
        assert_eq!(breakdown[1].category, Category::Infrastructure);
        assert_eq!(breakdown[1].percent, 17);
    }

    #[test]
    fn breakdown_of_empty_board_is_empty() {
        assert!(category_breakdown(&[]).is_empty());
        assert_eq!(percent_of(0, 0), 0);
    }

    #[test]
    fn filters_parse() {
        assert_eq!("ALL".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("resolved".parse::<StatusFilter>(), Ok(StatusFilter::Resolved));
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
