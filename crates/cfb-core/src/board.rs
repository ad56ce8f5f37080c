//! Public board: search, filter, and sort over a feedback snapshot.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{Category, FeedbackRecord, FeedbackStatus};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Votes,
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Votes => "votes",
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct ParseSortError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "votes" | "top" => Ok(SortOrder::Votes),
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

/// `None` filters mean "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub status: Option<FeedbackStatus>,
    pub sort: SortOrder,
}

impl BoardQuery {
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        {
            let needle = needle.to_lowercase();
            let hit = record.title.to_lowercase().contains(&needle)
                || record.message.to_lowercase().contains(&needle)
                || record.category.label().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if self.category.is_some_and(|c| c != record.category) {
            return false;
        }
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub items: Vec<FeedbackRecord>,
    pub shown: usize,
    pub total: usize,
    pub stats: BoardStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub total_votes: u64,
    pub pending: usize,
    pub resolved: usize,
}

pub fn stats(records: &[FeedbackRecord]) -> BoardStats {
    BoardStats {
        total: records.len(),
        total_votes: records.iter().map(|r| u64::from(r.votes)).sum(),
        pending: count_status(records, FeedbackStatus::Pending),
        resolved: count_status(records, FeedbackStatus::Resolved),
    }
}

pub(crate) fn count_status(records: &[FeedbackRecord], status: FeedbackStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

pub fn query(records: &[FeedbackRecord], q: &BoardQuery) -> BoardView {
    let mut items: Vec<FeedbackRecord> = records.iter().filter(|r| q.matches(r)).cloned().collect();
    // Stable sorts keep insertion order (newest first) among ties.
    match q.sort {
        SortOrder::Votes => items.sort_by(|a, b| b.votes.cmp(&a.votes)),
        SortOrder::Newest => items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => items.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }
    BoardView {
        shown: items.len(),
        total: records.len(),
        stats: stats(records),
        items,
    }
}

/// Coarse relative age used on feedback cards.
pub fn time_ago(now_ms: i64, timestamp_ms: i64) -> String {
    let seconds = (now_ms - timestamp_ms).div_euclid(1000);
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use crate::seed;

    const NOW: i64 = 1_750_000_000_000;

    fn board() -> Vec<FeedbackRecord> {
        seed::records(&mut SeededRandom::new(11), NOW)
    }

    fn ids(view: &BoardView) -> Vec<&str> {
        view.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn default_query_sorts_by_votes() {
        let view = query(&board(), &BoardQuery::default());
        assert_eq!(ids(&view), ["fb-003", "fb-005", "fb-004", "fb-001", "fb-002"]);
        assert_eq!((view.shown, view.total), (5, 5));
    }

    #[test]
    fn newest_and_oldest_follow_timestamps() {
        let records = board();
        let newest = query(
            &records,
            &BoardQuery {
                sort: SortOrder::Newest,
                ..Default::default()
            },
        );
        assert_eq!(ids(&newest), ["fb-002", "fb-001", "fb-003", "fb-005", "fb-004"]);
        let oldest = query(
            &records,
            &BoardQuery {
                sort: SortOrder::Oldest,
                ..Default::default()
            },
        );
        assert_eq!(ids(&oldest), ["fb-004", "fb-005", "fb-003", "fb-001", "fb-002"]);
    }

    #[test]
    fn search_covers_title_message_and_category() {
        let records = board();
        let by_title = query(
            &records,
            &BoardQuery {
                search: Some("WI-FI".into()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&by_title), ["fb-001"]);

        let by_category = query(
            &records,
            &BoardQuery {
                search: Some("campus life".into()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&by_category), ["fb-003"]);

        let by_message = query(
            &records,
            &BoardQuery {
                search: Some("emergency call".into()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&by_message), ["fb-004"]);

        let blank = query(
            &records,
            &BoardQuery {
                search: Some("   ".into()),
                ..Default::default()
            },
        );
        assert_eq!(blank.shown, 5);
    }

    #[test]
    fn filters_combine() {
        let view = query(
            &board(),
            &BoardQuery {
                status: Some(FeedbackStatus::Pending),
                category: Some(Category::Safety),
                ..Default::default()
            },
        );
        assert_eq!(ids(&view), ["fb-004"]);
        assert_eq!(view.total, 5);

        let none = query(
            &board(),
            &BoardQuery {
                category: Some(Category::Faculty),
                ..Default::default()
            },
        );
        assert!(none.items.is_empty());
    }

    #[test]
    fn stats_sum_votes_and_statuses() {
        let s = stats(&board());
        assert_eq!(
            s,
            BoardStats {
                total: 5,
                total_votes: 47 + 32 + 89 + 63 + 71,
                pending: 2,
                resolved: 1,
            }
        );
    }

    #[test]
    fn sort_names_parse() {
        assert_eq!("Newest".parse::<SortOrder>(), Ok(SortOrder::Newest));
        assert_eq!("votes".parse::<SortOrder>(), Ok(SortOrder::Votes));
        assert!("random".parse::<SortOrder>().is_err());
    }

    #[test]
    fn time_ago_buckets() {
        assert_eq!(time_ago(NOW, NOW - 59_000), "just now");
        assert_eq!(time_ago(NOW, NOW - 60_000), "1m ago");
        assert_eq!(time_ago(NOW, NOW - 3_600_000), "1h ago");
        assert_eq!(time_ago(NOW, NOW - 86_400_000 * 3), "3d ago");
        assert_eq!(time_ago(NOW, NOW + 5_000), "just now");
    }
}
