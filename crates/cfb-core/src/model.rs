use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Moderation state of a feedback record. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Pending,
    Reviewed,
    Resolved,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 3] = [
        FeedbackStatus::Pending,
        FeedbackStatus::Reviewed,
        FeedbackStatus::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Reviewed => "reviewed",
            FeedbackStatus::Resolved => "resolved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "Pending",
            FeedbackStatus::Reviewed => "Reviewed",
            FeedbackStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feedback status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for FeedbackStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FeedbackStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStatusError(trimmed.to_string()))
    }
}

/// Fixed category set offered by the submission form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Infrastructure,
    Academics,
    #[serde(rename = "Campus Life")]
    CampusLife,
    Safety,
    Administration,
    Faculty,
    Events,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Infrastructure,
        Category::Academics,
        Category::CampusLife,
        Category::Safety,
        Category::Administration,
        Category::Faculty,
        Category::Events,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Infrastructure => "Infrastructure",
            Category::Academics => "Academics",
            Category::CampusLife => "Campus Life",
            Category::Safety => "Safety",
            Category::Administration => "Administration",
            Category::Faculty => "Faculty",
            Category::Events => "Events",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|cat| cat.label() == trimmed)
            .or_else(|| {
                Category::ALL
                    .into_iter()
                    .find(|cat| cat.label().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| ParseCategoryError(trimmed.to_string()))
    }
}

/// Identity of a voter. Only the local session voter exists in the demo, but
/// records keep a set so several voters can coexist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoterId(String);

impl VoterId {
    const SESSION: &'static str = "session";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The voter acting for this process' single simulated session.
    pub fn session() -> Self {
        Self(Self::SESSION.to_string())
    }

    pub fn is_session(&self) -> bool {
        self.0 == Self::SESSION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller-supplied part of a new record; everything else is assigned on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewFeedback {
    pub category: Category,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub message: String,
    /// Creation time, epoch millis.
    pub timestamp: i64,
    pub tx_hash: String,
    pub votes: u32,
    /// Whether the session voter currently has a vote on this record.
    pub has_voted: bool,
    pub status: FeedbackStatus,
    #[serde(skip)]
    voters: BTreeSet<VoterId>,
}

impl FeedbackRecord {
    pub(crate) fn new(
        id: String,
        input: NewFeedback,
        timestamp: i64,
        tx_hash: String,
        votes: u32,
        status: FeedbackStatus,
    ) -> Self {
        Self {
            id,
            category: input.category,
            title: input.title,
            message: input.message,
            timestamp,
            tx_hash,
            votes,
            has_voted: false,
            status,
            voters: BTreeSet::new(),
        }
    }

    pub fn has_vote_from(&self, voter: &VoterId) -> bool {
        self.voters.contains(voter)
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Flip `voter`'s vote. Returns the resulting direction.
    pub(crate) fn toggle_vote(&mut self, voter: &VoterId) -> VoteChange {
        let change = if self.voters.remove(voter) {
            self.votes = self.votes.saturating_sub(1);
            VoteChange::Removed
        } else {
            self.voters.insert(voter.clone());
            self.votes = self.votes.saturating_add(1);
            VoteChange::Recorded
        };
        if voter.is_session() {
            self.has_voted = change == VoteChange::Recorded;
        }
        change
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteChange {
    Recorded,
    Removed,
}
