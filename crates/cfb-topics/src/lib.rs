//! Canonical notice topics published on the feedback bus.
//!
//! Presentation layers subscribe to these to render toasts and banners.
//! Keep this list grouped by subsystem and favor dot.case names.

// Session
pub const TOPIC_SESSION_CONNECTED: &str = "session.connected";
pub const TOPIC_SESSION_DISCONNECTED: &str = "session.disconnected";

// Feedback
pub const TOPIC_FEEDBACK_SUBMITTED: &str = "feedback.submitted";
pub const TOPIC_FEEDBACK_DELETED: &str = "feedback.deleted";
pub const TOPIC_FEEDBACK_STATUS_UPDATED: &str = "feedback.status.updated";

// Votes
pub const TOPIC_VOTE_RECORDED: &str = "feedback.vote.recorded";
pub const TOPIC_VOTE_REMOVED: &str = "feedback.vote.removed";
pub const TOPIC_VOTE_REJECTED: &str = "feedback.vote.rejected";

/// Every topic, in declaration order.
pub const ALL: &[&str] = &[
    TOPIC_SESSION_CONNECTED,
    TOPIC_SESSION_DISCONNECTED,
    TOPIC_FEEDBACK_SUBMITTED,
    TOPIC_FEEDBACK_DELETED,
    TOPIC_FEEDBACK_STATUS_UPDATED,
    TOPIC_VOTE_RECORDED,
    TOPIC_VOTE_REMOVED,
    TOPIC_VOTE_REJECTED,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn topics_are_unique_and_dot_case() {
        let mut seen = HashSet::new();
        for topic in ALL {
            assert!(seen.insert(*topic), "duplicate topic {topic}");
            assert!(topic.contains('.'));
            assert!(topic
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '.' || c == '_'));
        }
    }
}
