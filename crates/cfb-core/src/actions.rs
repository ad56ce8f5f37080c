//! User-facing operations over the provided containers. Each one mutates the
//! container synchronously and then publishes the matching notice.

use cfb_events::Notice;
use cfb_topics as topics;

use crate::board::{self, BoardQuery, BoardView};
use crate::context::AppContext;
use crate::gate::{self, GateError};
use crate::model::{FeedbackRecord, FeedbackStatus, VoteChange};
use crate::moderation::{self, Dashboard, StatusFilter};
use crate::session::{short_address, SessionState};

impl AppContext {
    pub fn session_state(&self) -> SessionState {
        self.session_store().read().state().clone()
    }

    pub fn connect(&self) -> SessionState {
        let state = self.session_store().write().connect().clone();
        let address = state.address.as_deref().map(short_address).unwrap_or_default();
        self.bus().notify(
            topics::TOPIC_SESSION_CONNECTED,
            Notice::success("Wallet Connected")
                .with_description(format!("Connected to Algorand Testnet: {address}")),
        );
        state
    }

    pub fn disconnect(&self) -> SessionState {
        let state = self.session_store().write().disconnect().clone();
        self.bus().notify(
            topics::TOPIC_SESSION_DISCONNECTED,
            Notice::info("Wallet Disconnected"),
        );
        state
    }

    pub fn feedbacks(&self) -> Vec<FeedbackRecord> {
        self.feedback_store().read().snapshot()
    }

    pub fn feedback(&self, id: &str) -> Option<FeedbackRecord> {
        self.feedback_store().read().get(id).cloned()
    }

    /// Toggle the session's vote. Only connected sessions may vote; an
    /// unknown id is `Ok(None)`.
    pub fn cast_vote(&self, id: &str) -> Result<Option<VoteChange>, GateError> {
        let gated = gate::require_connected(self.session_store().read().state());
        if let Err(err) = gated {
            self.bus().notify(
                topics::TOPIC_VOTE_REJECTED,
                Notice::error("Connect your wallet to vote"),
            );
            return Err(err);
        }
        let change = self.feedback_store().write().vote(id);
        match change {
            Some(VoteChange::Recorded) => self.bus().notify(
                topics::TOPIC_VOTE_RECORDED,
                Notice::success("Vote Recorded (0-ALGO Tx)")
                    .with_description("Your anonymous vote has been recorded on-chain."),
            ),
            Some(VoteChange::Removed) => self.bus().notify(
                topics::TOPIC_VOTE_REMOVED,
                Notice::success("Vote Removed").with_description("Your vote has been withdrawn."),
            ),
            None => {}
        }
        Ok(change)
    }

    pub fn set_status(&self, id: &str, status: FeedbackStatus) -> bool {
        let matched = self.feedback_store().write().update_status(id, status);
        if matched {
            self.bus().notify(
                topics::TOPIC_FEEDBACK_STATUS_UPDATED,
                Notice::success(format!("Status updated to \"{status}\"")),
            );
        }
        matched
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.feedback_store().write().delete(id);
        if removed {
            self.bus().notify(
                topics::TOPIC_FEEDBACK_DELETED,
                Notice::success("Feedback removed from dashboard"),
            );
        }
        removed
    }

    pub fn board(&self, query: &BoardQuery) -> BoardView {
        board::query(self.feedback_store().read().records(), query)
    }

    pub fn dashboard(&self, filter: StatusFilter) -> Dashboard {
        moderation::dashboard(self.feedback_store().read().records(), filter)
    }

    pub fn time_ago(&self, timestamp_ms: i64) -> String {
        board::time_ago(self.clock().now_ms(), timestamp_ms)
    }
}
