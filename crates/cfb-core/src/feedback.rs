//! The authoritative in-memory collection of feedback records.
//!
//! Every mutation is total: an identifier that matches nothing is logged at
//! debug level and otherwise ignored.

use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::model::{FeedbackRecord, FeedbackStatus, NewFeedback, VoteChange, VoterId};
use crate::random::RandomSource;
use crate::{seed, tx_hash};

pub struct FeedbackStore {
    /// Newest first.
    records: Vec<FeedbackRecord>,
    next_seq: u64,
    rng: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl FeedbackStore {
    pub fn new(rng: Box<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            next_seq: 1,
            rng,
            clock,
        }
    }

    /// A store preloaded with the sample board.
    pub fn seeded(mut rng: Box<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        let records = seed::records(rng.as_mut(), clock.now_ms());
        Self {
            records,
            next_seq: 1,
            rng,
            clock,
        }
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> Vec<FeedbackRecord> {
        self.records.clone()
    }

    pub fn get(&self, id: &str) -> Option<&FeedbackRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a pending record from `input` and put it at the front.
    pub fn create(&mut self, input: NewFeedback) -> FeedbackRecord {
        let timestamp = self.clock.now_ms();
        let id = self.allocate_id(timestamp);
        let hash = tx_hash::fabricate(self.rng.as_mut());
        let record = FeedbackRecord::new(id, input, timestamp, hash, 0, FeedbackStatus::Pending);
        info!(
            target: "feedback",
            id = %record.id,
            category = %record.category,
            "feedback recorded"
        );
        self.records.insert(0, record.clone());
        record
    }

    /// Toggle the session voter's vote on `id`.
    pub fn vote(&mut self, id: &str) -> Option<VoteChange> {
        self.vote_as(id, &VoterId::session())
    }

    pub fn vote_as(&mut self, id: &str, voter: &VoterId) -> Option<VoteChange> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!(target: "feedback", id, "vote ignored; unknown id");
            return None;
        };
        let change = record.toggle_vote(voter);
        debug!(
            target: "feedback",
            id,
            voter = voter.as_str(),
            votes = record.votes,
            ?change,
            "vote toggled"
        );
        Some(change)
    }

    /// Overwrite the status of `id`. Returns whether a record matched.
    pub fn update_status(&mut self, id: &str, status: FeedbackStatus) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                let previous = record.status;
                record.status = status;
                info!(target: "feedback", id, from = %previous, to = %status, "status updated");
                true
            }
            None => {
                debug!(target: "feedback", id, %status, "status update ignored; unknown id");
                false
            }
        }
    }

    /// Remove `id`. Returns whether a record matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            info!(target: "feedback", id, "feedback deleted");
        } else {
            debug!(target: "feedback", id, "delete ignored; unknown id");
        }
        removed
    }

    fn allocate_id(&mut self, timestamp: i64) -> String {
        loop {
            let candidate = format!("fb-{}-{}", timestamp, self.next_seq);
            self.next_seq += 1;
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::Category;
    use crate::random::{ScriptedRandom, SeededRandom};
    use std::collections::HashSet;

    const NOW: i64 = 1_750_000_000_000;

    fn seeded_store() -> (FeedbackStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(NOW));
        let store = FeedbackStore::seeded(Box::new(SeededRandom::new(3)), clock.clone());
        (store, clock)
    }

    fn input(category: Category, title: &str, message: &str) -> NewFeedback {
        NewFeedback {
            category,
            title: title.into(),
            message: message.into(),
        }
    }

    #[test]
    fn create_prepends_a_pending_record() {
        let (mut store, clock) = seeded_store();
        let before = store.len();
        let started = clock.now_ms();
        let record = store.create(input(Category::Safety, "X", "Y"));

        assert_eq!(store.len(), before + 1);
        assert_eq!(store.records()[0], record);
        assert_eq!(record.status, FeedbackStatus::Pending);
        assert_eq!(record.votes, 0);
        assert!(!record.has_voted);
        assert!(record.timestamp >= started);
        assert_eq!(record.category, Category::Safety);
        assert!(tx_hash::is_well_formed(&record.tx_hash));
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let (mut store, _clock) = seeded_store();
        let ids: HashSet<String> = (0..20)
            .map(|i| store.create(input(Category::Other, &format!("t{i}"), "m")).id)
            .collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn distinct_creates_get_distinct_hashes() {
        let (mut store, _clock) = seeded_store();
        let a = store.create(input(Category::Events, "a", "a"));
        let b = store.create(input(Category::Events, "b", "b"));
        assert_ne!(a.tx_hash, b.tx_hash);
        assert_eq!(a.tx_hash.len(), tx_hash::TX_HASH_LEN);
    }

    #[test]
    fn injected_source_fixes_the_hash() {
        let clock = Arc::new(ManualClock::new(NOW));
        let mut store = FeedbackStore::new(Box::new(ScriptedRandom::new(vec![1])), clock);
        let record = store.create(input(Category::Faculty, "t", "m"));
        assert_eq!(record.tx_hash, "B".repeat(52));
        assert_eq!(record.id, format!("fb-{NOW}-1"));
    }

    #[test]
    fn vote_toggles_cafeteria_record() {
        let (mut store, _clock) = seeded_store();
        assert_eq!(store.vote("fb-003"), Some(VoteChange::Recorded));
        let rec = store.get("fb-003").expect("fb-003");
        assert_eq!((rec.votes, rec.has_voted), (90, true));

        assert_eq!(store.vote("fb-003"), Some(VoteChange::Removed));
        let rec = store.get("fb-003").expect("fb-003");
        assert_eq!((rec.votes, rec.has_voted), (89, false));
    }

    #[test]
    fn even_vote_counts_restore_state() {
        let (mut store, _clock) = seeded_store();
        let before = store.snapshot();
        for _ in 0..6 {
            store.vote("fb-001");
        }
        assert_eq!(store.snapshot(), before);
        store.vote("fb-001");
        assert_eq!(store.get("fb-001").map(|r| r.votes), Some(48));
    }

    #[test]
    fn votes_never_go_negative() {
        let clock = Arc::new(ManualClock::new(NOW));
        let mut store = FeedbackStore::new(Box::new(SeededRandom::new(9)), clock);
        let id = store.create(input(Category::Other, "t", "m")).id;
        store.vote(&id);
        store.vote(&id);
        assert_eq!(store.get(&id).map(|r| r.votes), Some(0));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (mut store, _clock) = seeded_store();
        let before = store.snapshot();
        assert_eq!(store.vote("fb-missing"), None);
        assert!(!store.update_status("fb-missing", FeedbackStatus::Resolved));
        assert!(!store.delete("fb-missing"));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn any_status_is_reachable_from_any_other() {
        let (mut store, _clock) = seeded_store();
        for from in FeedbackStatus::ALL {
            for to in FeedbackStatus::ALL {
                store.update_status("fb-002", from);
                store.update_status("fb-002", to);
                assert_eq!(store.get("fb-002").map(|r| r.status), Some(to));
            }
        }
    }

    #[test]
    fn second_delete_is_a_no_op() {
        let (mut store, _clock) = seeded_store();
        assert!(store.delete("fb-004"));
        let len = store.len();
        assert!(!store.delete("fb-004"));
        assert_eq!(store.len(), len);
        assert!(store.get("fb-004").is_none());
    }

    #[test]
    fn status_and_delete_leave_hash_untouched() {
        let (mut store, _clock) = seeded_store();
        let hash = store.get("fb-005").map(|r| r.tx_hash.clone());
        store.update_status("fb-005", FeedbackStatus::Resolved);
        store.vote("fb-005");
        store.delete("fb-001");
        assert_eq!(store.get("fb-005").map(|r| r.tx_hash.clone()), hash);
    }
}
