//! Submission pipeline: validate a draft, check the session gate, wait out the
//! simulated confirmation delay, then record the feedback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cfb_events::{Bus, Notice};
use cfb_topics as topics;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::context::Shared;
use crate::feedback::FeedbackStore;
use crate::gate::{self, GateError};
use crate::model::{Category, FeedbackRecord, NewFeedback};
use crate::session::SessionStore;
use crate::tx_hash;

/// Raw form input, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Draft {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub title_max: usize,
    pub message_max: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            title_max: 100,
            message_max: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("category is required")]
    MissingCategory,
    #[error("message is required")]
    EmptyMessage,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("title is {len} characters; limit is {max}")]
    TitleTooLong { len: usize, max: usize },
    #[error("message is {len} characters; limit is {max}")]
    MessageTooLong { len: usize, max: usize },
}

pub fn validate(draft: &Draft, limits: &Limits) -> Result<NewFeedback, ValidationError> {
    let title = draft.title.trim();
    let category = draft.category.trim();
    let message = draft.message.trim();

    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if category.is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    if message.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    let category: Category = category
        .parse()
        .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;

    let title_len = title.chars().count();
    if title_len > limits.title_max {
        return Err(ValidationError::TitleTooLong {
            len: title_len,
            max: limits.title_max,
        });
    }
    let message_len = message.chars().count();
    if message_len > limits.message_max {
        return Err(ValidationError::MessageTooLong {
            len: message_len,
            max: limits.message_max,
        });
    }

    Ok(NewFeedback {
        category,
        title: title.to_string(),
        message: message.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("submission task aborted")]
    Aborted,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub tx_hash: String,
    pub record: FeedbackRecord,
}

/// Clears the in-flight flag when the submission task finishes.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct Submitter {
    feedback: Shared<FeedbackStore>,
    session: Shared<SessionStore>,
    bus: Bus,
    limits: Limits,
    delay: Duration,
    in_flight: Arc<AtomicBool>,
}

impl Submitter {
    pub(crate) fn new(
        feedback: Shared<FeedbackStore>,
        session: Shared<SessionStore>,
        bus: Bus,
        limits: Limits,
        delay: Duration,
        in_flight: Arc<AtomicBool>,
    ) -> Self {
        Self {
            feedback,
            session,
            bus,
            limits,
            delay,
            in_flight,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit `draft` once the delay elapses.
    ///
    /// The wait and the creation run on a spawned task: once accepted, a
    /// submission always completes even if the caller stops waiting.
    pub async fn submit(&self, draft: Draft) -> Result<Receipt, SubmitError> {
        {
            let session = self.session.read();
            gate::require_token(session.state())?;
        }
        let input = validate(&draft, &self.limits)?;
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::InFlight)?;

        info!(
            target: "submission",
            category = %input.category,
            delay_ms = self.delay.as_millis() as u64,
            "submission accepted; awaiting confirmation"
        );

        let feedback = Arc::clone(&self.feedback);
        let bus = self.bus.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            let _guard = guard;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let record = feedback.write().create(input);
            bus.notify(
                topics::TOPIC_FEEDBACK_SUBMITTED,
                Notice::success("Feedback Submitted On-Chain")
                    .with_description(format!("Tx: {}", tx_hash::short(&record.tx_hash, 12))),
            );
            record
        });

        match task.await {
            Ok(record) => Ok(Receipt {
                tx_hash: record.tx_hash.clone(),
                record,
            }),
            Err(err) => {
                warn!(target: "submission", %err, "submission task failed");
                Err(SubmitError::Aborted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::context::AppContextBuilder;
    use crate::model::FeedbackStatus;
    use crate::random::SeededRandom;
    use crate::Config;

    fn draft(category: &str, title: &str, message: &str) -> Draft {
        Draft {
            category: category.into(),
            title: title.into(),
            message: message.into(),
        }
    }

    fn context(delay_ms: u64) -> crate::AppContext {
        let mut config = Config::default();
        config.submission.delay_ms = delay_ms;
        let clock = Arc::new(ManualClock::new(1_750_000_000_000));
        AppContextBuilder::new(config)
            .with_clock(clock.clone())
            .with_feedback(FeedbackStore::seeded(
                Box::new(SeededRandom::new(21)),
                clock,
            ))
            .with_session(SessionStore::new(Box::new(SeededRandom::new(22))))
            .build()
            .expect("context")
    }

    #[test]
    fn validation_trims_and_checks_required_fields() {
        let limits = Limits::default();
        let ok = validate(&draft(" Safety ", "  Dark path ", " fix it\n"), &limits).expect("ok");
        assert_eq!(ok.category, Category::Safety);
        assert_eq!(ok.title, "Dark path");
        assert_eq!(ok.message, "fix it");

        assert_eq!(
            validate(&draft("Safety", "   ", "m"), &limits),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            validate(&draft("", "t", "m"), &limits),
            Err(ValidationError::MissingCategory)
        );
        assert_eq!(
            validate(&draft("Safety", "t", "\n"), &limits),
            Err(ValidationError::EmptyMessage)
        );
        assert_eq!(
            validate(&draft("Parking", "t", "m"), &limits),
            Err(ValidationError::UnknownCategory("Parking".into()))
        );
    }

    #[test]
    fn validation_enforces_character_limits() {
        let limits = Limits::default();
        let long_title = "é".repeat(101);
        assert_eq!(
            validate(&draft("Other", &long_title, "m"), &limits),
            Err(ValidationError::TitleTooLong { len: 101, max: 100 })
        );
        assert!(validate(&draft("Other", &"é".repeat(100), "m"), &limits).is_ok());
        assert_eq!(
            validate(&draft("Other", "t", &"x".repeat(1001)), &limits),
            Err(ValidationError::MessageTooLong {
                len: 1001,
                max: 1000
            })
        );
    }

    #[tokio::test]
    async fn submit_requires_a_connected_wallet() {
        let ctx = context(0);
        let submitter = ctx.submitter();
        let err = submitter
            .submit(draft("Safety", "X", "Y"))
            .await
            .expect_err("gated");
        assert!(matches!(err, SubmitError::Gate(GateError::NotConnected)));
        assert_eq!(ctx.feedbacks().len(), 5);
    }

    #[tokio::test]
    async fn submit_records_pending_feedback_after_delay() {
        let ctx = context(20);
        ctx.connect();
        let mut rx = ctx.bus().subscribe();
        let submitter = ctx.submitter();

        let receipt = submitter
            .submit(draft("Safety", "X", "Y"))
            .await
            .expect("submitted");
        assert_eq!(receipt.record.status, FeedbackStatus::Pending);
        assert_eq!(receipt.record.votes, 0);
        assert_eq!(receipt.tx_hash, receipt.record.tx_hash);
        assert!(!submitter.is_submitting());

        let records = ctx.feedbacks();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].id, receipt.record.id);

        let env = rx.recv().await.expect("notice");
        assert_eq!(env.kind, topics::TOPIC_FEEDBACK_SUBMITTED);
        let expected = format!("Tx: {}...", &receipt.tx_hash[..12]);
        assert_eq!(env.payload["description"], expected.as_str());
    }

    #[tokio::test]
    async fn concurrent_submit_is_rejected_while_in_flight() {
        let ctx = context(50);
        ctx.connect();
        let submitter = ctx.submitter();
        let (first, second) = tokio::join!(
            submitter.submit(draft("Events", "a", "a")),
            submitter.submit(draft("Events", "b", "b")),
        );
        assert!(first.is_ok());
        assert!(matches!(second, Err(SubmitError::InFlight)));
        assert_eq!(ctx.feedbacks().len(), 6);

        submitter
            .submit(draft("Events", "c", "c"))
            .await
            .expect("flag released");
        assert_eq!(ctx.feedbacks().len(), 7);
    }

    #[tokio::test]
    async fn abandoned_submission_still_completes() {
        let ctx = context(60);
        ctx.connect();
        let submitter = ctx.submitter();
        let waited = tokio::time::timeout(
            Duration::from_millis(5),
            submitter.submit(draft("Faculty", "t", "m")),
        )
        .await;
        assert!(waited.is_err());
        assert!(submitter.is_submitting());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!submitter.is_submitting());
        let records = ctx.feedbacks();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].title, "t");
    }
}
