//! Composition root. The two containers are provided explicitly here and
//! handed to consumers by reference; there are no ambient singletons.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use cfb_events::Bus;
use parking_lot::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::feedback::FeedbackStore;
use crate::random::ThreadRandom;
use crate::session::SessionStore;
use crate::submission::Submitter;

pub type Shared<T> = Arc<RwLock<T>>;

const DEFAULT_BUS_CAPACITY: usize = 128;

/// A consumer asked for a container that was never provided. This is a wiring
/// bug, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    #[error("feedback container requested outside its provider")]
    MissingFeedback,
    #[error("session container requested outside its provider")]
    MissingSession,
}

#[derive(Clone)]
pub struct AppContext {
    feedback: Shared<FeedbackStore>,
    session: Shared<SessionStore>,
    bus: Bus,
    clock: Arc<dyn Clock>,
    config: Arc<Config>,
    in_flight: Arc<AtomicBool>,
}

impl AppContext {
    pub fn builder(config: Config) -> AppContextBuilder {
        AppContextBuilder::new(config)
    }

    /// Production wiring: OS-seeded randomness, system clock, containers
    /// configured from `config`.
    pub fn from_config(config: Config) -> Result<Self, ProvisionError> {
        AppContextBuilder::new(config).provision_defaults().build()
    }

    pub fn feedback_store(&self) -> &Shared<FeedbackStore> {
        &self.feedback
    }

    pub fn session_store(&self) -> &Shared<SessionStore> {
        &self.session
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn submitter(&self) -> Submitter {
        Submitter::new(
            Arc::clone(&self.feedback),
            Arc::clone(&self.session),
            self.bus.clone(),
            self.config.submission.limits(),
            self.config.submission.delay(),
            Arc::clone(&self.in_flight),
        )
    }
}

pub struct AppContextBuilder {
    config: Config,
    bus: Option<Bus>,
    clock: Option<Arc<dyn Clock>>,
    feedback: Option<FeedbackStore>,
    session: Option<SessionStore>,
}

impl AppContextBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            bus: None,
            clock: None,
            feedback: None,
            session: None,
        }
    }

    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_feedback(mut self, store: FeedbackStore) -> Self {
        self.feedback = Some(store);
        self
    }

    pub fn with_session(mut self, store: SessionStore) -> Self {
        self.session = Some(store);
        self
    }

    /// Fill any container not yet provided from the config.
    pub fn provision_defaults(mut self) -> Self {
        let clock = self.clock_or_default();
        if self.feedback.is_none() {
            let rng = Box::new(ThreadRandom);
            self.feedback = Some(if self.config.board.seed {
                FeedbackStore::seeded(rng, clock)
            } else {
                FeedbackStore::new(rng, clock)
            });
        }
        if self.session.is_none() {
            self.session = Some(SessionStore::with_pool(
                self.config.session.mock_addresses.clone(),
                Box::new(ThreadRandom),
            ));
        }
        self
    }

    pub fn build(mut self) -> Result<AppContext, ProvisionError> {
        let clock = self.clock_or_default();
        let feedback = self.feedback.ok_or(ProvisionError::MissingFeedback)?;
        let session = self.session.ok_or(ProvisionError::MissingSession)?;
        Ok(AppContext {
            feedback: Arc::new(RwLock::new(feedback)),
            session: Arc::new(RwLock::new(session)),
            bus: self
                .bus
                .unwrap_or_else(|| Bus::new(DEFAULT_BUS_CAPACITY)),
            clock,
            config: Arc::new(self.config),
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    fn clock_or_default(&mut self) -> Arc<dyn Clock> {
        Arc::clone(self.clock.get_or_insert_with(|| Arc::new(SystemClock)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::random::SeededRandom;

    #[test]
    fn build_fails_loudly_without_providers() {
        let err = AppContextBuilder::new(Config::default())
            .with_session(SessionStore::new(Box::new(SeededRandom::new(1))))
            .build()
            .err();
        assert_eq!(err, Some(ProvisionError::MissingFeedback));

        let clock = Arc::new(ManualClock::new(0));
        let err = AppContextBuilder::new(Config::default())
            .with_feedback(FeedbackStore::new(Box::new(SeededRandom::new(1)), clock))
            .build()
            .err();
        assert_eq!(err, Some(ProvisionError::MissingSession));
    }

    #[test]
    fn defaults_follow_the_seed_flag() {
        let ctx = AppContext::from_config(Config::default()).expect("context");
        assert_eq!(ctx.feedback_store().read().len(), 5);

        let mut config = Config::default();
        config.board.seed = false;
        config.session.mock_addresses = vec!["ALGOONLYONE".into()];
        let ctx = AppContext::from_config(config).expect("context");
        assert!(ctx.feedback_store().read().is_empty());
        assert_eq!(ctx.session_store().read().pool(), ["ALGOONLYONE".to_string()]);
    }

    #[test]
    fn clones_share_the_same_containers() {
        let ctx = AppContext::from_config(Config::default()).expect("context");
        let other = ctx.clone();
        other.session_store().write().connect();
        assert!(ctx.session_store().read().is_connected());
    }
}
