//! Core of the campus feedback board: the feedback and session containers,
//! the submission pipeline, and the read models built over them.
//!
//! Everything hangs off an [`AppContext`] that is constructed once and passed
//! to consumers explicitly.

pub mod board;
pub mod clock;
mod config;
pub mod context;
pub mod feedback;
pub mod gate;
pub mod model;
pub mod moderation;
pub mod random;
pub mod seed;
pub mod session;
pub mod submission;
pub mod tx_hash;

mod actions;

#[cfg(test)]
pub(crate) mod test_support;

pub use board::{BoardQuery, BoardStats, BoardView, SortOrder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    config_schema_json, load_config, load_effective, parse_config, resolve_config_path,
    write_schema_file, BoardConfig, Config, ConfigError, LoadedConfig, ServerConfig,
    SessionConfig, SubmissionConfig, DEFAULT_CONFIG_PATH,
};
pub use context::{AppContext, AppContextBuilder, ProvisionError, Shared};
pub use feedback::FeedbackStore;
pub use gate::GateError;
pub use model::{
    Category, FeedbackRecord, FeedbackStatus, NewFeedback, ParseCategoryError, ParseStatusError,
    VoteChange, VoterId,
};
pub use moderation::{CategoryShare, Dashboard, DashboardStats, StatusFilter};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use session::{SessionPhase, SessionState, SessionStore, MOCK_ADDRESSES};
pub use submission::{Draft, Limits, Receipt, SubmitError, Submitter, ValidationError};
