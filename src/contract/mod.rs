//! Contract layer - public models, the store seam and the error taxonomy
//!
//! Everything here is transport-agnostic; the HTTP specifics live in `infra`.

pub mod error;
pub mod model;
pub mod store;

pub use error::SyncError;
pub use model::{
    ChannelName, CleanupReport, MentionGuardSettings, QuestionKind, ResponseKind, ResponseSet,
    SectionId, SpecialUserReplies, TriviaQuestion,
};
pub use store::SettingsStore;
