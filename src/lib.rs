//! Panel Sync Client
//!
//! Synchronizes a chat-bot control panel's editable sections (mention-guard
//! settings, game response sets, trivia questions, channel list, per-user
//! special replies) with a remote settings store over HTTP/JSON. One
//! [`SyncService`] replaces the panel's many near-duplicate fetch handlers;
//! the route table, duplicate-add policy and request deadline are
//! configuration, not code.

// Public exports
pub mod contract;
pub use contract::{
    ChannelName, CleanupReport, MentionGuardSettings, QuestionKind, ResponseKind, ResponseSet,
    SectionId, SettingsStore, SpecialUserReplies, SyncError, TriviaQuestion,
};

pub mod config;
pub use config::{DuplicatePolicy, RouteTable, SyncConfig};

pub mod domain;
pub use domain::{
    NoOpNotifier, Notice, Notifier, OpState, SectionStatus, SyncService, TracingNotifier,
};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod infra;
pub use infra::http::HttpSettingsStore;

use std::sync::Arc;

/// Build a [`SyncService`] over the HTTP store described by `config`, with
/// notices forwarded to the tracing log.
pub fn connect(config: &SyncConfig) -> Result<SyncService, SyncError> {
    let store = Arc::new(HttpSettingsStore::new(config)?);
    Ok(SyncService::new(
        store,
        Arc::new(TracingNotifier),
        config.duplicate_channels,
    ))
}
