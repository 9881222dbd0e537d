//! Remote store seam
//!
//! One method per remote operation the panel performs. The HTTP
//! implementation lives in `infra::http`; tests substitute in-memory doubles.
//! Three families of semantics share this seam: the settings singleton
//! (whole-object replace), replace-whole-list collections, and id-keyed CRUD.

use super::error::SyncError;
use super::model::{
    ChannelName, CleanupReport, MentionGuardSettings, ResponseKind, SpecialUserReplies,
    TriviaQuestion,
};
use async_trait::async_trait;

/// Remote settings/collection store the panel syncs against.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    // ===== Mention guard (settings singleton) =====

    /// Fetch the mention-guard settings. `None` means the resource was never
    /// written; callers substitute defaults.
    async fn fetch_mention(&self) -> Result<Option<MentionGuardSettings>, SyncError>;

    /// Replace the mention-guard settings wholesale.
    async fn replace_mention(&self, settings: &MentionGuardSettings) -> Result<(), SyncError>;

    // ===== Response sets (replace-whole-list) =====

    /// Fetch one response collection. A never-written collection is empty.
    async fn fetch_responses(&self, kind: &ResponseKind) -> Result<Vec<String>, SyncError>;

    /// Replace one response collection wholesale, preserving order.
    async fn replace_responses(
        &self,
        kind: &ResponseKind,
        lines: &[String],
    ) -> Result<(), SyncError>;

    // ===== Trivia questions (id-keyed CRUD) =====

    async fn fetch_questions(&self) -> Result<Vec<TriviaQuestion>, SyncError>;

    /// Create a question; the returned record carries the server-assigned id.
    async fn create_question(&self, question: &TriviaQuestion)
        -> Result<TriviaQuestion, SyncError>;

    /// Full-record update keyed by id.
    async fn update_question(
        &self,
        id: i64,
        question: &TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError>;

    async fn delete_question(&self, id: i64) -> Result<(), SyncError>;

    /// Bulk replace of the whole question bank (file import path).
    async fn replace_questions(&self, questions: &[TriviaQuestion]) -> Result<(), SyncError>;

    // ===== Channels (name-keyed) =====

    async fn fetch_channels(&self) -> Result<Vec<ChannelName>, SyncError>;

    async fn create_channel(&self, name: &ChannelName) -> Result<(), SyncError>;

    /// Delete by name. Deleting an absent channel is success (idempotent).
    async fn delete_channel(&self, name: &ChannelName) -> Result<(), SyncError>;

    // ===== Special replies (username-keyed upsert) =====

    async fn fetch_special(&self) -> Result<Vec<SpecialUserReplies>, SyncError>;

    /// Create or replace the replies for one username.
    async fn upsert_special(&self, entry: &SpecialUserReplies) -> Result<(), SyncError>;

    /// Delete by username. Deleting an absent entry is success (idempotent).
    async fn delete_special(&self, username: &str) -> Result<(), SyncError>;

    /// Server-side removal of entries with empty/invalid reply sets.
    async fn cleanup_special(&self) -> Result<CleanupReport, SyncError>;
}
