//! Sync service - the one client behind every panel section
//!
//! Replaces the panel's per-page fetch variants with a single component.
//! Every operation follows the same shape: validate, issue a request token,
//! call the store, discard the result if a newer request superseded it,
//! update the mirror and status, emit one notice. Mirrors are only written
//! from confirmed store results; there are no optimistic updates.

use super::mirror::{OpState, SectionState, SectionStatus};
use super::notify::{Notice, Notifier};
use super::validation;
use crate::config::DuplicatePolicy;
use crate::contract::{
    ChannelName, CleanupReport, MentionGuardSettings, ResponseKind, ResponseSet, SectionId,
    SettingsStore, SpecialUserReplies, SyncError, TriviaQuestion,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Client-side sync service for all panel sections.
pub struct SyncService {
    store: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    duplicate_channels: DuplicatePolicy,
    state: SectionState,
}

impl SyncService {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
        duplicate_channels: DuplicatePolicy,
    ) -> Self {
        Self {
            store,
            notifier,
            duplicate_channels,
            state: SectionState::default(),
        }
    }

    // ===== Mention guard (settings singleton) =====

    /// Load the mention-guard settings into the mirror. A never-written
    /// remote resource yields defaults, not an error.
    pub async fn load_mention(&self) -> Result<MentionGuardSettings, SyncError> {
        let section = SectionId::Mention;
        let token = self.state.begin(&section);
        self.state.set_load(&section, OpState::Pending);

        let fetched = self.store.fetch_mention().await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match fetched {
            Ok(found) => {
                let settings = found.unwrap_or_default();
                self.state.set_mention(settings.clone());
                self.state.set_load(&section, OpState::Ok);
                tracing::info!(%section, "section loaded");
                self.notifier.notify(Notice::Loaded { section });
                Ok(settings)
            }
            Err(err) => Err(self.fail_load(&section, err)),
        }
    }

    /// Replace the mention-guard settings wholesale.
    pub async fn save_mention(&self, settings: MentionGuardSettings) -> Result<(), SyncError> {
        let section = SectionId::Mention;
        if let Err(err) = validation::validate_mention(&settings) {
            return Err(self.fail_validation(&section, err));
        }

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.replace_mention(&settings).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                self.state.set_mention(settings);
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, "section saved");
                self.notifier.notify(Notice::Saved { section });
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Import mention-guard settings from a JSON file and save them.
    pub async fn import_mention_from_file(&self, path: &Path) -> Result<(), SyncError> {
        let settings = self.read_json_file(&SectionId::Mention, path).await?;
        self.save_mention(settings).await
    }

    // ===== Response sets (replace-whole-list) =====

    pub async fn load_responses(&self, kind: &ResponseKind) -> Result<Vec<String>, SyncError> {
        let section = SectionId::Responses(kind.clone());
        let token = self.state.begin(&section);
        self.state.set_load(&section, OpState::Pending);

        let fetched = self.store.fetch_responses(kind).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match fetched {
            Ok(lines) => {
                self.state.set_responses(kind, lines.clone());
                self.state.set_load(&section, OpState::Ok);
                tracing::info!(%section, count = lines.len(), "section loaded");
                self.notifier.notify(Notice::Loaded { section });
                Ok(lines)
            }
            Err(err) => Err(self.fail_load(&section, err)),
        }
    }

    /// Replace one response collection wholesale. Lines are trimmed and
    /// empties dropped; a successful save refreshes the mirror from the
    /// store.
    pub async fn save_responses(
        &self,
        kind: &ResponseKind,
        lines: Vec<String>,
    ) -> Result<(), SyncError> {
        let section = SectionId::Responses(kind.clone());
        let lines = validation::normalize_lines(&lines);

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.replace_responses(kind, &lines).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                self.state.set_responses(kind, lines);
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, "section saved");
                self.notifier.notify(Notice::Saved { section });
                self.refresh_responses(kind).await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Append one line and resubmit the entire list.
    pub async fn add_response_line(
        &self,
        kind: &ResponseKind,
        line: &str,
    ) -> Result<(), SyncError> {
        let section = SectionId::Responses(kind.clone());
        let line = line.trim();
        if line.is_empty() {
            return Err(self.fail_validation(
                &section,
                SyncError::validation("response line cannot be empty"),
            ));
        }

        let mut lines = match self.ensure_responses(kind).await {
            Ok(lines) => lines,
            Err(err) => return Err(self.fail_save(&section, err)),
        };
        lines.push(line.to_string());
        self.save_responses(kind, lines).await
    }

    /// Replace the line at `index` and resubmit the entire list.
    pub async fn edit_response_line(
        &self,
        kind: &ResponseKind,
        index: usize,
        line: &str,
    ) -> Result<(), SyncError> {
        let section = SectionId::Responses(kind.clone());
        let line = line.trim();
        if line.is_empty() {
            return Err(self.fail_validation(
                &section,
                SyncError::validation("response line cannot be empty"),
            ));
        }

        let mut lines = match self.ensure_responses(kind).await {
            Ok(lines) => lines,
            Err(err) => return Err(self.fail_save(&section, err)),
        };
        if index >= lines.len() {
            return Err(self.fail_validation(
                &section,
                SyncError::validation(format!(
                    "line index {index} is out of range (list has {} lines)",
                    lines.len()
                )),
            ));
        }
        lines[index] = line.to_string();
        self.save_responses(kind, lines).await
    }

    /// Remove the line at `index` and resubmit the entire list.
    pub async fn remove_response_line(
        &self,
        kind: &ResponseKind,
        index: usize,
    ) -> Result<(), SyncError> {
        let section = SectionId::Responses(kind.clone());
        let mut lines = match self.ensure_responses(kind).await {
            Ok(lines) => lines,
            Err(err) => return Err(self.fail_save(&section, err)),
        };
        if index >= lines.len() {
            return Err(self.fail_validation(
                &section,
                SyncError::validation(format!(
                    "line index {index} is out of range (list has {} lines)",
                    lines.len()
                )),
            ));
        }
        lines.remove(index);
        self.save_responses(kind, lines).await
    }

    /// Import a response collection (JSON array of strings) and save it.
    pub async fn import_responses_from_file(
        &self,
        kind: &ResponseKind,
        path: &Path,
    ) -> Result<(), SyncError> {
        let section = SectionId::Responses(kind.clone());
        let lines: Vec<String> = self.read_json_file(&section, path).await?;
        self.save_responses(kind, lines).await
    }

    // ===== Trivia questions (id-keyed CRUD) =====

    pub async fn load_questions(&self) -> Result<Vec<TriviaQuestion>, SyncError> {
        let section = SectionId::Questions;
        let token = self.state.begin(&section);
        self.state.set_load(&section, OpState::Pending);

        let fetched = self.store.fetch_questions().await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match fetched {
            Ok(questions) => {
                self.state.set_questions(questions.clone());
                self.state.set_load(&section, OpState::Ok);
                tracing::info!(%section, count = questions.len(), "section loaded");
                self.notifier.notify(Notice::Loaded { section });
                Ok(questions)
            }
            Err(err) => Err(self.fail_load(&section, err)),
        }
    }

    /// Create a question; returns the record with its server-assigned id.
    pub async fn add_question(
        &self,
        question: TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError> {
        let section = SectionId::Questions;
        let question = match validation::normalize_question(&question) {
            Ok(question) => question,
            Err(err) => return Err(self.fail_validation(&section, err)),
        };

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.create_question(&question).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(created) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, id = ?created.id, "question created");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_questions().await;
                Ok(created)
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Full-record update keyed by id.
    pub async fn update_question(
        &self,
        id: i64,
        question: TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError> {
        let section = SectionId::Questions;
        let question = match validation::normalize_question(&question) {
            Ok(question) => question,
            Err(err) => return Err(self.fail_validation(&section, err)),
        };

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.update_question(id, &question).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(updated) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, id, "question updated");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_questions().await;
                Ok(updated)
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    pub async fn delete_question(&self, id: i64) -> Result<(), SyncError> {
        let section = SectionId::Questions;
        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.delete_question(id).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, id, "question deleted");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_questions().await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Import a question bank (JSON array) and bulk-replace the remote one.
    pub async fn import_questions_from_file(&self, path: &Path) -> Result<(), SyncError> {
        let section = SectionId::Questions;
        let raw: Vec<TriviaQuestion> = self.read_json_file(&section, path).await?;

        let mut questions = Vec::with_capacity(raw.len());
        for question in &raw {
            match validation::normalize_question(question) {
                Ok(question) => questions.push(question),
                Err(err) => return Err(self.fail_validation(&section, err)),
            }
        }

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.replace_questions(&questions).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, count = questions.len(), "question bank imported");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_questions().await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    // ===== Channels (name-keyed) =====

    pub async fn load_channels(&self) -> Result<Vec<ChannelName>, SyncError> {
        let section = SectionId::Channels;
        let token = self.state.begin(&section);
        self.state.set_load(&section, OpState::Pending);

        let fetched = self.store.fetch_channels().await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match fetched {
            Ok(channels) => {
                self.state.set_channels(channels.clone());
                self.state.set_load(&section, OpState::Ok);
                tracing::info!(%section, count = channels.len(), "section loaded");
                self.notifier.notify(Notice::Loaded { section });
                Ok(channels)
            }
            Err(err) => Err(self.fail_load(&section, err)),
        }
    }

    /// Add a channel. Duplicate adds follow the configured policy: `Reject`
    /// is a conflict error, `Ignore` is a no-op without a network call.
    pub async fn add_channel(&self, name: ChannelName) -> Result<(), SyncError> {
        let section = SectionId::Channels;
        let current = match self.ensure_channels().await {
            Ok(channels) => channels,
            Err(err) => return Err(self.fail_save(&section, err)),
        };

        if current.contains(&name) {
            return match self.duplicate_channels {
                DuplicatePolicy::Ignore => {
                    tracing::debug!(%section, channel = %name, "duplicate add ignored");
                    self.notifier.notify(Notice::Saved { section });
                    Ok(())
                }
                DuplicatePolicy::Reject => Err(self.fail_save(
                    &section,
                    SyncError::Conflict {
                        reason: format!("channel '{name}' already exists"),
                    },
                )),
            };
        }

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.create_channel(&name).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, channel = %name, "channel added");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_channels().await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Remove a channel by name. Removing an absent channel is idempotent.
    pub async fn remove_channel(&self, name: &ChannelName) -> Result<(), SyncError> {
        let section = SectionId::Channels;
        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.delete_channel(name).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                if let Some(mut channels) = self.state.channels() {
                    channels.retain(|channel| channel != name);
                    self.state.set_channels(channels);
                }
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, channel = %name, "channel removed");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_channels().await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    // ===== Special replies (username-keyed upsert) =====

    pub async fn load_special(&self) -> Result<Vec<SpecialUserReplies>, SyncError> {
        let section = SectionId::SpecialReplies;
        let token = self.state.begin(&section);
        self.state.set_load(&section, OpState::Pending);

        let fetched = self.store.fetch_special().await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match fetched {
            Ok(entries) => {
                self.state.set_special(entries.clone());
                self.state.set_load(&section, OpState::Ok);
                tracing::info!(%section, count = entries.len(), "section loaded");
                self.notifier.notify(Notice::Loaded { section });
                Ok(entries)
            }
            Err(err) => Err(self.fail_load(&section, err)),
        }
    }

    /// Create or replace the replies for one username.
    pub async fn upsert_special(
        &self,
        username: &str,
        replies: Vec<String>,
    ) -> Result<(), SyncError> {
        let section = SectionId::SpecialReplies;
        let entry = match validation::normalize_special(username, &replies) {
            Ok(entry) => entry,
            Err(err) => return Err(self.fail_validation(&section, err)),
        };

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.upsert_special(&entry).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, username = %entry.username, "special replies saved");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_special().await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Delete one user's entry. Deleting an absent entry is idempotent.
    pub async fn delete_special(&self, username: &str) -> Result<(), SyncError> {
        let section = SectionId::SpecialReplies;
        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.delete_special(username).await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(()) => {
                if let Some(mut entries) = self.state.special() {
                    entries.retain(|entry| entry.username != username);
                    self.state.set_special(entries);
                }
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, %username, "special replies removed");
                self.notifier.notify(Notice::Saved {
                    section: section.clone(),
                });
                self.refresh_special().await;
                Ok(())
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Ask the server to drop entries with empty/invalid reply sets.
    pub async fn cleanup_special(&self) -> Result<CleanupReport, SyncError> {
        let section = SectionId::SpecialReplies;
        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        let outcome = self.store.cleanup_special().await;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        match outcome {
            Ok(report) => {
                self.state.set_save(&section, OpState::Ok);
                tracing::info!(%section, removed = report.removed, "cleanup finished");
                self.notifier.notify(Notice::CleanupFinished {
                    removed: report.removed,
                });
                self.refresh_special().await;
                Ok(report)
            }
            Err(err) => Err(self.fail_save(&section, err)),
        }
    }

    /// Import special-reply entries (JSON array) and upsert each one.
    ///
    /// The remote store has no bulk endpoint for this section, so the import
    /// is not atomic: entries are upserted one at a time, and a mid-import
    /// failure leaves the entries before it applied. Upserts are idempotent,
    /// so re-running the import after a failure converges.
    pub async fn import_special_from_file(&self, path: &Path) -> Result<(), SyncError> {
        let section = SectionId::SpecialReplies;
        let raw: Vec<SpecialUserReplies> = self.read_json_file(&section, path).await?;

        let mut entries = Vec::with_capacity(raw.len());
        for entry in &raw {
            match validation::normalize_special(&entry.username, &entry.replies) {
                Ok(entry) => entries.push(entry),
                Err(err) => return Err(self.fail_validation(&section, err)),
            }
        }

        let token = self.state.begin(&section);
        self.state.set_save(&section, OpState::Pending);

        for entry in &entries {
            if let Err(err) = self.store.upsert_special(entry).await {
                if !self.state.is_current(&section, token) {
                    return Err(self.discard(&section));
                }
                return Err(self.fail_save(&section, err));
            }
        }
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }

        self.state.set_save(&section, OpState::Ok);
        tracing::info!(%section, count = entries.len(), "special replies imported");
        self.notifier.notify(Notice::Saved {
            section: section.clone(),
        });
        self.refresh_special().await;
        Ok(())
    }

    // ===== Mirror accessors =====

    pub fn mention(&self) -> Option<MentionGuardSettings> {
        self.state.mention()
    }

    pub fn responses(&self, kind: &ResponseKind) -> Option<ResponseSet> {
        self.state.responses(kind).map(|lines| ResponseSet {
            kind: kind.clone(),
            lines,
        })
    }

    pub fn questions(&self) -> Option<Vec<TriviaQuestion>> {
        self.state.questions()
    }

    pub fn channels(&self) -> Option<Vec<ChannelName>> {
        self.state.channels()
    }

    pub fn special(&self) -> Option<Vec<SpecialUserReplies>> {
        self.state.special()
    }

    pub fn section_status(&self, section: &SectionId) -> SectionStatus {
        self.state.status(section)
    }

    // ===== Helpers =====

    /// Record a discarded stale completion. No status change, no notice:
    /// the newer request owns both, and [`SectionState::begin`] already
    /// returned this request's pending half to idle.
    fn discard(&self, section: &SectionId) -> SyncError {
        tracing::warn!(%section, "discarding stale response");
        SyncError::Superseded {
            section: section.to_string(),
        }
    }

    fn fail_load(&self, section: &SectionId, err: SyncError) -> SyncError {
        self.state.set_load(section, OpState::Failed);
        tracing::error!(%section, error = %err, "load failed");
        self.notifier.notify(Notice::LoadFailed {
            section: section.clone(),
            detail: err.to_string(),
        });
        err
    }

    fn fail_save(&self, section: &SectionId, err: SyncError) -> SyncError {
        self.state.set_save(section, OpState::Failed);
        tracing::error!(%section, error = %err, "save failed");
        self.notifier.notify(Notice::SaveFailed {
            section: section.clone(),
            detail: err.to_string(),
        });
        err
    }

    fn fail_validation(&self, section: &SectionId, err: SyncError) -> SyncError {
        self.notifier.notify(Notice::ValidationFailed {
            section: section.clone(),
            message: err.to_string(),
        });
        err
    }

    /// Read and parse an import file. Failures never reach the network.
    async fn read_json_file<T: DeserializeOwned>(
        &self,
        section: &SectionId,
        path: &Path,
    ) -> Result<T, SyncError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) => {
                return Err(self.reject_file(
                    section,
                    format!("could not read '{}': {err}", path.display()),
                ))
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => Err(self.reject_file(section, format!("not valid JSON: {err}"))),
        }
    }

    fn reject_file(&self, section: &SectionId, detail: String) -> SyncError {
        self.notifier.notify(Notice::FileInvalid {
            section: section.clone(),
            detail: detail.clone(),
        });
        SyncError::FileFormat { detail }
    }

    /// Mirror of a response collection, loading it silently if absent.
    async fn ensure_responses(&self, kind: &ResponseKind) -> Result<Vec<String>, SyncError> {
        if let Some(lines) = self.state.responses(kind) {
            return Ok(lines);
        }
        let section = SectionId::Responses(kind.clone());
        let token = self.state.begin(&section);
        let lines = self.store.fetch_responses(kind).await?;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }
        self.state.set_responses(kind, lines.clone());
        Ok(lines)
    }

    /// Mirror of the channel list, loading it silently if absent.
    async fn ensure_channels(&self) -> Result<Vec<ChannelName>, SyncError> {
        if let Some(channels) = self.state.channels() {
            return Ok(channels);
        }
        let section = SectionId::Channels;
        let token = self.state.begin(&section);
        let channels = self.store.fetch_channels().await?;
        if !self.state.is_current(&section, token) {
            return Err(self.discard(&section));
        }
        self.state.set_channels(channels.clone());
        Ok(channels)
    }

    // Post-save refreshes re-read the store-canonical value into the mirror.
    // They are silent: the save already emitted the operation's notice.

    async fn refresh_responses(&self, kind: &ResponseKind) {
        let section = SectionId::Responses(kind.clone());
        let token = self.state.begin(&section);
        match self.store.fetch_responses(kind).await {
            Ok(lines) if self.state.is_current(&section, token) => {
                self.state.set_responses(kind, lines);
            }
            Ok(_) => tracing::warn!(%section, "discarding stale refresh"),
            Err(err) => tracing::warn!(%section, error = %err, "post-save refresh failed"),
        }
    }

    async fn refresh_questions(&self) {
        let section = SectionId::Questions;
        let token = self.state.begin(&section);
        match self.store.fetch_questions().await {
            Ok(questions) if self.state.is_current(&section, token) => {
                self.state.set_questions(questions);
            }
            Ok(_) => tracing::warn!(%section, "discarding stale refresh"),
            Err(err) => tracing::warn!(%section, error = %err, "post-save refresh failed"),
        }
    }

    async fn refresh_channels(&self) {
        let section = SectionId::Channels;
        let token = self.state.begin(&section);
        match self.store.fetch_channels().await {
            Ok(channels) if self.state.is_current(&section, token) => {
                self.state.set_channels(channels);
            }
            Ok(_) => tracing::warn!(%section, "discarding stale refresh"),
            Err(err) => tracing::warn!(%section, error = %err, "post-save refresh failed"),
        }
    }

    async fn refresh_special(&self) {
        let section = SectionId::SpecialReplies;
        let token = self.state.begin(&section);
        match self.store.fetch_special().await {
            Ok(entries) if self.state.is_current(&section, token) => {
                self.state.set_special(entries);
            }
            Ok(_) => tracing::warn!(%section, "discarding stale refresh"),
            Err(err) => tracing::warn!(%section, error = %err, "post-save refresh failed"),
        }
    }
}
