//! Shared test fixtures: an in-memory store double and a recording notifier.
#![allow(dead_code)]

use async_trait::async_trait;
use panel_sync::{
    ChannelName, CleanupReport, MentionGuardSettings, Notice, Notifier, ResponseKind,
    SettingsStore, SpecialUserReplies, SyncError, TriviaQuestion,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

/// Install the test log subscriber; `RUST_LOG` controls verbosity. Safe to
/// call from every test, later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory settings store mirroring the remote semantics: singleton
/// replace, whole-list replace, id/name/username-keyed CRUD. Counts every
/// call so tests can assert that validation and import failures never reach
/// the network.
#[derive(Default)]
pub struct MockStore {
    mention: RwLock<Option<MentionGuardSettings>>,
    responses: RwLock<HashMap<ResponseKind, Vec<String>>>,
    questions: RwLock<Vec<TriviaQuestion>>,
    next_id: AtomicI64,
    channels: RwLock<Vec<ChannelName>>,
    special: RwLock<Vec<SpecialUserReplies>>,
    calls: AtomicUsize,
    fail_writes: RwLock<Option<SyncError>>,
    fail_upsert_for: RwLock<Option<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Total store calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail with `err`.
    pub fn fail_writes_with(&self, err: SyncError) {
        *self.fail_writes.write() = Some(err);
    }

    /// Make only the special-replies upsert for `username` fail.
    pub fn fail_upsert_for(&self, username: &str) {
        *self.fail_upsert_for.write() = Some(username.to_string());
    }

    pub fn seed_special(&self, entries: Vec<SpecialUserReplies>) {
        *self.special.write() = entries;
    }

    pub fn channel_count(&self, name: &ChannelName) -> usize {
        self.channels
            .read()
            .iter()
            .filter(|channel| *channel == name)
            .count()
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn write_gate(&self) -> Result<(), SyncError> {
        match self.fail_writes.read().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SettingsStore for MockStore {
    async fn fetch_mention(&self) -> Result<Option<MentionGuardSettings>, SyncError> {
        self.tick();
        Ok(self.mention.read().clone())
    }

    async fn replace_mention(&self, settings: &MentionGuardSettings) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        *self.mention.write() = Some(settings.clone());
        Ok(())
    }

    async fn fetch_responses(&self, kind: &ResponseKind) -> Result<Vec<String>, SyncError> {
        self.tick();
        Ok(self.responses.read().get(kind).cloned().unwrap_or_default())
    }

    async fn replace_responses(
        &self,
        kind: &ResponseKind,
        lines: &[String],
    ) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        self.responses.write().insert(kind.clone(), lines.to_vec());
        Ok(())
    }

    async fn fetch_questions(&self) -> Result<Vec<TriviaQuestion>, SyncError> {
        self.tick();
        Ok(self.questions.read().clone())
    }

    async fn create_question(
        &self,
        question: &TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError> {
        self.tick();
        self.write_gate()?;
        let mut created = question.clone();
        created.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.questions.write().push(created.clone());
        Ok(created)
    }

    async fn update_question(
        &self,
        id: i64,
        question: &TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError> {
        self.tick();
        self.write_gate()?;
        let mut questions = self.questions.write();
        let slot = questions
            .iter_mut()
            .find(|q| q.id == Some(id))
            .ok_or(SyncError::Status {
                status: 404,
                detail: format!("question {id} not found"),
            })?;
        *slot = TriviaQuestion {
            id: Some(id),
            ..question.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_question(&self, id: i64) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        let mut questions = self.questions.write();
        let before = questions.len();
        questions.retain(|q| q.id != Some(id));
        if questions.len() == before {
            return Err(SyncError::Status {
                status: 404,
                detail: format!("question {id} not found"),
            });
        }
        Ok(())
    }

    async fn replace_questions(&self, questions: &[TriviaQuestion]) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        let numbered = questions
            .iter()
            .map(|q| TriviaQuestion {
                id: Some(self.next_id.fetch_add(1, Ordering::SeqCst)),
                ..q.clone()
            })
            .collect();
        *self.questions.write() = numbered;
        Ok(())
    }

    async fn fetch_channels(&self) -> Result<Vec<ChannelName>, SyncError> {
        self.tick();
        Ok(self.channels.read().clone())
    }

    async fn create_channel(&self, name: &ChannelName) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        self.channels.write().push(name.clone());
        Ok(())
    }

    async fn delete_channel(&self, name: &ChannelName) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        // Absent names are fine: removal is idempotent.
        self.channels.write().retain(|channel| channel != name);
        Ok(())
    }

    async fn fetch_special(&self) -> Result<Vec<SpecialUserReplies>, SyncError> {
        self.tick();
        Ok(self.special.read().clone())
    }

    async fn upsert_special(&self, entry: &SpecialUserReplies) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        if self.fail_upsert_for.read().as_deref() == Some(entry.username.as_str()) {
            return Err(SyncError::Status {
                status: 500,
                detail: format!("upsert of '{}' failed", entry.username),
            });
        }
        let mut entries = self.special.write();
        match entries.iter_mut().find(|e| e.username == entry.username) {
            Some(existing) => existing.replies = entry.replies.clone(),
            None => entries.push(entry.clone()),
        }
        Ok(())
    }

    async fn delete_special(&self, username: &str) -> Result<(), SyncError> {
        self.tick();
        self.write_gate()?;
        self.special.write().retain(|e| e.username != username);
        Ok(())
    }

    async fn cleanup_special(&self) -> Result<CleanupReport, SyncError> {
        self.tick();
        self.write_gate()?;
        let mut entries = self.special.write();
        let before = entries.len();
        entries.retain(|e| e.replies.iter().any(|reply| !reply.trim().is_empty()));
        Ok(CleanupReport {
            removed: before - entries.len(),
        })
    }
}

/// Notifier that records every notice for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.notices.lock().len()
    }

    pub fn failures(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .iter()
            .filter(|notice| notice.is_failure())
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
