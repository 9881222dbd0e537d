//! Per-section client state: mirrors, request generations, status
//!
//! The mirror is the transient in-memory copy of a section's data between
//! load and save. Every entity set is owned by the remote store; nothing here
//! survives the service instance. Generation counters sequence overlapping
//! requests per section: a completion whose token is no longer current must
//! be discarded.

use crate::contract::{
    ChannelName, MentionGuardSettings, ResponseKind, SectionId, SpecialUserReplies, TriviaQuestion,
};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Phase of one half of a section's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpState {
    #[default]
    Idle,
    Pending,
    Ok,
    Failed,
}

/// Observable per-section status. Load and save halves are independent:
/// `Idle → Pending → {Ok, Failed}` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionStatus {
    pub load: OpState,
    pub save: OpState,
}

/// All state one service instance holds, keyed by section.
#[derive(Default)]
pub(crate) struct SectionState {
    mention: RwLock<Option<MentionGuardSettings>>,
    responses: RwLock<HashMap<ResponseKind, Vec<String>>>,
    questions: RwLock<Option<Vec<TriviaQuestion>>>,
    channels: RwLock<Option<Vec<ChannelName>>>,
    special: RwLock<Option<Vec<SpecialUserReplies>>>,
    generations: RwLock<HashMap<SectionId, u64>>,
    status: RwLock<HashMap<SectionId, SectionStatus>>,
}

impl SectionState {
    /// Issue a new request token for a section. Any token issued earlier for
    /// the same section becomes stale, and since a stale request never
    /// reports an outcome, any `Pending` half it left behind returns to
    /// `Idle` here.
    pub fn begin(&self, section: &SectionId) -> u64 {
        let token = {
            let mut generations = self.generations.write();
            let counter = generations.entry(section.clone()).or_insert(0);
            *counter += 1;
            *counter
        };
        let mut status = self.status.write();
        let entry = status.entry(section.clone()).or_default();
        if entry.load == OpState::Pending {
            entry.load = OpState::Idle;
        }
        if entry.save == OpState::Pending {
            entry.save = OpState::Idle;
        }
        token
    }

    /// Whether `token` still names the latest request for the section.
    pub fn is_current(&self, section: &SectionId, token: u64) -> bool {
        self.generations
            .read()
            .get(section)
            .is_some_and(|current| *current == token)
    }

    pub fn status(&self, section: &SectionId) -> SectionStatus {
        self.status
            .read()
            .get(section)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_load(&self, section: &SectionId, state: OpState) {
        self.status
            .write()
            .entry(section.clone())
            .or_default()
            .load = state;
    }

    pub fn set_save(&self, section: &SectionId, state: OpState) {
        self.status
            .write()
            .entry(section.clone())
            .or_default()
            .save = state;
    }

    // ===== Mirror accessors =====
    //
    // Everything returns clones; guards are never held across awaits.

    pub fn mention(&self) -> Option<MentionGuardSettings> {
        self.mention.read().clone()
    }

    pub fn set_mention(&self, settings: MentionGuardSettings) {
        *self.mention.write() = Some(settings);
    }

    pub fn responses(&self, kind: &ResponseKind) -> Option<Vec<String>> {
        self.responses.read().get(kind).cloned()
    }

    pub fn set_responses(&self, kind: &ResponseKind, lines: Vec<String>) {
        self.responses.write().insert(kind.clone(), lines);
    }

    pub fn questions(&self) -> Option<Vec<TriviaQuestion>> {
        self.questions.read().clone()
    }

    pub fn set_questions(&self, questions: Vec<TriviaQuestion>) {
        *self.questions.write() = Some(questions);
    }

    pub fn channels(&self) -> Option<Vec<ChannelName>> {
        self.channels.read().clone()
    }

    pub fn set_channels(&self, channels: Vec<ChannelName>) {
        *self.channels.write() = Some(channels);
    }

    pub fn special(&self) -> Option<Vec<SpecialUserReplies>> {
        self.special.read().clone()
    }

    pub fn set_special(&self, entries: Vec<SpecialUserReplies>) {
        *self.special.write() = Some(entries);
    }
}
