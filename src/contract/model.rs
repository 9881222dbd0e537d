//! Contract models for the panel sync client
//!
//! These models are the canonical shapes of every section the panel can edit.
//! They double as the JSON import-file format, so they carry serde derives;
//! wire shapes that differ from them live in `infra::http::dto`.

use super::error::SyncError;
use serde::{Deserialize, Serialize};

/// Mention-guard settings, a singleton under the "mention" namespace.
///
/// The remote store creates this with defaults; the panel only ever replaces
/// it wholesale, never deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionGuardSettings {
    /// Mentions allowed before the guard reacts
    pub limit: u32,
    /// Message sent when a user approaches the limit
    pub warn_message: String,
    /// Message sent when a user is timed out
    pub timeout_message: String,
    /// Timeout length once the limit is exceeded
    pub timeout_duration_seconds: u32,
    /// Cooldown before a user's mention count resets
    pub cooldown_seconds: u32,
    /// Whether the cooldown is applied once per day
    pub daily_cooldown_enabled: bool,
}

impl Default for MentionGuardSettings {
    fn default() -> Self {
        Self {
            limit: 5,
            warn_message: String::new(),
            timeout_message: String::new(),
            timeout_duration_seconds: 300,
            cooldown_seconds: 86_400,
            daily_cooldown_enabled: true,
        }
    }
}

/// Key naming one response collection (e.g. `solo_win_responses`).
///
/// The set of kinds is owned by the backend; any key in the valid format is
/// accepted. Format: non-empty, `[a-z0-9_]`, starting with an alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResponseKind(String);

impl ResponseKind {
    /// Response kinds the original bot ships with.
    pub const KNOWN: &'static [&'static str] = &[
        "solo_win_responses",
        "group_win_responses",
        "team_win_responses",
        "low_score_responses",
        "doom_leader_fail_responses",
        "lowest_leader_responses",
        "team_lose_responses",
        "solo_lose_responses",
        "group_individual_lose_responses",
        "mention_responses",
        "special_mention_responses",
    ];

    /// Validate and wrap a response kind key.
    pub fn new(key: impl Into<String>) -> Result<Self, SyncError> {
        let key = key.into();
        validate_key(&key, "response kind")?;
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResponseKind {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResponseKind> for String {
    fn from(kind: ResponseKind) -> Self {
        kind.0
    }
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named response collection. Order is meaningful: display order equals
/// storage order, and updates replace the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub kind: ResponseKind,
    pub lines: Vec<String>,
}

/// Trivia question kinds, each with the fixed answer window the bot uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionKind {
    #[default]
    Normal,
    Golden,
    Steal,
    Sabotage,
    #[serde(rename = "The Test of Fate")]
    TestOfFate,
    Doom,
}

impl QuestionKind {
    /// Seconds players get to answer a question of this kind.
    pub fn time_limit_seconds(&self) -> u32 {
        match self {
            Self::Normal => 30,
            Self::Golden => 7,
            Self::Steal => 5,
            Self::Sabotage => 5,
            Self::TestOfFate => 10,
            Self::Doom => 7,
        }
    }
}

/// A trivia question. `id` is assigned by the server and absent on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub correct_answer: String,
    /// Accepted alternatives, set semantics: deduplicated, empties dropped
    #[serde(default)]
    pub alternative_answers: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub kind: QuestionKind,
}

fn default_category() -> String {
    "General".to_string()
}

/// Channel name: unique, immutable once added, acts as its own key.
///
/// Format: non-empty, lowercase `[a-z0-9_]`, starting with an alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelName(String);

impl ChannelName {
    /// Validate and wrap a channel name.
    pub fn new(name: impl Into<String>) -> Result<Self, SyncError> {
        let name = name.into();
        validate_key(&name, "channel name")?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChannelName {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelName> for String {
    fn from(name: ChannelName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user special replies. `username` is the unique key; add is an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialUserReplies {
    pub username: String,
    pub replies: Vec<String>,
}

/// Result of the special-replies cleanup maintenance call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Entries the server removed because their reply sets were empty/invalid
    pub removed: usize,
}

/// Identifier of an independently loadable/savable section.
///
/// Sections have no cross-section transactionality; every one carries its own
/// mirror, request generation and status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionId {
    Mention,
    Responses(ResponseKind),
    Questions,
    Channels,
    SpecialReplies,
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mention => f.write_str("mention"),
            Self::Responses(kind) => write!(f, "responses/{kind}"),
            Self::Questions => f.write_str("questions"),
            Self::Channels => f.write_str("channels"),
            Self::SpecialReplies => f.write_str("special"),
        }
    }
}

/// Shared format check for key-like identifiers (response kinds, channels).
fn validate_key(key: &str, what: &str) -> Result<(), SyncError> {
    if key.is_empty() {
        return Err(SyncError::Validation {
            message: format!("{what} cannot be empty"),
        });
    }

    let first = key.chars().next().unwrap_or_default();
    if !first.is_ascii_alphanumeric() {
        return Err(SyncError::Validation {
            message: format!("{what} '{key}' must start with an alphanumeric character"),
        });
    }

    let valid = key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(SyncError::Validation {
            message: format!(
                "{what} '{key}' contains invalid characters. Only lowercase alphanumerics and '_' are allowed"
            ),
        });
    }

    Ok(())
}
