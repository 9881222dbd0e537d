//! Wire DTOs for the panel backend
//!
//! Kept only where the wire shape differs from the contract models: the
//! mention settings keep the original panel's field names, questions tag
//! their kind as `type`, and error/cleanup bodies use small envelopes.
//! Response lists, channel lists and special entries travel as the models
//! themselves.

use crate::contract::QuestionKind;
use serde::{Deserialize, Serialize};

/// Mention-guard settings as the panel backend stores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionSettingsDto {
    pub limit: u32,
    /// Timeout length in seconds
    pub duration: u32,
    /// Cooldown in seconds
    pub cooldown: u32,
    pub warn_msg: String,
    pub timeout_msg: String,
    #[serde(default = "default_true")]
    pub daily_cooldown: bool,
}

fn default_true() -> bool {
    true
}

/// Trivia question on the wire; `type` carries the kind label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub correct_answer: String,
    #[serde(default)]
    pub alternative_answers: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
}

fn default_category() -> String {
    "General".to_string()
}

/// Body for channel creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelCreateDto {
    pub name: String,
}

/// Body for the special-replies upsert (the username rides in the path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialRepliesDto {
    pub replies: Vec<String>,
}

/// Result body of the cleanup maintenance call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupDto {
    pub removed: usize,
}

/// Error envelope the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}
