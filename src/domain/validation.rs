//! Per-section field validation and normalization
//!
//! Every save path runs through here before any network call. Normalization
//! mirrors what the panel backends expect: lines are trimmed with empties
//! dropped, alternative answers are a set.

use crate::contract::{MentionGuardSettings, SpecialUserReplies, SyncError, TriviaQuestion};

/// Required fields for the mention guard: both messages must be non-empty.
pub fn validate_mention(settings: &MentionGuardSettings) -> Result<(), SyncError> {
    if settings.warn_message.trim().is_empty() {
        return Err(SyncError::validation("warn_message cannot be empty"));
    }
    if settings.timeout_message.trim().is_empty() {
        return Err(SyncError::validation("timeout_message cannot be empty"));
    }
    Ok(())
}

/// Trim response lines and drop empties, preserving order.
pub fn normalize_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate and normalize a question: text and answer required, alternatives
/// deduplicated with empties dropped, blank category falls back to the
/// default.
pub fn normalize_question(question: &TriviaQuestion) -> Result<TriviaQuestion, SyncError> {
    let text = question.text.trim();
    if text.is_empty() {
        return Err(SyncError::validation("question text cannot be empty"));
    }
    let correct_answer = question.correct_answer.trim();
    if correct_answer.is_empty() {
        return Err(SyncError::validation("correct answer cannot be empty"));
    }

    let mut alternatives: Vec<String> = Vec::new();
    for alt in &question.alternative_answers {
        let alt = alt.trim();
        if !alt.is_empty() && !alternatives.iter().any(|seen| seen == alt) {
            alternatives.push(alt.to_string());
        }
    }

    let category = question.category.trim();
    let category = if category.is_empty() {
        "General".to_string()
    } else {
        category.to_string()
    };

    Ok(TriviaQuestion {
        id: question.id,
        text: text.to_string(),
        correct_answer: correct_answer.to_string(),
        alternative_answers: alternatives,
        category,
        kind: question.kind,
    })
}

/// Validate and normalize a special-replies entry. An entry whose normalized
/// reply set is empty is invalid: that is exactly what the cleanup operation
/// removes server-side, so it is never submitted.
pub fn normalize_special(
    username: &str,
    replies: &[String],
) -> Result<SpecialUserReplies, SyncError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(SyncError::validation("username cannot be empty"));
    }
    let replies = normalize_lines(replies);
    if replies.is_empty() {
        return Err(SyncError::validation(format!(
            "replies for '{username}' cannot all be empty"
        )));
    }
    Ok(SpecialUserReplies {
        username: username.to_string(),
        replies,
    })
}
