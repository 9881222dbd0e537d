//! Conversions between wire DTOs and contract models

use super::dto::{CleanupDto, MentionSettingsDto, QuestionDto};
use crate::contract::{CleanupReport, MentionGuardSettings, TriviaQuestion};

// ===== Mention settings =====

impl From<&MentionGuardSettings> for MentionSettingsDto {
    fn from(settings: &MentionGuardSettings) -> Self {
        Self {
            limit: settings.limit,
            duration: settings.timeout_duration_seconds,
            cooldown: settings.cooldown_seconds,
            warn_msg: settings.warn_message.clone(),
            timeout_msg: settings.timeout_message.clone(),
            daily_cooldown: settings.daily_cooldown_enabled,
        }
    }
}

impl From<MentionSettingsDto> for MentionGuardSettings {
    fn from(dto: MentionSettingsDto) -> Self {
        Self {
            limit: dto.limit,
            warn_message: dto.warn_msg,
            timeout_message: dto.timeout_msg,
            timeout_duration_seconds: dto.duration,
            cooldown_seconds: dto.cooldown,
            daily_cooldown_enabled: dto.daily_cooldown,
        }
    }
}

// ===== Questions =====

impl From<&TriviaQuestion> for QuestionDto {
    fn from(question: &TriviaQuestion) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            correct_answer: question.correct_answer.clone(),
            alternative_answers: question.alternative_answers.clone(),
            category: question.category.clone(),
            kind: question.kind,
        }
    }
}

impl From<QuestionDto> for TriviaQuestion {
    fn from(dto: QuestionDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
            correct_answer: dto.correct_answer,
            alternative_answers: dto.alternative_answers,
            category: dto.category,
            kind: dto.kind,
        }
    }
}

// ===== Cleanup =====

impl From<CleanupDto> for CleanupReport {
    fn from(dto: CleanupDto) -> Self {
        Self {
            removed: dto.removed,
        }
    }
}
