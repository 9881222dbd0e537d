//! User-facing notifications
//!
//! The seam where the panel's alerts/toasts used to live. Each operation
//! emits exactly one notice on its terminal edge; completions discarded as
//! stale emit none. The default sink forwards to the tracing log; UIs plug in
//! their own.

use crate::contract::SectionId;

/// Outcome notice for one panel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loaded { section: SectionId },
    LoadFailed { section: SectionId, detail: String },
    Saved { section: SectionId },
    SaveFailed { section: SectionId, detail: String },
    /// An imported file was rejected before any network call
    FileInvalid { section: SectionId, detail: String },
    /// A required field was empty/malformed before any network call
    ValidationFailed { section: SectionId, message: String },
    /// The special-replies maintenance pass finished
    CleanupFinished { removed: usize },
}

impl Notice {
    /// Section the notice concerns, if any.
    pub fn section(&self) -> Option<&SectionId> {
        match self {
            Self::Loaded { section }
            | Self::LoadFailed { section, .. }
            | Self::Saved { section }
            | Self::SaveFailed { section, .. }
            | Self::FileInvalid { section, .. }
            | Self::ValidationFailed { section, .. } => Some(section),
            Self::CleanupFinished { .. } => None,
        }
    }

    /// Whether this notice reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::LoadFailed { .. }
                | Self::SaveFailed { .. }
                | Self::FileInvalid { .. }
                | Self::ValidationFailed { .. }
        )
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { section } => write!(f, "section '{section}' loaded"),
            Self::LoadFailed { section, detail } => {
                write!(f, "loading section '{section}' failed: {detail}")
            }
            Self::Saved { section } => write!(f, "section '{section}' saved"),
            Self::SaveFailed { section, detail } => {
                write!(f, "saving section '{section}' failed: {detail}")
            }
            Self::FileInvalid { section, detail } => {
                write!(f, "import file for section '{section}' is invalid: {detail}")
            }
            Self::ValidationFailed { section, message } => {
                write!(f, "section '{section}' not saved: {message}")
            }
            Self::CleanupFinished { removed } => {
                write!(f, "cleanup removed {removed} special-reply entries")
            }
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: forwards notices to the tracing log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_failure() {
            tracing::warn!(%notice, "panel notice");
        } else {
            tracing::info!(%notice, "panel notice");
        }
    }
}

/// Sink that swallows notices, for embedders that only use return values.
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _notice: Notice) {}
}
