//! Domain layer - the sync service and its supporting pieces

pub mod mirror;
pub mod notify;
pub mod service;
pub mod validation;

pub use mirror::{OpState, SectionStatus};
pub use notify::{NoOpNotifier, Notice, Notifier, TracingNotifier};
pub use service::SyncService;
