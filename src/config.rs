//! Configuration for the sync client
//!
//! Deployed backends disagree on their route tables, so routes are
//! configuration, not a fixed contract. Configuration merges a YAML file
//! (optional) with `PANEL_SYNC_*` environment variables.

use crate::contract::SyncError;
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Sync client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint template per section
    #[serde(default)]
    pub routes: RouteTable,

    /// What a duplicate channel add does
    #[serde(default)]
    pub duplicate_channels: DuplicatePolicy,

    /// Deadline for every request; a hung backend surfaces as a transport
    /// error instead of a forever-pending operation
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            routes: RouteTable::default(),
            duplicate_channels: DuplicatePolicy::default(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl SyncConfig {
    /// Load configuration, merging an optional YAML file with `PANEL_SYNC_*`
    /// environment variables (nested keys split on `__`, e.g.
    /// `PANEL_SYNC_ROUTES__MENTION`).
    pub fn load(path: Option<&Path>) -> Result<Self, SyncError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: SyncConfig = figment
            .merge(Env::prefixed("PANEL_SYNC_").split("__"))
            .extract()
            .map_err(|e| SyncError::Config {
                detail: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL parses and every template carries its placeholder.
    pub fn validate(&self) -> Result<(), SyncError> {
        Url::parse(&self.base_url).map_err(|e| SyncError::Config {
            detail: format!("invalid base_url '{}': {e}", self.base_url),
        })?;
        self.routes.validate()
    }
}

/// Duplicate-add policy for channels. The original panel variants never made
/// this explicit, so it is a knob rather than an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Adding an existing key is a conflict error
    #[default]
    Reject,
    /// Adding an existing key is a no-op, no network call
    Ignore,
}

/// Endpoint templates, one per remote operation family.
///
/// Templates use `{kind}`, `{id}`, `{name}` and `{user}` placeholders;
/// substituted values are percent-encoded. Defaults follow the `/api/...`
/// route family of the original panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTable {
    #[serde(default = "default_mention")]
    pub mention: String,
    #[serde(default = "default_responses")]
    pub responses: String,
    #[serde(default = "default_questions")]
    pub questions: String,
    #[serde(default = "default_question")]
    pub question: String,
    #[serde(default = "default_questions_import")]
    pub questions_import: String,
    #[serde(default = "default_channels")]
    pub channels: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_special")]
    pub special: String,
    #[serde(default = "default_special_user")]
    pub special_user: String,
    #[serde(default = "default_special_cleanup")]
    pub special_cleanup: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            mention: default_mention(),
            responses: default_responses(),
            questions: default_questions(),
            question: default_question(),
            questions_import: default_questions_import(),
            channels: default_channels(),
            channel: default_channel(),
            special: default_special(),
            special_user: default_special_user(),
            special_cleanup: default_special_cleanup(),
        }
    }
}

impl RouteTable {
    fn validate(&self) -> Result<(), SyncError> {
        let required = [
            (&self.responses, "responses", "{kind}"),
            (&self.question, "question", "{id}"),
            (&self.channel, "channel", "{name}"),
            (&self.special_user, "special_user", "{user}"),
        ];
        for (template, route, placeholder) in required {
            if !template.contains(placeholder) {
                return Err(SyncError::Config {
                    detail: format!("route '{route}' must contain the {placeholder} placeholder"),
                });
            }
        }
        Ok(())
    }
}

/// Substitute a placeholder in a route template, percent-encoding the value.
pub fn fill_template(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{key}}}"), urlencoding::encode(value).as_ref())
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_mention() -> String {
    "/api/settings/mention".to_string()
}

fn default_responses() -> String {
    "/api/responses/{kind}".to_string()
}

fn default_questions() -> String {
    "/api/questions".to_string()
}

fn default_question() -> String {
    "/api/questions/{id}".to_string()
}

fn default_questions_import() -> String {
    "/api/questions/import".to_string()
}

fn default_channels() -> String {
    "/api/channels".to_string()
}

fn default_channel() -> String {
    "/api/channels/{name}".to_string()
}

fn default_special() -> String {
    "/api/special".to_string()
}

fn default_special_user() -> String {
    "/api/special/{user}".to_string()
}

fn default_special_cleanup() -> String {
    "/api/special/cleanup".to_string()
}
