//! HTTP implementation of the settings store
//!
//! One reqwest client, the configured route table, and a uniform verb
//! convention: PUT for idempotent whole-resource replaces, POST for creates
//! and maintenance actions, DELETE for removals. Every response status is
//! checked before the body is decoded.

use super::dto::{
    ChannelCreateDto, CleanupDto, MentionSettingsDto, MessageDto, QuestionDto, SpecialRepliesDto,
};
use crate::config::{fill_template, RouteTable, SyncConfig};
use crate::contract::{
    ChannelName, CleanupReport, MentionGuardSettings, ResponseKind, SettingsStore,
    SpecialUserReplies, SyncError, TriviaQuestion,
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Settings store reached over HTTP/JSON.
pub struct HttpSettingsStore {
    http: reqwest::Client,
    base: String,
    routes: RouteTable,
}

impl HttpSettingsStore {
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SyncError::Config {
                detail: format!("could not build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            base: config.base_url.trim_end_matches('/').to_string(),
            routes: config.routes.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Turn a non-2xx response into a status error, pulling the backend's
    /// `{"message": …}` detail when the body carries one.
    async fn check(result: Result<Response, reqwest::Error>) -> Result<Response, SyncError> {
        let response = result.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<MessageDto>(&body) {
            Ok(envelope) => envelope.message,
            Err(_) if body.is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
            Err(_) => body,
        };
        Err(SyncError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SyncError> {
        response
            .json()
            .await
            .map_err(|e| SyncError::decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let response = Self::check(self.http.get(self.url(path)).send().await).await?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), SyncError> {
        Self::check(self.http.put(self.url(path)).json(body).send().await).await?;
        Ok(())
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), SyncError> {
        Self::check(self.http.post(self.url(path)).json(body).send().await).await?;
        Ok(())
    }

    /// DELETE where a 404 counts as success (removal is idempotent).
    async fn delete_idempotent(&self, path: &str) -> Result<(), SyncError> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(Ok(response)).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> SyncError {
    SyncError::transport(err.to_string())
}

#[async_trait]
impl SettingsStore for HttpSettingsStore {
    async fn fetch_mention(&self) -> Result<Option<MentionGuardSettings>, SyncError> {
        let response = self
            .http
            .get(self.url(&self.routes.mention))
            .send()
            .await
            .map_err(transport_error)?;
        // A never-written singleton is 404, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(Ok(response)).await?;
        let dto: MentionSettingsDto = Self::decode(response).await?;
        Ok(Some(dto.into()))
    }

    async fn replace_mention(&self, settings: &MentionGuardSettings) -> Result<(), SyncError> {
        self.put_json(&self.routes.mention, &MentionSettingsDto::from(settings))
            .await
    }

    async fn fetch_responses(&self, kind: &ResponseKind) -> Result<Vec<String>, SyncError> {
        let path = fill_template(&self.routes.responses, "kind", kind.as_str());
        self.get_json(&path).await
    }

    async fn replace_responses(
        &self,
        kind: &ResponseKind,
        lines: &[String],
    ) -> Result<(), SyncError> {
        let path = fill_template(&self.routes.responses, "kind", kind.as_str());
        self.put_json(&path, &lines).await
    }

    async fn fetch_questions(&self) -> Result<Vec<TriviaQuestion>, SyncError> {
        let dtos: Vec<QuestionDto> = self.get_json(&self.routes.questions).await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    async fn create_question(
        &self,
        question: &TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError> {
        let response = Self::check(
            self.http
                .post(self.url(&self.routes.questions))
                .json(&QuestionDto::from(question))
                .send()
                .await,
        )
        .await?;
        let created: QuestionDto = Self::decode(response).await?;
        Ok(created.into())
    }

    async fn update_question(
        &self,
        id: i64,
        question: &TriviaQuestion,
    ) -> Result<TriviaQuestion, SyncError> {
        let path = fill_template(&self.routes.question, "id", &id.to_string());
        let response = Self::check(
            self.http
                .put(self.url(&path))
                .json(&QuestionDto::from(question))
                .send()
                .await,
        )
        .await?;
        let updated: QuestionDto = Self::decode(response).await?;
        Ok(updated.into())
    }

    async fn delete_question(&self, id: i64) -> Result<(), SyncError> {
        let path = fill_template(&self.routes.question, "id", &id.to_string());
        Self::check(self.http.delete(self.url(&path)).send().await).await?;
        Ok(())
    }

    async fn replace_questions(&self, questions: &[TriviaQuestion]) -> Result<(), SyncError> {
        let dtos: Vec<QuestionDto> = questions.iter().map(Into::into).collect();
        self.post_json(&self.routes.questions_import, &dtos).await
    }

    async fn fetch_channels(&self) -> Result<Vec<ChannelName>, SyncError> {
        let names: Vec<String> = self.get_json(&self.routes.channels).await?;
        names
            .into_iter()
            .map(|name| {
                ChannelName::new(name.clone())
                    .map_err(|e| SyncError::decode(format!("bad channel name '{name}': {e}")))
            })
            .collect()
    }

    async fn create_channel(&self, name: &ChannelName) -> Result<(), SyncError> {
        let body = ChannelCreateDto {
            name: name.as_str().to_string(),
        };
        self.post_json(&self.routes.channels, &body).await
    }

    async fn delete_channel(&self, name: &ChannelName) -> Result<(), SyncError> {
        let path = fill_template(&self.routes.channel, "name", name.as_str());
        self.delete_idempotent(&path).await
    }

    async fn fetch_special(&self) -> Result<Vec<SpecialUserReplies>, SyncError> {
        self.get_json(&self.routes.special).await
    }

    async fn upsert_special(&self, entry: &SpecialUserReplies) -> Result<(), SyncError> {
        let path = fill_template(&self.routes.special_user, "user", &entry.username);
        let body = SpecialRepliesDto {
            replies: entry.replies.clone(),
        };
        self.put_json(&path, &body).await
    }

    async fn delete_special(&self, username: &str) -> Result<(), SyncError> {
        let path = fill_template(&self.routes.special_user, "user", username);
        self.delete_idempotent(&path).await
    }

    async fn cleanup_special(&self) -> Result<CleanupReport, SyncError> {
        let response = Self::check(
            self.http
                .post(self.url(&self.routes.special_cleanup))
                .send()
                .await,
        )
        .await?;
        let report: CleanupDto = Self::decode(response).await?;
        Ok(report.into())
    }
}
