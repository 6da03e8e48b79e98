//! reqwest-backed [`TutorialService`] speaking JSON to a REST endpoint.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::TutorialId,
    error::{ApiError, ServiceError},
    protocol::{RawTutorial, RemovalConfirmation, TitleQuery, TutorialDraft, TutorialFields},
};
use tracing::{debug, warn};
use url::Url;

use crate::service::TutorialService;

const TUTORIALS_PATH: &str = "tutorials";

pub struct HttpTutorialService {
    http: Client,
    base_url: Url,
}

impl HttpTutorialService {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Self::with_client(base_url, http)
    }

    fn with_client(base_url: &str, http: Client) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid tutorial service url: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "tutorial service url cannot carry a path: {base_url}"
            ));
        }
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, id: Option<&TutorialId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(TUTORIALS_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    warn!(error = %err, "tutorials: transport failure");
    match err.status() {
        Some(status) => ServiceError::generic().with_status(status.as_u16()),
        None => ServiceError::generic(),
    }
}

async fn read_body<T>(response: Response) -> Result<T, ServiceError>
where
    T: DeserializeOwned + Default,
{
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport_error)?;

    if !status.is_success() {
        let body = serde_json::from_slice::<ApiError>(&bytes).unwrap_or_default();
        debug!(status = status.as_u16(), message = ?body.message, "tutorials: service rejected request");
        return Err(ServiceError::from(body).with_status(status.as_u16()));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|err| {
        warn!(error = %err, "tutorials: malformed response body");
        ServiceError::generic().with_status(status.as_u16())
    })
}

#[async_trait]
impl TutorialService for HttpTutorialService {
    async fn list_all(&self) -> Result<Vec<RawTutorial>, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(None))
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<RawTutorial>, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(None))
            .query(&TitleQuery {
                title: title.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }

    async fn get(&self, id: &TutorialId) -> Result<RawTutorial, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(Some(id)))
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }

    async fn create(&self, draft: &TutorialDraft) -> Result<RawTutorial, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(None))
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }

    async fn update(
        &self,
        id: &TutorialId,
        fields: &TutorialFields,
    ) -> Result<RawTutorial, ServiceError> {
        let response = self
            .http
            .put(self.endpoint(Some(id)))
            .json(fields)
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }

    async fn remove(&self, id: &TutorialId) -> Result<RemovalConfirmation, ServiceError> {
        let response = self
            .http
            .delete(self.endpoint(Some(id)))
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }

    async fn remove_all(&self) -> Result<RemovalConfirmation, ServiceError> {
        let response = self
            .http
            .delete(self.endpoint(None))
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
