use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use shared::{
    domain::{Student, StudentDraft, StudentId, StudentPatch},
    protocol::StudentEnvelope,
};
use tracing::debug;

pub mod error;

pub use error::{ClientError, FailureCategory};
pub use reqwest::StatusCode;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Unparsed response of a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Data access for the remote student API.
///
/// Implementations never mirror mutations into any local state; callers re-list to observe
/// the effect of `create`, `update` and `delete`.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Student>>;
    async fn get_by_id(&self, id: StudentId) -> ClientResult<Student>;
    async fn create(&self, draft: &StudentDraft) -> ClientResult<RawResponse>;
    async fn update(&self, id: StudentId, patch: &StudentPatch) -> ClientResult<RawResponse>;
    async fn delete(&self, id: StudentId) -> ClientResult<RawResponse>;
}

#[async_trait]
impl<T> StudentApi for std::sync::Arc<T>
where
    T: StudentApi + ?Sized,
{
    async fn list(&self) -> ClientResult<Vec<Student>> {
        (**self).list().await
    }

    async fn get_by_id(&self, id: StudentId) -> ClientResult<Student> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, draft: &StudentDraft) -> ClientResult<RawResponse> {
        (**self).create(draft).await
    }

    async fn update(&self, id: StudentId, patch: &StudentPatch) -> ClientResult<RawResponse> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: StudentId) -> ClientResult<RawResponse> {
        (**self).delete(id).await
    }
}

pub struct StudentClient {
    http: Client,
    base_url: String,
}

impl StudentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Builds a client whose requests fail with a transport error after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = normalize_base_url(&base_url.into());
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> ClientResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "student api responded");
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn fetch_envelope(&self, endpoint: &str) -> ClientResult<StudentEnvelope> {
        let response = self.execute(endpoint, self.http.get(self.url(endpoint))).await?;
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        StudentEnvelope::decode(&body).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn raw(&self, endpoint: &str, request: RequestBuilder) -> ClientResult<RawResponse> {
        let response = self.execute(endpoint, request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl StudentApi for StudentClient {
    async fn list(&self) -> ClientResult<Vec<Student>> {
        Ok(self.fetch_envelope("/show-std").await?.students)
    }

    async fn get_by_id(&self, id: StudentId) -> ClientResult<Student> {
        self.fetch_envelope(&format!("/show-std-byID/{id}"))
            .await?
            .into_first()
            .ok_or(ClientError::NotFound(id))
    }

    async fn create(&self, draft: &StudentDraft) -> ClientResult<RawResponse> {
        let endpoint = "/store-std";
        self.raw(endpoint, self.http.post(self.url(endpoint)).json(draft))
            .await
    }

    async fn update(&self, id: StudentId, patch: &StudentPatch) -> ClientResult<RawResponse> {
        let endpoint = format!("/update-std/{id}");
        let request = self.http.put(self.url(&endpoint)).json(patch);
        self.raw(&endpoint, request).await
    }

    async fn delete(&self, id: StudentId) -> ClientResult<RawResponse> {
        let endpoint = format!("/delete-std/{id}");
        let request = self.http.delete(self.url(&endpoint));
        self.raw(&endpoint, request).await
    }
}

/// Trims whitespace and trailing slashes; an empty value falls back to the default base.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
