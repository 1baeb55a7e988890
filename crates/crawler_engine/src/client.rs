use std::time::Duration;

use crawler_core::{FailureKind, NewTask, RemoteError, Response, Task, TaskId};
use crawler_logging::crawler_debug;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Collection endpoint, e.g. `http://localhost:8080/api/fetcher`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/fetcher".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The four calls the orchestrator makes against the remote task service.
#[async_trait::async_trait]
pub trait RemoteTaskClient: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError>;

    /// Returns the new task's id when the service reports it.
    async fn create_task(&self, task: &NewTask) -> Result<Option<TaskId>, RemoteError>;

    async fn delete_task(&self, task_id: TaskId) -> Result<(), RemoteError>;

    async fn list_responses(&self, task_id: TaskId) -> Result<Vec<Response>, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTaskClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RemoteError> {
        let base = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|err| RemoteError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(RemoteError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be used as a base url"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RemoteError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn task_url(&self, task_id: TaskId) -> Url {
        let id = task_id.to_string();
        self.endpoint(&[id.as_str()])
    }

    fn history_url(&self, task_id: TaskId) -> Url {
        let id = task_id.to_string();
        self.endpoint(&[id.as_str(), "history"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `cannot_be_a_base` was ruled out in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteError> {
        crawler_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let response = expect_ok(response)?;
        let body = self.read_body(response).await?;
        serde_json::from_slice(&body)
            .map_err(|err| RemoteError::new(FailureKind::Decode, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, RemoteError> {
        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RemoteTaskClient for ReqwestTaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        // The service encodes an empty collection as `null`.
        let tasks: Option<Vec<Task>> = self.get_json(self.base.clone()).await?;
        Ok(tasks.unwrap_or_default())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Option<TaskId>, RemoteError> {
        let body = encode_body(task)?;
        crawler_debug!("POST {} url={} interval={}", self.base, task.url, task.interval);
        let response = self
            .client
            .post(self.base.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = expect_ok(response)?;

        let created_id = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_location_id);
        Ok(created_id)
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), RemoteError> {
        let url = self.task_url(task_id);
        crawler_debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        expect_ok(response)?;
        Ok(())
    }

    async fn list_responses(&self, task_id: TaskId) -> Result<Vec<Response>, RemoteError> {
        let history: Option<Vec<Response>> = self.get_json(self.history_url(task_id)).await?;
        Ok(history.unwrap_or_default())
    }
}

fn encode_body(task: &NewTask) -> Result<Vec<u8>, RemoteError> {
    serde_json::to_vec(task).map_err(|err| RemoteError::new(FailureKind::Encode, err.to_string()))
}

/// Only 200 counts as success; redirects and other 2xx codes do not.
fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        Err(RemoteError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

/// Accepts either a bare id (`12`) or a path ending in one (`/api/fetcher/12`).
fn parse_location_id(location: &str) -> Option<TaskId> {
    location
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|last| last.parse().ok())
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> RemoteError {
    RemoteError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return RemoteError::new(FailureKind::Decode, err.to_string());
    }
    RemoteError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ReqwestTaskClient {
        ReqwestTaskClient::new(ClientSettings {
            base_url: base_url.to_string(),
            ..ClientSettings::default()
        })
        .expect("client")
    }

    #[test]
    fn endpoints_are_built_under_the_collection() {
        let client = client("http://localhost:8080/api/fetcher/");
        assert_eq!(
            client.task_url(12).as_str(),
            "http://localhost:8080/api/fetcher/12"
        );
        assert_eq!(
            client.history_url(12).as_str(),
            "http://localhost:8080/api/fetcher/12/history"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestTaskClient::new(ClientSettings {
            base_url: "not a url".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let err = ReqwestTaskClient::new(ClientSettings {
            base_url: "mailto:ops@example.com".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn create_body_is_the_task_json() {
        let body = encode_body(&NewTask {
            url: "http://x".to_string(),
            interval: 30,
        })
        .expect("encodable");
        assert_eq!(body, br#"{"url":"http://x","interval":30}"#.to_vec());
        assert_eq!(
            FailureKind::Encode.to_string(),
            "request body could not be encoded"
        );
    }

    #[test]
    fn location_header_forms() {
        assert_eq!(parse_location_id("12"), Some(12));
        assert_eq!(parse_location_id("/api/fetcher/7"), Some(7));
        assert_eq!(parse_location_id("/api/fetcher/7/"), Some(7));
        assert_eq!(parse_location_id(""), None);
        assert_eq!(parse_location_id("abc"), None);
    }
}
