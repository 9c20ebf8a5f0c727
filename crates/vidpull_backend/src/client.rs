use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::types::{ApiError, ErrorResponse, StartResponse, StatusPayload, VideoEntry};

/// Message shown when a start request is rejected without a usable payload.
const START_FALLBACK_MESSAGE: &str = "failed to start download";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// API root, e.g. `http://127.0.0.1:5000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Narrow seam over the download worker's HTTP contract. Everything the
/// orchestration layer knows about the backend goes through these three
/// calls; tests substitute their own implementation.
#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /download`: begins an asynchronous download and returns the
    /// backend-assigned id quickly, long before the download finishes.
    async fn start_download(&self, url: &str, output_path: &str) -> Result<String, ApiError>;

    /// `GET /status/{id}`: side-effect-free read of one job's state.
    async fn fetch_status(&self, id: &str) -> Result<StatusPayload, ApiError>;

    /// `GET /videos?path=...`: listing of completed files under `path`.
    async fn list_videos(&self, path: &str) -> Result<Vec<VideoEntry>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    url: &'a str,
    output_path: &'a str,
}

impl HttpBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, ApiError> {
        // Validate the base address once so later calls only see live errors.
        Url::parse(&settings.base_url).map_err(|err| ApiError::BadAddress(err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::BadAddress(err.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/{}", self.base_url, tail)
    }
}

#[async_trait::async_trait]
impl BackendApi for HttpBackend {
    async fn start_download(&self, url: &str, output_path: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint("download"))
            .json(&StartRequest { url, output_path })
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            let body: StartResponse = response
                .json()
                .await
                .map_err(|err| ApiError::Payload(err.to_string()))?;
            Ok(body.download_id)
        } else {
            // Prefer the backend's own reason; fall back when the error
            // body is absent or unparseable.
            let body: ErrorResponse = response.json().await.unwrap_or_default();
            Err(ApiError::Rejected(
                body.error
                    .unwrap_or_else(|| START_FALLBACK_MESSAGE.to_string()),
            ))
        }
    }

    async fn fetch_status(&self, id: &str) -> Result<StatusPayload, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("status/{id}")))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Rejected(response.status().to_string()));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::Payload(err.to_string()))
    }

    async fn list_videos(&self, path: &str) -> Result<Vec<VideoEntry>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("videos"))
            .query(&[("path", path)])
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Rejected(response.status().to_string()));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::Payload(err.to_string()))
    }
}

fn map_transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
