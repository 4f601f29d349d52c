//! HTTP transport for the fal.ai API: synchronous runs, queued jobs,
//! storage uploads, and artifact downloads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{summarize_error_body, FalError};

/// Base URL for synchronous model invocations.
const RUN_BASE: &str = "https://fal.run";

/// Base URL for the queue API (long-running jobs).
const QUEUE_BASE: &str = "https://queue.fal.run";

/// Base URL for the storage REST API (file uploads).
const REST_BASE: &str = "https://rest.alpha.fal.ai";

/// Interval between queue status polls.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Queue submission acknowledgement.
#[derive(Debug, Deserialize)]
struct QueueSubmission {
    request_id: String,
    status_url: String,
    response_url: String,
}

/// Queue status snapshot.
#[derive(Debug, Deserialize)]
struct QueueStatus {
    status: String,
}

/// Storage upload handshake.
#[derive(Debug, Deserialize)]
struct UploadTicket {
    upload_url: String,
    file_url: String,
}

/// Client for one fal.ai account. Constructed once at process start and
/// shared across requests; holds only the API key and a reqwest client.
#[derive(Debug, Clone)]
pub struct FalClient {
    http: reqwest::Client,
    api_key: String,
}

impl FalClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    fn auth_value(&self) -> String {
        format!("Key {}", self.api_key)
    }

    /// Invoke a model synchronously and return its result payload.
    ///
    /// Used for image models, which respond within the request.
    pub async fn run(&self, model: &str, payload: &Value) -> Result<Value, FalError> {
        let url = format!("{RUN_BASE}/{model}");
        tracing::debug!(%model, "Invoking fal model (sync)");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.auth_value())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FalError::Upstream(format!(
                "{model} failed ({status}): {}",
                summarize_error_body(&body)
            )));
        }

        Ok(response.json().await?)
    }

    /// Submit a job to the queue API and block until it completes,
    /// returning the result payload.
    ///
    /// Used for video models, which run for tens of seconds. Polls the
    /// status endpoint at a fixed interval; there is no timeout beyond
    /// the transport default, so a stuck job stalls the calling request.
    pub async fn subscribe(&self, model: &str, payload: &Value) -> Result<Value, FalError> {
        let url = format!("{QUEUE_BASE}/{model}");
        tracing::debug!(%model, "Submitting fal queue job");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.auth_value())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FalError::Upstream(format!(
                "{model} submission failed ({status}): {}",
                summarize_error_body(&body)
            )));
        }

        let submission: QueueSubmission = response.json().await?;
        tracing::info!(%model, request_id = %submission.request_id, "fal job queued");

        loop {
            let status_response = self
                .http
                .get(&submission.status_url)
                .header(AUTHORIZATION, self.auth_value())
                .send()
                .await?;

            if !status_response.status().is_success() {
                let status = status_response.status();
                let body = status_response.text().await.unwrap_or_default();
                return Err(FalError::Upstream(format!(
                    "{model} status check failed ({status}): {}",
                    summarize_error_body(&body)
                )));
            }

            let snapshot: QueueStatus = status_response.json().await?;
            if snapshot.status == "COMPLETED" {
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        let result = self
            .http
            .get(&submission.response_url)
            .header(AUTHORIZATION, self.auth_value())
            .send()
            .await?;

        if !result.status().is_success() {
            let status = result.status();
            let body = result.text().await.unwrap_or_default();
            return Err(FalError::Upstream(format!(
                "{model} job failed ({status}): {}",
                summarize_error_body(&body)
            )));
        }

        tracing::info!(%model, request_id = %submission.request_id, "fal job completed");
        Ok(result.json().await?)
    }

    /// Upload a local file to fal storage and return its public URL.
    pub async fn upload_file(&self, path: &Path) -> Result<String, FalError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FalError::Upload(format!("Invalid file name: {}", path.display())))?;
        let content_type = content_type_for(file_name);
        let bytes = tokio::fs::read(path).await?;

        let initiate = self
            .http
            .post(format!("{REST_BASE}/storage/upload/initiate"))
            .header(AUTHORIZATION, self.auth_value())
            .json(&serde_json::json!({
                "file_name": file_name,
                "content_type": content_type,
            }))
            .send()
            .await?;

        if !initiate.status().is_success() {
            let status = initiate.status();
            let body = initiate.text().await.unwrap_or_default();
            return Err(FalError::Upload(format!(
                "upload handshake failed ({status}): {}",
                summarize_error_body(&body)
            )));
        }

        let ticket: UploadTicket = initiate.json().await?;

        let put = self
            .http
            .put(&ticket.upload_url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !put.status().is_success() {
            return Err(FalError::Upload(format!(
                "upload of {} failed ({})",
                path.display(),
                put.status()
            )));
        }

        tracing::debug!(file = %path.display(), url = %ticket.file_url, "Uploaded file to fal storage");
        Ok(ticket.file_url)
    }

    /// Download a generated artifact to `dest`, creating parent
    /// directories as needed.
    ///
    /// All-or-nothing: the full body is fetched into memory before the
    /// destination is written, so a failed fetch leaves no partial file.
    pub async fn download_to(&self, url: &str, dest: &Path) -> Result<PathBuf, FalError> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FalError::Download(format!(
                "fetching {url} returned {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &bytes).await?;

        tracing::debug!(dest = %dest.display(), size = bytes.len(), "Saved generated artifact");
        Ok(dest.to_path_buf())
    }
}

/// MIME type for an uploaded file, from its extension.
fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}
