use crate::config::Config;
use crate::errors::AppError;
use crate::models::{AnalysisReport, UploadOutcome};
use reqwest::multipart;
use std::path::Path;
use std::time::Duration;

/// Client for the FinSight analysis backend.
///
/// All response bodies are validated and normalized here, at the network
/// boundary; callers only ever see typed models or an [`AppError`].
#[derive(Debug, Clone)]
pub struct FinSightClient {
    client: reqwest::Client,
    base_url: String,
}

impl FinSightClient {
    /// Creates a new `FinSightClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend, without a trailing slash.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Uploads a PDF document for analysis.
    ///
    /// Exactly one document per call. Non-PDF paths are rejected with
    /// [`AppError::BadRequest`] before any file or network I/O happens.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF on disk.
    ///
    /// # Returns
    ///
    /// * `Result<UploadOutcome, AppError>` - The normalized analysis result.
    pub async fn upload_document(&self, path: &Path) -> Result<UploadOutcome, AppError> {
        if !is_pdf_path(path) {
            return Err(AppError::BadRequest(format!(
                "'{}' is not a PDF document",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::BadRequest(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let url = format!("{}/api/upload", self.base_url);
        tracing::info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

        // Backend expects the multipart field to be named "pdf"
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|e| AppError::InternalError(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part("pdf", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ApiError(format!(
                "Upload failed with {}: {}",
                status, error_text
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::ApiError(format!("Failed to parse upload response: {}", e))
        })?;

        UploadOutcome::from_value(body)
    }

    /// Fetches all stored analysis reports.
    pub async fn fetch_history(&self) -> Result<Vec<AnalysisReport>, AppError> {
        let url = format!("{}/api/history", self.base_url);
        tracing::info!("Fetching analysis history from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("History request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ApiError(format!(
                "History fetch failed with {}: {}",
                status, error_text
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::ApiError(format!("Failed to parse history response: {}", e))
        })?;

        if !body.is_array() {
            return Err(AppError::ApiError(
                "history response is not an array".to_string(),
            ));
        }

        let reports: Vec<AnalysisReport> = serde_json::from_value(body).map_err(|e| {
            AppError::ApiError(format!("Malformed report in history response: {}", e))
        })?;

        tracing::info!("Fetched {} stored reports", reports.len());
        Ok(reports)
    }

    /// Deletes a stored report by id.
    ///
    /// # Arguments
    ///
    /// * `id` - The backend-assigned report identifier.
    pub async fn delete_report(&self, id: &str) -> Result<(), AppError> {
        let url = format!("{}/api/delete/{}", self.base_url, id);
        tracing::info!("Deleting report {} via {}", id, url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Delete request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("No report with id '{}'", id)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ApiError(format!(
                "Delete failed with {}: {}",
                status, error_text
            )));
        }

        tracing::info!("Report {} deleted", id);
        Ok(())
    }

    /// Fetches the most recent analysis report.
    ///
    /// A failed fetch is returned as an error; the client never substitutes
    /// fabricated data for a backend failure.
    pub async fn fetch_latest(&self) -> Result<AnalysisReport, AppError> {
        let url = format!("{}/api/finance-report/latest", self.base_url);
        tracing::info!("Fetching latest report from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Latest-report request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("No reports stored yet".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ApiError(format!(
                "Latest-report fetch failed with {}: {}",
                status, error_text
            )));
        }

        let report: AnalysisReport = response.json().await.map_err(|e| {
            AppError::ApiError(format!("Failed to parse latest report: {}", e))
        })?;

        Ok(report)
    }
}

/// Client-side document type check. Case-insensitive on the extension;
/// the backend only accepts PDF documents.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
