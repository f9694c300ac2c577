use crate::config::{Credentials, ZincConfig};
use crate::search::batch::DocumentBatch;
use crate::search::error::SubmitError;
use crate::search::models::{BulkRequest, BulkResponse, EmailDocument};
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::time::sleep;

const BULK_PATH: &str = "/api/_bulkv2";

/// Outcome of a flush: how much was sent and how much of it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Documents taken from the buffer.
    pub documents: usize,
    /// Requests attempted, one per sub-batch.
    pub chunks: usize,
    pub failed_chunks: usize,
    pub failed_documents: usize,
    /// Records the store acknowledged.
    pub indexed: u64,
}

impl FlushReport {
    pub fn is_success(&self) -> bool {
        self.failed_chunks == 0
    }
}

/// Buffers email documents and submits them to ZincSearch's bulk endpoint.
pub struct BulkIndexClient {
    http: reqwest::Client,
    config: ZincConfig,
    credentials: Credentials,
    batch: DocumentBatch,
}

impl BulkIndexClient {
    pub fn new(config: ZincConfig, credentials: Credentials) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mamuro-indexer/0.1")
            .build()
            .map_err(SubmitError::Http)?;

        Ok(Self {
            http,
            config,
            credentials,
            batch: DocumentBatch::new(),
        })
    }

    pub fn config(&self) -> &ZincConfig {
        &self.config
    }

    pub fn enqueue(&self, document: EmailDocument) {
        self.batch.push(document);
    }

    pub fn enqueue_all<I>(&self, documents: I)
    where
        I: IntoIterator<Item = EmailDocument>,
    {
        self.batch.extend(documents);
    }

    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Submit everything buffered so far.
    ///
    /// The buffer is drained up front; documents in a sub-batch that still
    /// fails after its retries are dropped and counted in the report.
    pub async fn flush(&self) -> FlushReport {
        let documents = self.batch.take();
        let mut report = FlushReport {
            documents: documents.len(),
            ..FlushReport::default()
        };

        if documents.is_empty() {
            info!("zinc flush: nothing to submit");
            return report;
        }

        let chunk_size = match self.config.batch_size {
            0 => documents.len(),
            size => size,
        };

        info!(
            "zinc flush: submitting {} documents to index '{}' ({} per request)",
            documents.len(),
            self.config.index,
            chunk_size
        );

        for (chunk_index, chunk) in documents.chunks(chunk_size).enumerate() {
            report.chunks += 1;
            debug!(
                "zinc flush: submitting chunk #{} ({} documents)",
                chunk_index + 1,
                chunk.len()
            );

            match self.submit_with_retry(chunk).await {
                Ok(indexed) => report.indexed += indexed,
                Err(err) => {
                    error!(
                        "zinc flush: chunk #{} ({} documents) failed: {}",
                        chunk_index + 1,
                        chunk.len(),
                        err
                    );
                    report.failed_chunks += 1;
                    report.failed_documents += chunk.len();
                }
            }
        }

        info!(
            "zinc flush: {} of {} chunks succeeded, {} records acknowledged",
            report.chunks - report.failed_chunks,
            report.chunks,
            report.indexed
        );

        report
    }

    async fn submit_with_retry(&self, documents: &[EmailDocument]) -> Result<u64, SubmitError> {
        let mut attempt: u32 = 0;
        loop {
            match self.submit_batch(documents).await {
                Ok(indexed) => return Ok(indexed),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_backoff * attempt;
                    warn!(
                        "zinc submit failed ({}), retry {}/{} in {:?}",
                        err, attempt, self.config.max_retries, delay
                    );
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Send one bulk request and return the record count the store reports.
    pub async fn submit_batch(&self, documents: &[EmailDocument]) -> Result<u64, SubmitError> {
        let url = format!("{}{}", self.config.base_url, BULK_PATH);
        let payload = BulkRequest {
            index: &self.config.index,
            records: documents,
        };

        let response = self
            .http
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&payload)
            .send()
            .await
            .map_err(SubmitError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(SubmitError::status(status, body));
        }

        let body = response.bytes().await.map_err(SubmitError::Http)?;
        let parsed: BulkResponse = serde_json::from_slice(&body)?;
        if let Some(message) = parsed.message.as_deref() {
            debug!("zinc submit: {message}");
        }

        Ok(parsed.record_count.unwrap_or(documents.len() as u64))
    }
}
