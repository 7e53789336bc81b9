//! Retrieval half of a RAG pipeline: newest record metadata plus one page of
//! OCR text, rendered as a prompt context block. No model is called.

use crate::adapters::http::RepositoryClient;
use crate::domain::model::RecordHit;
use crate::utils::error::{OpsError, Result};

pub const DEFAULT_PAGE_ID: &str = "p001";
pub const DEFAULT_MAX_CHARS: usize = 500;
pub const NO_OCR_PLACEHOLDER: &str = "<NO OCR DATA AVAILABLE FOR THIS RECORD>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagContext {
    pub pid: String,
    pub title: String,
    pub description: String,
    pub page_number: u32,
    pub page_text: String,
}

impl RagContext {
    pub fn from_record(record: &RecordHit, page_number: u32, page_text: String) -> Self {
        Self {
            pid: record.id.clone().unwrap_or_default(),
            title: record.title().to_string(),
            description: record.description().to_string(),
            page_number,
            page_text,
        }
    }

    pub fn render(&self, max_chars: usize) -> String {
        format!(
            "
=================================================================
DOCUMENT CONTEXT FOR LLM (RAG)
=================================================================

METADATA:
---------
Title: {title}
Record ID (PID): {pid}

DESCRIPTION:
------------
{description}

CONTENT (PAGE {page}):
-----------------
{content}
=================================================================
",
            title = self.title,
            pid = self.pid,
            description = self.description,
            page = self.page_number,
            content = truncate_chars(&self.page_text, max_chars),
        )
    }
}

/// Cuts at `max_chars` characters (not bytes) and marks the cut with `...`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Page number embedded in ids such as `p001`; 1 when there is none.
pub fn page_number(page_id: &str) -> u32 {
    page_id
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .unwrap_or(1)
}

pub struct RagFeasibility {
    client: RepositoryClient,
    page_id: String,
    max_chars: usize,
}

impl RagFeasibility {
    pub fn new(client: RepositoryClient) -> Self {
        Self {
            client,
            page_id: DEFAULT_PAGE_ID.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = page_id.into();
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub async fn fetch_latest_record(&self) -> Result<RecordHit> {
        tracing::info!("[Step 1] Fetching Record Metadata...");

        let record = self.client.latest_record().await?.ok_or_else(|| OpsError::NoDataError {
            message: "No published records found. Cannot perform RAG test. Please upload test data."
                .to_string(),
        })?;

        if record.id.is_none() {
            return Err(OpsError::NoDataError {
                message: "Newest record has no id".to_string(),
            });
        }

        tracing::info!("✅ Found Record: {}", record.id.as_deref().unwrap_or_default());
        tracing::info!("   Title: {}", record.title());
        Ok(record)
    }

    /// OCR text of the configured page. A 404 yields the placeholder text.
    pub async fn fetch_page_text(&self, pid: &str) -> Result<String> {
        tracing::info!(
            "[Step 2] Fetching OCR Data for page {} of {}...",
            self.page_id,
            pid
        );

        match self.client.annotations(pid, &self.page_id).await? {
            None => {
                tracing::warn!(
                    "⚠️ Page OCR not found. This is expected if the record has no HOCR data."
                );
                Ok(NO_OCR_PLACEHOLDER.to_string())
            }
            Some(list) => {
                let text = list.text();
                tracing::info!(
                    "✅ Successfully extracted {} characters of OCR text.",
                    text.chars().count()
                );
                Ok(text)
            }
        }
    }

    /// Runs all three steps and returns the rendered context block.
    pub async fn run(&self) -> Result<String> {
        tracing::info!(
            "Starting RAG Feasibility Test against {}",
            self.client.base_url()
        );
        println!("{}", "=".repeat(60));

        let record = self.fetch_latest_record().await?;
        let pid = record.id.clone().unwrap_or_default();
        let page_text = self.fetch_page_text(&pid).await?;

        tracing::info!("[Step 3] Generating LLM Prompt Context...");
        let context = RagContext::from_record(&record, page_number(&self.page_id), page_text);
        Ok(context.render(self.max_chars))
    }
}
