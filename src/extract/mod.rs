//! Kind-dispatched text extraction.
//!
//! One strategy per [`DocumentKind`]: paginated PDF text, DOCX body text,
//! and OCR for photos. Every strategy either returns the full extracted
//! text or fails; no partial output. The parsers and the OCR engine are
//! synchronous and CPU-bound, so the production extractor runs them on the
//! blocking thread pool to keep the async executor free for other
//! in-flight invocations.

pub mod docx;
pub mod image;
pub mod pdf;

use async_trait::async_trait;
use tracing::debug;

use crate::config::IngestConfig;
use crate::types::{AppError, AppResult, Document, DocumentKind, ExtractedText};

/// Extraction seam of the pipeline. The production implementation parses
/// real files; tests substitute canned text behind the same trait.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &Document) -> AppResult<ExtractedText>;
}

/// Production extractor: selects the strategy matching the document kind.
pub struct DocumentExtractor {
    config: IngestConfig,
}

impl DocumentExtractor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, document: &Document) -> AppResult<ExtractedText> {
        let kind = document.kind;
        let path = document.local_path.clone();
        debug!(kind = %kind, path = %path.display(), "Extracting text");

        let text = match kind {
            DocumentKind::Pdf => run_blocking(move || pdf::extract_text(&path)).await?,
            DocumentKind::Docx => run_blocking(move || docx::extract_text(&path)).await?,
            DocumentKind::Image => {
                let languages = self.config.ocr_languages.clone();
                let tessdata = self.config.tessdata_path.clone();
                run_blocking(move || image::extract_text(&path, &languages, tessdata.as_deref()))
                    .await?
            }
            // The pipeline rejects unsupported kinds before extraction;
            // reaching this arm is a bug in the orchestrator.
            DocumentKind::Unsupported => {
                return Err(AppError::InvalidRequest(
                    "unsupported document kind reached the extractor".to_string(),
                ))
            }
        };

        Ok(ExtractedText {
            text,
            source_kind: kind,
        })
    }
}

async fn run_blocking<F>(work: F) -> AppResult<String>
where
    F: FnOnce() -> AppResult<String> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Extraction(format!("extraction task panicked: {e}")))?
}
