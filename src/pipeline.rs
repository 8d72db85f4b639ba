//! Ingestion pipeline: one inbound file event in, one reply out.
//!
//! Stages run in a fixed order (classify, download, extract, validate,
//! analyze, deliver) and short-circuit on the first failure. Every failure
//! is logged with its diagnostic detail and translated into exactly one
//! fixed user-facing message; raw errors never leave the process.
//!
//! Concurrency contract: each invocation owns its collaborator references
//! and a private temporary directory, with no mutable state shared across
//! invocations. Any number of `handle_event` calls may run concurrently;
//! an invocation stalled on the network stalls only itself.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::classify::classify;
use crate::config::Config;
use crate::extract::{DocumentExtractor, TextExtractor};
use crate::llm::AnalysisClient;
use crate::messages::MSG_ACK;
use crate::transport::{ChatTransport, FileEvent, OutboundMessage};
use crate::types::{AppError, AppResult, Document, DocumentKind, FailureReason, PipelineOutcome};
use crate::validate::ContentValidator;

pub struct IngestionPipeline {
    transport: Arc<dyn ChatTransport>,
    extractor: Arc<dyn TextExtractor>,
    analysis: Arc<AnalysisClient>,
    validator: ContentValidator,
}

impl IngestionPipeline {
    /// Production wiring: real extractors and the OpenAI analysis backend.
    pub fn new(config: Config, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            validator: ContentValidator::new(config.ingest.min_text_chars),
            extractor: Arc::new(DocumentExtractor::new(config.ingest)),
            analysis: Arc::new(AnalysisClient::new(config.llm)),
        }
    }

    /// Wiring with explicit collaborators, used by tests.
    pub fn with_components(
        transport: Arc<dyn ChatTransport>,
        extractor: Arc<dyn TextExtractor>,
        analysis: Arc<AnalysisClient>,
        validator: ContentValidator,
    ) -> Self {
        Self {
            transport,
            extractor,
            analysis,
            validator,
        }
    }

    /// Process one inbound file event end to end.
    ///
    /// Sends the acknowledgment, runs the stage chain, and delivers either
    /// the analysis result (link previews disabled) or the failure message
    /// for the stage that stopped the invocation. Never returns an error:
    /// a single document's failure must not take the process down.
    pub async fn handle_event(&self, event: FileEvent) -> PipelineOutcome {
        if let Err(e) = self
            .transport
            .send_message(OutboundMessage::plain(MSG_ACK))
            .await
        {
            warn!(error = %e, "Failed to send acknowledgment");
        }

        match self.run(&event).await {
            Ok(result) => {
                info!(result_chars = result.chars().count(), "Analysis delivered");
                if let Err(e) = self
                    .transport
                    .send_message(OutboundMessage::without_preview(result.clone()))
                    .await
                {
                    warn!(error = %e, "Failed to deliver analysis result");
                }
                PipelineOutcome::Delivered(result)
            }
            Err(stage_error) => {
                let reason = FailureReason::from(&stage_error);
                error!(error = %stage_error, reason = ?reason, "Pipeline invocation failed");
                if let Err(e) = self
                    .transport
                    .send_message(OutboundMessage::plain(reason.user_message()))
                    .await
                {
                    warn!(error = %e, "Failed to deliver failure message");
                }
                PipelineOutcome::Failed(reason)
            }
        }
    }

    async fn run(&self, event: &FileEvent) -> AppResult<String> {
        let resolved = event.resolve()?;

        // Classified. Rejecting here spares the download for files the
        // extractor could never handle.
        let kind = classify(&resolved.filename);
        debug!(filename = %resolved.filename, kind = %kind, "Classified inbound file");
        if kind == DocumentKind::Unsupported {
            return Err(AppError::UnsupportedFormat(resolved.filename));
        }

        // Scratch storage for this invocation only; the directory and the
        // downloaded bytes are removed when `workdir` drops, on every path.
        let workdir = tempfile::tempdir()?;
        let local_path = workdir.path().join(sanitize_filename(&resolved.filename));
        self.transport
            .download(&resolved.file_id, &local_path)
            .await?;

        let document = Document {
            filename: resolved.filename,
            kind,
            local_path,
        };

        // Extracted.
        let extracted = self.extractor.extract(&document).await?;
        debug!(
            chars = extracted.text.chars().count(),
            source = %extracted.source_kind,
            "Text extracted"
        );

        // Validated.
        self.validator.check(&extracted.text)?;

        // Analyzed.
        self.analysis.analyze(&extracted.text).await
    }
}

/// The filename is user-supplied; keep only its final path component so it
/// cannot escape the invocation's temporary directory.
fn sanitize_filename(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
