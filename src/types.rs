// Type definitions and enums

use std::path::PathBuf;

/// Classified category of an uploaded file, drives extraction strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Image,
    Unsupported,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
            DocumentKind::Image => write!(f, "image"),
            DocumentKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One submitted file, scoped to a single pipeline invocation.
///
/// `local_path` points into the invocation's temporary directory; the bytes
/// are deleted when that directory is dropped, whatever the outcome.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub kind: DocumentKind,
    pub local_path: PathBuf,
}

/// Plain text pulled out of a document, tagged with where it came from.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub source_kind: DocumentKind,
}

/// Request contract for the remote analysis service.
///
/// `user_text` is already clipped to the configured prompt budget by the
/// time this struct exists; backends never truncate again.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub model: String,
    pub system_instruction: String,
    pub user_text: String,
    pub max_response_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Content too sparse: {0} chars after trim")]
    ContentTooSparse(usize),

    #[error("Analysis API error: {0}")]
    Analysis(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Terminal failure category of a pipeline invocation.
///
/// The mapping to a user-visible message is total: every stage error lands
/// on exactly one of these, and the raw error never reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    UnsupportedFormat,
    ExtractionFailed,
    ContentTooSparse,
    AnalysisFailed,
}

impl FailureReason {
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureReason::UnsupportedFormat => crate::messages::MSG_UNSUPPORTED_FORMAT,
            FailureReason::ExtractionFailed => crate::messages::MSG_EXTRACTION_FAILED,
            FailureReason::ContentTooSparse => crate::messages::MSG_CONTENT_TOO_SPARSE,
            FailureReason::AnalysisFailed => crate::messages::MSG_ANALYSIS_FAILED,
        }
    }
}

impl From<&AppError> for FailureReason {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::UnsupportedFormat(_) => FailureReason::UnsupportedFormat,
            AppError::Extraction(_)
            | AppError::Transport(_)
            | AppError::InvalidRequest(_)
            | AppError::Io(_) => FailureReason::ExtractionFailed,
            AppError::ContentTooSparse(_) => FailureReason::ContentTooSparse,
            AppError::Analysis(_) => FailureReason::AnalysisFailed,
        }
    }
}

/// Final state of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Analysis result was handed to the outbound sink.
    Delivered(String),
    /// Invocation stopped at some stage; the matching message was sent.
    Failed(FailureReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_a_reason() {
        let cases: Vec<(AppError, FailureReason)> = vec![
            (
                AppError::UnsupportedFormat("xlsx".into()),
                FailureReason::UnsupportedFormat,
            ),
            (
                AppError::Extraction("bad pdf".into()),
                FailureReason::ExtractionFailed,
            ),
            (
                AppError::Transport("download failed".into()),
                FailureReason::ExtractionFailed,
            ),
            (AppError::ContentTooSparse(12), FailureReason::ContentTooSparse),
            (
                AppError::Analysis("timeout".into()),
                FailureReason::AnalysisFailed,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(FailureReason::from(&error), expected);
        }
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(DocumentKind::Pdf.to_string(), "pdf");
        assert_eq!(DocumentKind::Unsupported.to_string(), "unsupported");
    }
}
