//! Contracts toward the chat-transport collaborator.
//!
//! The crate never speaks a chat protocol itself: it consumes inbound file
//! events, asks the transport to download file bytes, and hands replies
//! back. Everything here is the seam those collaborators plug into.

use std::path::Path;

use async_trait::async_trait;

use crate::types::{AppError, AppResult};

/// Inbound file event as delivered by the transport.
#[derive(Debug, Clone)]
pub enum FileEvent {
    /// A document upload; the filename is user-supplied and may be absent.
    Document {
        file_id: String,
        filename: Option<String>,
    },
    /// A photo upload, offered in several resolution variants.
    Photo { variants: Vec<PhotoVariant> },
}

#[derive(Debug, Clone)]
pub struct PhotoVariant {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

/// A concrete file reference resolved from an event: what to download and
/// what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub file_id: String,
    pub filename: String,
}

impl FileEvent {
    /// Resolve the event to one downloadable file.
    ///
    /// Documents without a filename fall back to `"document"`, which later
    /// classifies as unsupported. Photos pick the highest-resolution
    /// variant and synthesize a `.jpg` filename; an event with no variants
    /// is malformed.
    pub fn resolve(&self) -> AppResult<ResolvedFile> {
        match self {
            FileEvent::Document { file_id, filename } => Ok(ResolvedFile {
                file_id: file_id.clone(),
                filename: filename.clone().unwrap_or_else(|| "document".to_string()),
            }),
            FileEvent::Photo { variants } => {
                let best = variants
                    .iter()
                    .max_by_key(|v| u64::from(v.width) * u64::from(v.height))
                    .ok_or_else(|| {
                        AppError::InvalidRequest("photo event with no variants".to_string())
                    })?;
                Ok(ResolvedFile {
                    file_id: best.file_id.clone(),
                    filename: format!("photo_{}.jpg", best.file_id),
                })
            }
        }
    }
}

/// Outbound reply to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    /// Analysis results can quote URLs from the contract; previews of those
    /// would bloat the reply.
    pub disable_link_preview: bool,
}

impl OutboundMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disable_link_preview: false,
        }
    }

    pub fn without_preview(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disable_link_preview: true,
        }
    }
}

/// File retrieval and message delivery, implemented by the transport layer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Fetch the file behind `file_id` into `destination`. Opaque and
    /// potentially failing; the pipeline treats any error as fatal for the
    /// invocation.
    async fn download(&self, file_id: &str, destination: &Path) -> AppResult<()>;

    /// Deliver one text reply to the user.
    async fn send_message(&self, message: OutboundMessage) -> AppResult<()>;
}
