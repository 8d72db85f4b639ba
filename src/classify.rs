//! Filename-based format classification.
//!
//! Pure and total: every filename maps to a [`DocumentKind`], there is no
//! failure mode. Classification runs before the file is even downloaded so
//! unsupported uploads are rejected without touching the network.

use crate::types::DocumentKind;

/// Map a user-supplied filename to a document kind by its last extension,
/// case-insensitively. No extension, a trailing dot, or an unknown
/// extension all classify as `Unsupported`.
pub fn classify(filename: &str) -> DocumentKind {
    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return DocumentKind::Unsupported,
    };

    match extension.as_str() {
        "pdf" => DocumentKind::Pdf,
        "doc" | "docx" => DocumentKind::Docx,
        "jpg" | "jpeg" | "png" | "heic" | "webp" => DocumentKind::Image,
        _ => DocumentKind::Unsupported,
    }
}
