//! DOCX strategy: body text via docx-rust.

use std::path::Path;

use docx_rust::document::BodyContent;
use docx_rust::DocxFile;

use crate::types::{AppError, AppResult};

/// Extract the full body text of a Word document as one string, paragraphs
/// separated by newlines. A corrupt or non-conforming package is an error;
/// nothing is returned from a partially readable file.
pub fn extract_text(path: &Path) -> AppResult<String> {
    let file = DocxFile::from_file(path)
        .map_err(|e| AppError::Extraction(format!("cannot open DOCX: {e:?}")))?;
    let docx = file
        .parse()
        .map_err(|e| AppError::Extraction(format!("cannot parse DOCX: {e:?}")))?;

    let mut body_text = String::new();
    for content in &docx.document.body.content {
        if let BodyContent::Paragraph(paragraph) = content {
            for text in paragraph.iter_text() {
                body_text.push_str(text);
            }
            body_text.push('\n');
        }
    }

    Ok(body_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zip_bytes_are_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive at all").unwrap();
        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        let err = extract_text(Path::new("/nonexistent/contract.docx")).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
