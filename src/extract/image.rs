//! Image strategy: OCR via tesseract, mixed Cyrillic + Latin alphabet.

use std::path::Path;

use tesseract_rs::TesseractAPI;
use tracing::debug;

use crate::types::{AppError, AppResult};

/// Run OCR over a photo of a document and return the recognized text
/// verbatim, OCR noise included. Filtering garbage output is the content
/// validator's job, not this strategy's. Fails if the image cannot be
/// decoded or the OCR engine cannot be initialized.
pub fn extract_text(path: &Path, languages: &str, tessdata: Option<&str>) -> AppResult<String> {
    let image = image::open(path)
        .map_err(|e| AppError::Extraction(format!("cannot decode image: {e}")))?
        .to_rgb8();
    let (width, height) = image.dimensions();
    debug!(width, height, languages, "Running OCR");

    let datapath = tessdata
        .map(str::to_string)
        .or_else(|| std::env::var("TESSDATA_PREFIX").ok())
        .unwrap_or_default();

    let api = TesseractAPI::new();
    api.init(&datapath, languages)
        .map_err(|e| AppError::Extraction(format!("cannot initialize OCR engine: {e:?}")))?;
    api.set_image(
        image.as_raw(),
        width as i32,
        height as i32,
        3,
        (width * 3) as i32,
    )
    .map_err(|e| AppError::Extraction(format!("OCR rejected image data: {e:?}")))?;

    api.get_utf8_text()
        .map_err(|e| AppError::Extraction(format!("OCR failed: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undecodable_bytes_are_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"\xFF\xD8 definitely not jpeg data").unwrap();
        let err = extract_text(&path, "rus+eng", None).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
