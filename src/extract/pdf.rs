//! PDF strategy: per-page text via lopdf.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::types::{AppError, AppResult};

/// Extract text from every page, in page order, joined with a newline.
///
/// A page with no extractable text (scanned page, vector-only content)
/// contributes an empty string so page positions survive in the output.
/// Only a document that fails to parse at all is an error.
pub fn extract_text(path: &Path) -> AppResult<String> {
    let document = Document::load(path)
        .map_err(|e| AppError::Extraction(format!("cannot parse PDF: {e}")))?;

    // get_pages is a BTreeMap keyed by page number, iteration is in order.
    let pages: Vec<String> = document
        .get_pages()
        .keys()
        .map(|&number| {
            document
                .extract_text(&[number])
                .map(|text| text.trim_end_matches('\n').to_string())
                .unwrap_or_default()
        })
        .collect();

    debug!(page_count = pages.len(), "PDF pages extracted");
    Ok(join_pages(&pages))
}

/// Concatenate page texts with a single `\n` separator, preserving empty
/// pages as empty lines.
fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a minimal PDF with one page per entry; `None` produces a page
    /// whose content stream has no text operators at all.
    fn build_pdf(page_texts: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let kids: Vec<Object> = page_texts
            .iter()
            .map(|text| {
                let operations = match text {
                    Some(text) => vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new("Td", vec![50.into(), 700.into()]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ],
                    None => vec![],
                };
                let content = Content { operations };
                let content_id = doc.add_object(Stream::new(
                    dictionary! {},
                    content.encode().unwrap(),
                ));
                let page_id = doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                });
                page_id.into()
            })
            .collect();

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn write_pdf(page_texts: &[Option<&str>]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.pdf");
        std::fs::write(&path, build_pdf(page_texts)).unwrap();
        (dir, path)
    }

    #[test]
    fn textless_middle_page_keeps_its_position() {
        let (_dir, path) = write_pdf(&[
            Some("First page clause"),
            None,
            Some("Third page clause"),
        ]);

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "First page clause\n\nThird page clause");
    }

    #[test]
    fn single_page_document_extracts_without_separator() {
        let (_dir, path) = write_pdf(&[Some("Only clause")]);

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Only clause");
    }

    #[test]
    fn pages_join_with_newline_preserving_empty_pages() {
        let pages = vec![
            "Сторона обязуется".to_string(),
            String::new(),
            "Ответственность сторон".to_string(),
        ];
        assert_eq!(
            join_pages(&pages),
            "Сторона обязуется\n\nОтветственность сторон"
        );
    }

    #[test]
    fn single_page_has_no_separator() {
        assert_eq!(join_pages(&["only page".to_string()]), "only page");
    }

    #[test]
    fn no_pages_is_empty_output() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn unparseable_file_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.7 truncated nonsense").unwrap();
        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
