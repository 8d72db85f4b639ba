//! Extracted-content validation.
//!
//! A single length threshold stands between extraction and the paid
//! analysis call: text that strips down to almost nothing is either an
//! empty document or failed OCR, and sending it to the model wastes money
//! on a useless answer.

use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// Stripped length fell below the threshold; carries the observed length.
    InsufficientContent(usize),
}

/// Gate on the stripped character count of extracted text.
#[derive(Debug, Clone, Copy)]
pub struct ContentValidator {
    min_text_chars: usize,
}

impl ContentValidator {
    pub fn new(min_text_chars: usize) -> Self {
        Self { min_text_chars }
    }

    /// Length is counted in characters, not bytes, so Cyrillic text is not
    /// penalized double. Exactly at the threshold is valid.
    pub fn validate(&self, text: &str) -> ValidationOutcome {
        let stripped_len = text.trim().chars().count();
        if stripped_len < self.min_text_chars {
            ValidationOutcome::InsufficientContent(stripped_len)
        } else {
            ValidationOutcome::Valid
        }
    }

    /// [`validate`](Self::validate) as a fallible operation for pipeline use.
    pub fn check(&self, text: &str) -> AppResult<()> {
        match self.validate(text) {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::InsufficientContent(len) => Err(AppError::ContentTooSparse(len)),
        }
    }
}
