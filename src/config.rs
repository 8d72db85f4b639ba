use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Hard prefix cap on the text sent to the analysis service, in characters.
/// Bounds cost and latency of the paid call; excess is dropped silently.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 60_000;

/// Minimum stripped length for extracted text to be worth analyzing.
/// Filters out near-empty documents and failed OCR before the paid call.
/// Tuned for Russian-language contracts; configurable because the right
/// value likely differs between direct text extraction and noisy OCR.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 200;

/// Cap on the model's reply length, in tokens.
pub const DEFAULT_MAX_RESPONSE_TOKENS: u32 = 1200;

/// Low temperature: risk findings should be repeatable, not creative.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Contracts arrive in Russian with Latin-script names and clause references
/// mixed in, so OCR runs with both alphabets enabled.
pub const DEFAULT_OCR_LANGUAGES: &str = "rus+eng";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub openai_api_key: String,
    pub model: String,
    pub max_prompt_chars: usize,
    pub max_response_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    pub min_text_chars: usize,
    pub ocr_languages: String,
    /// Override for the tesseract data directory; falls back to the
    /// system-wide TESSDATA_PREFIX when unset.
    pub tessdata_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            llm: LlmConfig {
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                model: env::var("ANALYSIS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                max_prompt_chars: env::var("MAX_PROMPT_CHARS")
                    .unwrap_or_else(|_| DEFAULT_MAX_PROMPT_CHARS.to_string())
                    .parse()?,
                max_response_tokens: env::var("MAX_RESPONSE_TOKENS")
                    .unwrap_or_else(|_| DEFAULT_MAX_RESPONSE_TOKENS.to_string())
                    .parse()?,
                temperature: env::var("ANALYSIS_TEMPERATURE")
                    .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
                    .parse()?,
            },
            ingest: IngestConfig {
                min_text_chars: env::var("MIN_TEXT_CHARS")
                    .unwrap_or_else(|_| DEFAULT_MIN_TEXT_CHARS.to_string())
                    .parse()?,
                ocr_languages: env::var("OCR_LANGUAGES")
                    .unwrap_or_else(|_| DEFAULT_OCR_LANGUAGES.to_string()),
                tessdata_path: env::var("TESSDATA_PATH").ok(),
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                openai_api_key: String::new(),
                model: DEFAULT_MODEL.to_string(),
                max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
                max_response_tokens: DEFAULT_MAX_RESPONSE_TOKENS,
                temperature: DEFAULT_TEMPERATURE,
            },
            ingest: IngestConfig {
                min_text_chars: DEFAULT_MIN_TEXT_CHARS,
                ocr_languages: DEFAULT_OCR_LANGUAGES.to_string(),
                tessdata_path: None,
            },
        }
    }
}
