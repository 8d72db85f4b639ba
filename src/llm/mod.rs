// LLM abstraction layer

pub mod openai;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::messages::SYSTEM_PROMPT;
use crate::types::{AnalysisRequest, AppError, AppResult};

/// Seam to the remote analysis service. The production backend talks to
/// OpenAI; tests substitute a recording fake.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Perform one chat completion and return the reply content.
    /// Implementations must not retry; a failed call is surfaced as-is.
    async fn create_chat_completion(&self, request: &AnalysisRequest) -> AppResult<String>;
}

/// Client for the structured risk analysis call.
///
/// Owns the fixed system instruction and the request shaping (prompt
/// clipping, response cap, temperature); the wire protocol lives behind
/// [`AnalysisBackend`].
pub struct AnalysisClient {
    backend: Box<dyn AnalysisBackend>,
    config: LlmConfig,
}

impl AnalysisClient {
    pub fn new(config: LlmConfig) -> Self {
        let backend = Box::new(openai::OpenAiBackend::new(&config.openai_api_key));
        Self { backend, config }
    }

    pub fn with_backend(config: LlmConfig, backend: Box<dyn AnalysisBackend>) -> Self {
        Self { backend, config }
    }

    /// Send the document text for risk analysis and return the formatted
    /// findings, whitespace-trimmed.
    ///
    /// Exactly one attempt per call. Retrying here could double-bill the
    /// remote service, so any failure goes straight back to the caller.
    pub async fn analyze(&self, text: &str) -> AppResult<String> {
        let user_text = clip(text, self.config.max_prompt_chars);
        debug!(
            input_chars = text.chars().count(),
            sent_chars = user_text.chars().count(),
            model = %self.config.model,
            "Requesting analysis"
        );

        let request = AnalysisRequest {
            model: self.config.model.clone(),
            system_instruction: SYSTEM_PROMPT.to_string(),
            user_text: user_text.to_string(),
            max_response_tokens: self.config.max_response_tokens,
            temperature: self.config.temperature,
        };

        let content = self.backend.create_chat_completion(&request).await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Analysis("empty completion content".to_string()));
        }

        info!(response_chars = content.chars().count(), "Analysis completed");
        Ok(content.to_string())
    }
}

/// Prefix-truncate `text` to at most `max_chars` characters.
///
/// Counted in characters so multi-byte Cyrillic text never gets cut inside
/// a code point. Truncation is silent: staying under the prompt budget is
/// a cost bound, not an error condition.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::Mutex;

    struct RecordingBackend {
        requests: Mutex<Vec<AnalysisRequest>>,
        reply: AppResult<String>,
    }

    impl RecordingBackend {
        fn replying(reply: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Ok(reply.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Err(AppError::Analysis(message.to_string())),
            }
        }
    }

    #[async_trait]
    impl AnalysisBackend for &RecordingBackend {
        async fn create_chat_completion(&self, request: &AnalysisRequest) -> AppResult<String> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(AppError::Analysis(msg)) => Err(AppError::Analysis(msg.clone())),
                Err(_) => unreachable!(),
            }
        }
    }

    fn client(backend: &'static RecordingBackend) -> AnalysisClient {
        AnalysisClient::with_backend(Config::default().llm, Box::new(backend))
    }

    fn leak(backend: RecordingBackend) -> &'static RecordingBackend {
        Box::leak(Box::new(backend))
    }

    #[test]
    fn clip_is_identity_under_the_budget() {
        let text = "короткий текст договора";
        assert_eq!(clip(text, 60_000), text);
        assert_eq!(clip("", 60_000), "");
    }

    #[test]
    fn clip_takes_a_char_prefix_over_the_budget() {
        let text = "ф".repeat(70_000);
        let clipped = clip(&text, 60_000);
        assert_eq!(clipped.chars().count(), 60_000);
        assert!(text.starts_with(clipped));
    }

    #[test]
    fn clip_exactly_at_the_budget_is_identity() {
        let text = "ы".repeat(60_000);
        assert_eq!(clip(&text, 60_000), text);
    }

    #[tokio::test]
    async fn request_carries_fixed_instruction_and_tuning() {
        let backend = leak(RecordingBackend::replying("## Риски\n1. …"));
        let result = client(backend).analyze("текст договора").await.unwrap();
        assert_eq!(result, "## Риски\n1. …");

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system_instruction, SYSTEM_PROMPT);
        assert_eq!(requests[0].user_text, "текст договора");
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].max_response_tokens, 1200);
        assert!((requests[0].temperature - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn oversized_input_is_clipped_before_the_wire() {
        let backend = leak(RecordingBackend::replying("ok"));
        let text = "я".repeat(60_500);
        client(backend).analyze(&text).await.unwrap();

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].user_text.chars().count(), 60_000);
        assert!(text.starts_with(&requests[0].user_text));
    }

    #[tokio::test]
    async fn response_is_whitespace_trimmed() {
        let backend = leak(RecordingBackend::replying("\n  итоговый отчёт  \n"));
        let result = client(backend).analyze("текст").await.unwrap();
        assert_eq!(result, "итоговый отчёт");
    }

    #[tokio::test]
    async fn blank_completion_is_an_analysis_error() {
        let backend = leak(RecordingBackend::replying("   \n  "));
        let err = client(backend).analyze("текст").await.unwrap_err();
        assert!(matches!(err, AppError::Analysis(_)));
    }

    #[tokio::test]
    async fn backend_failure_is_not_retried() {
        let backend = leak(RecordingBackend::failing("rate limited"));
        let err = client(backend).analyze("текст").await.unwrap_err();
        assert!(matches!(err, AppError::Analysis(_)));
        assert_eq!(backend.requests.lock().unwrap().len(), 1);
    }
}
