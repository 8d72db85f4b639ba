use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::llm::AnalysisBackend;
use crate::types::{AnalysisRequest, AppError, AppResult};

pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
}

impl OpenAiBackend {
    pub fn new(api_key: &str) -> Self {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        Self { client }
    }
}

#[async_trait]
impl AnalysisBackend for OpenAiBackend {
    async fn create_chat_completion(&self, request: &AnalysisRequest) -> AppResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_instruction.as_str())
                .build()
                .map_err(|e| AppError::Analysis(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user_text.as_str())
                .build()
                .map_err(|e| AppError::Analysis(e.to_string()))?
                .into(),
        ];

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .max_tokens(request.max_response_tokens)
            .temperature(request.temperature)
            .build()
            .map_err(|e| AppError::Analysis(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(completion_request)
            .await
            .map_err(|e| AppError::Analysis(e.to_string()))?;

        // The contract depends only on the first choice carrying content.
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::Analysis("completion returned no choices".to_string()))
    }
}
