use crate::llm::client::{GenerationParams, LLMClient};
use crate::types::{AppError, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
        }
    }

    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        params: &GenerationParams,
    ) -> Result<String> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);
        if let Some(temperature) = params.temperature {
            args.temperature(temperature);
        }
        let request = args
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::LLM(format!("OpenAI API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone());

        if content.is_none() {
            tracing::warn!(model = %self.model, "OpenAI returned no content");
        }

        Ok(content.unwrap_or_default())
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate_with_params(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        self.complete(
            vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                    system.to_string(),
                )),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                    prompt.to_string(),
                )),
            ],
            params,
        )
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
