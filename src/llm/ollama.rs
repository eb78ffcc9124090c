use crate::llm::client::{GenerationParams, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    models::ModelOptions,
    Ollama,
};

const DEFAULT_OLLAMA_PORT: u16 = 11434;

pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String) -> Result<Self> {
        let url = reqwest::Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid Ollama URL '{}': {}", base_url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| AppError::Config(format!("Ollama URL '{}' has no host", base_url)))?;
        let port = url.port().unwrap_or(DEFAULT_OLLAMA_PORT);

        let client = Ollama::new(format!("{}://{}", url.scheme(), host), port);

        Ok(Self { client, model })
    }

    async fn chat(&self, messages: Vec<ChatMessage>, params: &GenerationParams) -> Result<String> {
        let mut request = ChatMessageRequest::new(self.model.clone(), messages);
        if let Some(temperature) = params.temperature {
            request = request.options(ModelOptions::default().temperature(temperature));
        }

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::LLM(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate_with_params(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        self.chat(
            vec![
                ChatMessage::system(system.to_string()),
                ChatMessage::user(prompt.to_string()),
            ],
            params,
        )
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
