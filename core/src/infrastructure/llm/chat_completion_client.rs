use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    prompt::ports::LLMClient,
};

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

impl ChatCompletionClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout + Duration::from_secs(1))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build LLM HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        })
    }

    fn request(&self, system_prompt: String, user_prompt: String) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt,
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    async fn call_chat_api(&self, request: ChatRequest<'_>) -> Result<String, CoreError> {
        if self.api_key.is_empty() {
            return Err(CoreError::ExternalServiceError(
                "LLM API key is not configured".to_string(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("LLM API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("LLM API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse LLM response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        first_choice(chat_response)
    }
}

fn first_choice(response: ChatResponse) -> Result<String, CoreError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
}

impl LLMClient for ChatCompletionClient {
    async fn generate_lesson(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<String, CoreError> {
        let request = self.request(system_prompt, user_prompt);
        self.call_chat_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LLMConfig {
        LLMConfig {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1/".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    #[test]
    fn request_carries_system_and_user_messages() {
        let client = ChatCompletionClient::new(&config()).unwrap();
        let body = serde_json::to_value(
            client.request("You are an educator".to_string(), "Explain loops".to_string()),
        )
        .unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Explain loops");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn first_choice_content_is_the_lesson() {
        let response: ChatResponse = serde_json::from_str(
            r###"{"choices":[{"message":{"role":"assistant","content":"## Loops"}}]}"###,
        )
        .unwrap();
        assert_eq!(first_choice(response).unwrap(), "## Loops");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice(empty),
            Err(CoreError::ExternalServiceError(_))
        ));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_a_request() {
        let client = ChatCompletionClient::new(&config()).unwrap();
        let error = client
            .generate_lesson("system".to_string(), "Explain loops".to_string())
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::ExternalServiceError(_)));
    }
}
