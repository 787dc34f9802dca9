use crate::config::settings::ApiSettings;
use crate::domain::ports::ChatClient;
use crate::utils::error::{AnalysisError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const ERROR_BODY_LIMIT: usize = 500;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    n: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI 相容的 chat completions 客戶端（Gemini 的 OpenAI 端點亦適用）
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&settings.base_url),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl ChatClient for OpenAiCompatClient {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            n: 1,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
        };

        tracing::info!("📡 Sending request to {} ({})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(AnalysisError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AnalysisError::EmptyCompletionError)?;

        tracing::info!("📨 Received response ({} chars)", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn settings(base_url: String) -> ApiSettings {
        ApiSettings {
            base_url,
            model: "gemini-2.0-flash".to_string(),
            api_key: "test-key".to_string(),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn test_completions_endpoint_handles_trailing_slash() {
        assert_eq!(
            completions_endpoint("https://generativelanguage.googleapis.com/v1beta/openai/"),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
        assert_eq!(
            completions_endpoint("http://localhost:8080/v1"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body(serde_json::json!({
                    "model": "gemini-2.0-flash",
                    "n": 1,
                    "messages": [
                        {"role": "system", "content": "You are an emotion analyst."},
                        {"role": "user", "content": "The delivery was late."}
                    ]
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": "```json\n{\"ok\": true}\n```"}}
                    ]
                }));
        });

        let client = OpenAiCompatClient::new(&settings(server.url("/v1/"))).unwrap();
        let content = client
            .complete("You are an emotion analyst.", "The delivery was late.")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(content, "```json\n{\"ok\": true}\n```");
    }

    #[tokio::test]
    async fn test_complete_reports_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("quota exceeded");
        });

        let client = OpenAiCompatClient::new(&settings(server.base_url())).unwrap();
        let err = client.complete("prompt", "text").await.unwrap_err();

        match err {
            AnalysisError::ApiStatusError { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_empty_completion() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"choices": []}));
        });

        let client = OpenAiCompatClient::new(&settings(server.base_url())).unwrap();
        let err = client.complete("prompt", "text").await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyCompletionError));
    }

    #[tokio::test]
    async fn test_complete_with_null_content_is_empty_completion() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": null}}]
                }));
        });

        let client = OpenAiCompatClient::new(&settings(server.base_url())).unwrap();
        let err = client.complete("prompt", "text").await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyCompletionError));
    }
}
