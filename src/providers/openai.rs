use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::cache::Cache;
use crate::core::suggest::SuggestionProvider;

const SYSTEM_PROMPT: &str = "You generate a list of ridiculous things people can buy \
based on a given amount of money. Include item names and quantities. Keep it fun and \
absurd! Return exactly 3 items, one per line, with bullet points.";

// OpenAiSuggestionProvider implementation for SuggestionProvider
pub struct OpenAiSuggestionProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    cache: Arc<Cache<String, Vec<String>>>,
}

impl OpenAiSuggestionProvider {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        cache: Arc<Cache<String, Vec<String>>>,
    ) -> Self {
        OpenAiSuggestionProvider {
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key,
            cache,
        }
    }
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl SuggestionProvider for OpenAiSuggestionProvider {
    #[instrument(
        name = "OpenAiSuggestionFetch",
        skip(self),
        fields(amount = %amount)
    )]
    async fn fetch_suggestions(&self, amount: &str) -> Result<Vec<String>> {
        if let Some(cached) = self.cache.get(&amount.to_string()).await {
            return Ok(cached);
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OpenAI API key is not set in the environment"))?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("Requesting purchase suggestions from {}", url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("I have {amount}. What are some ridiculous things I can buy?"),
                },
            ],
        };

        let client = reqwest::Client::builder().user_agent("fencost/1.0").build()?;
        let response = client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for amount: {} URL: {}", e, amount, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for amount: {}",
                response.status(),
                amount
            ));
        }

        let data = response.json::<ChatCompletionResponse>().await?;
        let content = data
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| anyhow!("No suggestions returned for amount: {}", amount))?;

        let lines: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        if lines.is_empty() {
            return Err(anyhow!("Empty suggestion content for amount: {}", amount));
        }

        self.cache.put(amount.to_string(), lines.clone()).await;

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> OpenAiSuggestionProvider {
        OpenAiSuggestionProvider::new(
            base_url,
            "gpt-4",
            Some("test-key".to_string()),
            Arc::new(Cache::new()),
        )
    }

    pub async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_suggestion_fetch() {
        let mock_response = r#"{
            "choices": [{
                "message": {
                    "content": "• 450 rubber ducks\n• 3 inflatable castles\n• 1 llama rental for a year"
                }
            }]
        }"#;

        let mock_server = create_mock_server(mock_response).await;
        let provider = provider(&mock_server.uri());

        let lines = provider.fetch_suggestions("9000.00").await.unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "• 450 rubber ducks");
        assert_eq!(lines[2], "• 1 llama rental for a year");
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4",
                "messages": [
                    { "role": "system" },
                    {
                        "role": "user",
                        "content": "I have 4500.00. What are some ridiculous things I can buy?"
                    }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"choices": [{"message": {"content": "• A single gold brick"}}]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri());
        let lines = provider.fetch_suggestions("4500.00").await.unwrap();
        assert_eq!(lines, vec!["• A single gold brick"]);
    }

    #[tokio::test]
    async fn test_blank_lines_are_dropped() {
        let mock_response = r#"{
            "choices": [{
                "message": {
                    "content": "• One moon rock\n\n   \n• Two moon rocks"
                }
            }]
        }"#;

        let mock_server = create_mock_server(mock_response).await;
        let provider = provider(&mock_server.uri());

        let lines = provider.fetch_suggestions("100.00").await.unwrap();
        assert_eq!(lines, vec!["• One moon rock", "• Two moon rocks"]);
    }

    #[tokio::test]
    async fn test_no_choices_in_response() {
        let mock_server = create_mock_server(r#"{"choices": []}"#).await;
        let provider = provider(&mock_server.uri());

        let result = provider.fetch_suggestions("100.00").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No suggestions returned for amount: 100.00"
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri());
        let result = provider.fetch_suggestions("100.00").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for amount: 100.00"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let provider = OpenAiSuggestionProvider::new(
            "http://localhost:1",
            "gpt-4",
            None,
            Arc::new(Cache::new()),
        );

        let result = provider.fetch_suggestions("100.00").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("API key is not set")
        );
    }

    #[tokio::test]
    async fn test_repeated_amount_hits_cache() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"choices": [{"message": {"content": "• A hot air balloon"}}]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri());
        let first = provider.fetch_suggestions("250.00").await.unwrap();
        let second = provider.fetch_suggestions("250.00").await.unwrap();
        assert_eq!(first, second);
    }
}
