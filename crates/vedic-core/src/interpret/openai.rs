//! OpenAI chat completions (secondary interpreter).

use super::prompt::chat_prompt;
use super::Interpreter;
use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use crate::message::Source;
use crate::providers::check_status;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a Vedic astrology expert.";

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAi;

// OpenAI-compatible request/response
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

fn first_content(response: ChatResponse) -> ProviderResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

#[async_trait]
impl Interpreter for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn source(&self) -> Source {
        Source::OpenAi
    }

    fn is_configured(&self, settings: &ProviderSettings) -> bool {
        settings.credentials.openai_api_key.is_some()
    }

    async fn interpret(
        &self,
        text: &str,
        details: &BirthDetails,
        chart: &BirthChart,
        settings: &ProviderSettings,
    ) -> ProviderResult<String> {
        let api_key = settings
            .credentials
            .openai_api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("openai"))?;
        let body = ChatRequest {
            model: settings.config.openai_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: chat_prompt(text, details, chart),
                },
            ],
            temperature: Some(0.7),
            max_tokens: Some(800),
        };

        let res = settings
            .http_client()
            .post(&settings.config.openai_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let raw = check_status(res).await?.text().await?;
        let response: ChatResponse = serde_json::from_str(&raw)?;
        first_content(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: serde_json::Value) -> ChatResponse {
        serde_json::from_value(raw).expect("chat response")
    }

    #[test]
    fn test_first_choice_content() {
        let response = parse(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  Mars energises you.  " } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }));
        assert_eq!(first_content(response).expect("content"), "Mars energises you.");
    }

    #[test]
    fn test_missing_content_is_empty_response() {
        assert!(matches!(
            first_content(parse(serde_json::json!({ "choices": [] }))),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            first_content(parse(serde_json::json!({ "choices": [{ "message": { "content": null } }] }))),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            }],
            temperature: Some(0.7),
            max_tokens: None,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["messages"][0]["content"], "You are a Vedic astrology expert.");
        assert!(json.get("max_tokens").is_none());
    }
}
