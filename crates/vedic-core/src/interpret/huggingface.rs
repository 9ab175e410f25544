//! Hugging Face inference API (primary interpreter).

use super::prompt::vedic_prompt;
use super::Interpreter;
use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use crate::message::Source;
use crate::providers::check_status;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct HuggingFace;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
}

/// Text-generation endpoints answer `[{generated_text}]`, `{generated_text}` or a bare
/// string depending on the model.
fn extract_generated_text(value: &Value) -> ProviderResult<String> {
    let text = match value {
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("generated_text"))
            .and_then(Value::as_str),
        Value::Object(_) => value.get("generated_text").and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
    .ok_or_else(|| ProviderError::Malformed("no generated_text in response".to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[async_trait]
impl Interpreter for HuggingFace {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn source(&self) -> Source {
        Source::HuggingFace
    }

    fn is_configured(&self, settings: &ProviderSettings) -> bool {
        settings.credentials.huggingface_token.is_some()
    }

    async fn interpret(
        &self,
        text: &str,
        details: &BirthDetails,
        chart: &BirthChart,
        settings: &ProviderSettings,
    ) -> ProviderResult<String> {
        let token = settings
            .credentials
            .huggingface_token
            .as_deref()
            .ok_or(ProviderError::NotConfigured("huggingface"))?;
        let prompt = vedic_prompt(text, details, chart);
        let body = InferenceRequest {
            inputs: &prompt,
            parameters: InferenceParameters {
                max_new_tokens: 800,
                temperature: 0.7,
                top_p: 0.9,
                do_sample: true,
            },
        };

        let res = settings
            .http_client()
            .post(&settings.config.huggingface_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let raw = check_status(res).await?.text().await?;
        let value: Value = serde_json::from_str(&raw)?;
        extract_generated_text(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_all_response_shapes() {
        assert_eq!(
            extract_generated_text(&json!([{ "generated_text": " Jupiter favours you. " }])).expect("array"),
            "Jupiter favours you."
        );
        assert_eq!(
            extract_generated_text(&json!({ "generated_text": "Saturn tests you." })).expect("object"),
            "Saturn tests you."
        );
        assert_eq!(extract_generated_text(&json!("Plain text.")).expect("string"), "Plain text.");
    }

    #[test]
    fn test_extract_rejects_unusable_responses() {
        assert!(matches!(
            extract_generated_text(&json!({ "error": "Model is loading" })),
            Err(ProviderError::Malformed(_))
        ));
        assert!(matches!(
            extract_generated_text(&json!([{ "generated_text": "   " }])),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(extract_generated_text(&json!(42)).is_err());
    }
}
