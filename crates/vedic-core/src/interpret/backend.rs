//! Self-hosted backend chat route (last interpreter). Shares `BACKEND_URL` with the
//! backend chart provider.

use super::Interpreter;
use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use crate::message::Source;
use crate::providers::{backend_endpoint, check_status, BackendDetails};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default)]
pub struct BackendChat;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    message: &'a str,
    birth_details: BackendDetails<'a>,
    birth_chart: &'a BirthChart,
}

/// The backend replies with a message-shaped object; only its text is used.
#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

fn reply_text(reply: ChatReply) -> ProviderResult<String> {
    reply
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

#[async_trait]
impl Interpreter for BackendChat {
    fn name(&self) -> &'static str {
        "backend chat"
    }

    fn source(&self) -> Source {
        Source::Backend
    }

    fn is_configured(&self, settings: &ProviderSettings) -> bool {
        settings.credentials.backend_url.is_some()
    }

    async fn interpret(
        &self,
        text: &str,
        details: &BirthDetails,
        chart: &BirthChart,
        settings: &ProviderSettings,
    ) -> ProviderResult<String> {
        let base = settings
            .credentials
            .backend_url
            .as_deref()
            .ok_or(ProviderError::NotConfigured("backend chat"))?;
        let body = ChatRequest {
            message: text,
            birth_details: BackendDetails::from_details(details)?,
            birth_chart: chart,
        };

        let res = settings
            .http_client()
            .post(backend_endpoint(base, &settings.config.backend_chat_path))
            .json(&body)
            .send()
            .await?;
        let raw = check_status(res).await?.text().await?;
        let reply: ChatReply = serde_json::from_str(&raw)?;
        reply_text(reply)
    }
}
