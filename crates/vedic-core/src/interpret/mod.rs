//! Remote interpretation: language-model providers tried before the deterministic
//! generator. Each configured interpreter gets at most one attempt per turn.

mod backend;
mod huggingface;
mod openai;
pub mod prompt;

pub use backend::BackendChat;
pub use huggingface::HuggingFace;
pub use openai::OpenAi;

use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::ProviderResult;
use crate::message::Source;
use async_trait::async_trait;
use tracing::{debug, info, warn};

#[async_trait]
pub trait Interpreter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Provenance label attached to messages this interpreter produced.
    fn source(&self) -> Source;

    fn is_configured(&self, settings: &ProviderSettings) -> bool;

    async fn interpret(
        &self,
        text: &str,
        details: &BirthDetails,
        chart: &BirthChart,
        settings: &ProviderSettings,
    ) -> ProviderResult<String>;
}

/// A successful remote interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub content: String,
    pub source: Source,
}

pub struct InterpreterChain {
    interpreters: Vec<Box<dyn Interpreter>>,
}

impl Default for InterpreterChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl InterpreterChain {
    /// Hugging Face, then OpenAI, then the self-hosted backend's chat route.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(HuggingFace), Box::new(OpenAi), Box::new(BackendChat)])
    }

    pub fn new(interpreters: Vec<Box<dyn Interpreter>>) -> Self {
        Self { interpreters }
    }

    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    pub fn any_configured(&self, settings: &ProviderSettings) -> bool {
        self.interpreters.iter().any(|i| i.is_configured(settings))
    }

    /// First configured interpreter that answers, or `None` when all are absent or fail.
    pub async fn interpret(
        &self,
        text: &str,
        details: &BirthDetails,
        chart: &BirthChart,
        settings: &ProviderSettings,
    ) -> Option<Interpretation> {
        for interpreter in &self.interpreters {
            if !interpreter.is_configured(settings) {
                debug!(target: "vedic::interpret", interpreter = interpreter.name(), "skipped: not configured");
                continue;
            }
            match interpreter.interpret(text, details, chart, settings).await {
                Ok(content) => {
                    info!(target: "vedic::interpret", interpreter = interpreter.name(), chars = content.len(), "remote interpretation received");
                    return Some(Interpretation {
                        content,
                        source: interpreter.source(),
                    });
                }
                Err(e) => {
                    warn!(target: "vedic::interpret", interpreter = interpreter.name(), error = %e, "interpreter failed; trying next");
                }
            }
        }
        None
    }
}
