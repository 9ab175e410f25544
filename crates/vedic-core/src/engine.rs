//! The two host entry points, bound to a concrete set of providers.

use crate::chart::BirthChart;
use crate::classifier::{classify, ResponseCategory};
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::generator::generate;
use crate::interpret::InterpreterChain;
use crate::message::{Message, MessageType};
use crate::providers::ProviderChain;
use tracing::debug;

/// Chart providers plus interpreters. Both operations are total.
#[derive(Default)]
pub struct Engine {
    charts: ProviderChain,
    interpreters: InterpreterChain,
}

impl Engine {
    pub fn new(charts: ProviderChain, interpreters: InterpreterChain) -> Self {
        Self {
            charts,
            interpreters,
        }
    }

    /// Every remote provider the crate ships, each gated on its credentials.
    pub fn standard() -> Self {
        Self::new(ProviderChain::standard(), InterpreterChain::standard())
    }

    /// No remote providers at all; never touches the network.
    pub fn offline() -> Self {
        Self::new(ProviderChain::offline(), InterpreterChain::offline())
    }

    pub async fn obtain_chart(&self, details: &BirthDetails, settings: &ProviderSettings) -> BirthChart {
        self.charts.obtain_chart(details, settings).await
    }

    /// Classify `text`, try the interpreters unless the answer is a planetary listing,
    /// and fall back to the deterministic generator.
    pub async fn answer(
        &self,
        text: &str,
        details: &BirthDetails,
        chart: &BirthChart,
        settings: &ProviderSettings,
    ) -> Message {
        let category = classify(text);
        debug!(target: "vedic::engine", category = %category, "classified question");

        // planetary answers are a fixed listing; remote text would be discarded
        if category != ResponseCategory::Planetary {
            if let Some(found) = self.interpreters.interpret(text, details, chart, settings).await {
                let kind = if category == ResponseCategory::Remedy {
                    MessageType::Remedy
                } else {
                    MessageType::Text
                };
                return Message::ai(found.content, found.source).with_kind(kind);
            }
        }
        generate(category, text, chart, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, ProviderResult};
    use crate::interpret::Interpreter;
    use crate::message::Source;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        calls: Arc<AtomicUsize>,
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl Interpreter for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn source(&self) -> Source {
            Source::OpenAi
        }

        fn is_configured(&self, _settings: &ProviderSettings) -> bool {
            true
        }

        async fn interpret(&self, _: &str, _: &BirthDetails, _: &BirthChart, _: &ProviderSettings) -> ProviderResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.map(str::to_string).ok_or(ProviderError::EmptyResponse)
        }
    }

    fn engine(reply: Option<&'static str>) -> (Engine, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let interpreters = InterpreterChain::new(vec![Box::new(Counting {
            calls: Arc::clone(&calls),
            reply,
        })]);
        (Engine::new(ProviderChain::offline(), interpreters), calls)
    }

    fn asha() -> BirthDetails {
        BirthDetails::new(
            "Asha",
            NaiveDate::from_ymd_opt(2000, 5, 15).expect("valid date"),
            "14:30",
            "Delhi",
        )
    }

    #[tokio::test]
    async fn test_remote_remedy_keeps_remedy_type() {
        let (engine, calls) = engine(Some("Chant on Saturdays."));
        let settings = ProviderSettings::offline();
        let chart = engine.obtain_chart(&asha(), &settings).await;

        let msg = engine.answer("any remedy?", &asha(), &chart, &settings).await;
        assert_eq!(msg.content, "Chant on Saturdays.");
        assert_eq!(msg.kind, Some(MessageType::Remedy));
        assert_eq!(msg.source, Some(Source::OpenAi));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_planetary_skips_interpreters() {
        let (engine, calls) = engine(Some("ignored"));
        let settings = ProviderSettings::offline();
        let chart = engine.obtain_chart(&asha(), &settings).await;

        let msg = engine.answer("where are my planets", &asha(), &chart, &settings).await;
        assert_eq!(msg.kind, Some(MessageType::Planetary));
        assert_eq!(msg.source, Some(Source::Deterministic));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_interpreter_failure_falls_back() {
        let (engine, calls) = engine(None);
        let settings = ProviderSettings::offline();
        let chart = engine.obtain_chart(&asha(), &settings).await;

        let msg = engine.answer("my career", &asha(), &chart, &settings).await;
        assert_eq!(msg.source, Some(Source::Deterministic));
        let expected = generate(ResponseCategory::Career, "my career", &chart, &asha());
        assert_eq!(msg.content, expected.content);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
