//! Conversation flow: greeting, stale turns, stale charts, reproducible answers.
//!
//! Run with: `cargo test -p vedic-core --test conversation_test`

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use vedic_core::{
    synthesize, BirthChart, BirthDetails, ChartProvider, ConversationOrchestrator, Engine,
    EngineConfig, Interpreter, InterpreterChain, MemoryCredentialStore, MessageType, Planet,
    ProviderChain, ProviderResult, ProviderSettings, SendOutcome, Sender, Source,
};

/// Answers instantly, except for questions mentioning "slow".
struct Sluggish;

#[async_trait]
impl Interpreter for Sluggish {
    fn name(&self) -> &'static str {
        "sluggish"
    }

    fn source(&self) -> Source {
        Source::HuggingFace
    }

    fn is_configured(&self, _settings: &ProviderSettings) -> bool {
        true
    }

    async fn interpret(
        &self,
        text: &str,
        _details: &BirthDetails,
        _chart: &BirthChart,
        _settings: &ProviderSettings,
    ) -> ProviderResult<String> {
        if text.contains("slow") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(format!("reading for: {}", text))
    }
}

/// Synthesizes, but takes its time for one particular name.
struct Dawdling;

#[async_trait]
impl ChartProvider for Dawdling {
    fn name(&self) -> &'static str {
        "dawdling"
    }

    fn is_configured(&self, _settings: &ProviderSettings) -> bool {
        true
    }

    async fn try_fetch(&self, details: &BirthDetails, _settings: &ProviderSettings) -> ProviderResult<BirthChart> {
        if details.name == "Slowpoke" {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(synthesize(details))
    }
}

fn conversation(engine: Engine) -> ConversationOrchestrator {
    ConversationOrchestrator::new(
        Arc::new(engine),
        EngineConfig::default(),
        Arc::new(MemoryCredentialStore::new()),
    )
}

fn details(name: &str, time: &str) -> BirthDetails {
    BirthDetails::new(
        name,
        NaiveDate::from_ymd_opt(2000, 5, 15).expect("valid date"),
        time,
        "Delhi",
    )
}

#[tokio::test]
async fn test_stale_answer_is_discarded() {
    let conversation = conversation(Engine::new(
        ProviderChain::offline(),
        InterpreterChain::new(vec![Box::new(Sluggish)]),
    ));
    conversation.submit_details(details("Asha", "14:30")).await;

    let (slow, quick) = tokio::join!(conversation.send("a slow question about love"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        conversation.send("a quick one about work").await
    });

    assert_eq!(slow, SendOutcome::Superseded);
    let quick = quick.message().expect("latest turn answered").clone();
    assert_eq!(quick.content, "reading for: a quick one about work");
    assert_eq!(quick.source, Some(Source::HuggingFace));

    let log = conversation.messages().await;
    let senders: Vec<Sender> = log.iter().map(|m| m.sender).collect();
    assert_eq!(senders, vec![Sender::Ai, Sender::User, Sender::User, Sender::Ai]);
    assert!(log.iter().all(|m| m.content != "reading for: a slow question about love"));
}

#[tokio::test]
async fn test_stale_chart_is_not_installed() {
    let conversation = conversation(Engine::new(
        ProviderChain::new(vec![Box::new(Dawdling)]),
        InterpreterChain::offline(),
    ));

    let slow = details("Slowpoke", "06:00");
    let fast = details("Asha", "14:30");
    let (slow_chart, fast_chart) = tokio::join!(conversation.submit_details(slow.clone()), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        conversation.submit_details(fast.clone()).await
    });

    assert_eq!(slow_chart, synthesize(&slow));
    assert_eq!(fast_chart, synthesize(&fast));
    assert_eq!(conversation.chart().await, Some(fast_chart));
    assert_eq!(conversation.details().await, Some(fast));

    let log = conversation.messages().await;
    assert_eq!(log.len(), 1, "only the newest greeting survives");
}

#[tokio::test]
async fn test_planets_question_lists_all_nine() {
    let conversation = ConversationOrchestrator::offline();
    let asha = details("Asha", "14:30");
    conversation.submit_details(asha.clone()).await;

    let reply = conversation
        .send("What about my planets?")
        .await
        .message()
        .expect("answered")
        .clone();
    assert_eq!(reply.kind, Some(MessageType::Planetary));
    assert_eq!(reply.source, Some(Source::Deterministic));
    assert_eq!(
        reply.content,
        "Based on your birth details (Mon May 15 2000), here are your planetary positions:"
    );
    let listed: Vec<Planet> = reply
        .planetary_data
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| p.planet)
        .collect();
    assert_eq!(listed, Planet::ALL.to_vec());
}

#[tokio::test]
async fn test_remedy_answer_is_reproducible() {
    let first = ConversationOrchestrator::offline();
    let second = ConversationOrchestrator::offline();
    let asha = details("Asha", "14:30");
    first.submit_details(asha.clone()).await;
    second.submit_details(asha).await;

    let a = first.send("Any remedy for me?").await;
    let b = second.send("Any remedy for me?").await;
    let (a, b) = (a.message().expect("answered"), b.message().expect("answered"));
    assert_eq!(a.content, b.content);
    assert_eq!(a.kind, Some(MessageType::Remedy));

    // asking again in the same conversation gives the same text
    let again = first.send("  any REMEDY for me?  ").await;
    assert_eq!(again.message().map(|m| m.content.as_str()), Some(a.content.as_str()));
}
