//! Conversation orchestrator: the uninitialized → ready state machine driving one
//! conversation.
//!
//! State lives behind a mutex that is never held across a provider call. Every chart
//! transition bumps an epoch and every user turn bumps a turn counter; a result that
//! resolves after a newer transition or turn is discarded.

use crate::chart::BirthChart;
use crate::config::{EngineConfig, ProviderSettings};
use crate::credentials::{CredentialStore, MemoryCredentialStore};
use crate::details::BirthDetails;
use crate::engine::Engine;
use crate::message::Message;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Uninitialized,
    Ready {
        details: BirthDetails,
        chart: BirthChart,
    },
}

#[derive(Debug)]
struct ConversationState {
    phase: Phase,
    /// Last submitted details, kept for `retry`.
    submitted: Option<BirthDetails>,
    /// Serialized details of the installed chart.
    memo: Option<String>,
    messages: Vec<Message>,
    epoch: u64,
    turn: u64,
}

/// What became of a user message.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The answer was appended to the conversation.
    Answered(Message),
    /// A newer message or chart arrived first; the answer was dropped.
    Superseded,
    /// No chart yet; the message was not recorded.
    NotReady,
}

impl SendOutcome {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Answered(m) => Some(m),
            _ => None,
        }
    }
}

pub struct ConversationOrchestrator {
    engine: Arc<Engine>,
    config: EngineConfig,
    credentials: Arc<dyn CredentialStore>,
    state: Mutex<ConversationState>,
}

impl ConversationOrchestrator {
    pub fn new(engine: Arc<Engine>, config: EngineConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            engine,
            config,
            credentials,
            state: Mutex::new(ConversationState {
                phase: Phase::Uninitialized,
                submitted: None,
                memo: None,
                messages: Vec::new(),
                epoch: 0,
                turn: 0,
            }),
        }
    }

    /// Purely local conversation: no remote providers, empty credential store.
    pub fn offline() -> Self {
        Self::new(
            Arc::new(Engine::offline()),
            EngineConfig::default(),
            Arc::new(MemoryCredentialStore::new()),
        )
    }

    fn settings(&self) -> ProviderSettings {
        ProviderSettings::snapshot(&self.config, self.credentials.as_ref())
    }

    /// Enter the ready state for `details`: clear the conversation, obtain a chart and
    /// append the greeting. Details identical to the installed ones are a no-op that
    /// returns the current chart.
    pub async fn submit_details(&self, details: BirthDetails) -> BirthChart {
        let key = details.memo_key();
        let epoch = {
            let mut state = self.state.lock().await;
            if let (Some(memo), Phase::Ready { chart, .. }) = (&state.memo, &state.phase) {
                if *memo == key {
                    debug!(target: "vedic::conversation", "details unchanged; keeping chart");
                    return chart.clone();
                }
            }
            state.epoch += 1;
            state.turn += 1;
            state.phase = Phase::Uninitialized;
            state.memo = None;
            state.messages.clear();
            state.submitted = Some(details.clone());
            state.epoch
        };

        let settings = self.settings();
        let chart = self.engine.obtain_chart(&details, &settings).await;
        let greeting_text = format!("Hello, I'm {}", details.name);
        let greeting = self
            .engine
            .answer(&greeting_text, &details, &chart, &settings)
            .await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            debug!(target: "vedic::conversation", epoch, current = state.epoch, "chart superseded by newer details");
            return chart;
        }
        info!(
            target: "vedic::conversation",
            name = %details.name,
            date = %details.date,
            ascendant = %chart.ascendant(),
            "conversation ready"
        );
        state.memo = Some(key);
        state.phase = Phase::Ready {
            details,
            chart: chart.clone(),
        };
        state.messages.push(greeting);
        chart
    }

    /// Record `text`, answer it, and append the answer unless a newer turn or chart
    /// arrived while it was being produced.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let (details, chart, epoch, turn) = {
            let mut state = self.state.lock().await;
            let (details, chart) = match &state.phase {
                Phase::Ready { details, chart } => (details.clone(), chart.clone()),
                Phase::Uninitialized => {
                    warn!(target: "vedic::conversation", "message sent before birth details; ignored");
                    return SendOutcome::NotReady;
                }
            };
            state.messages.push(Message::user(text));
            state.turn += 1;
            (details, chart, state.epoch, state.turn)
        };

        let settings = self.settings();
        let reply = self.engine.answer(text, &details, &chart, &settings).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch || state.turn != turn {
            debug!(target: "vedic::conversation", turn, current = state.turn, "answer superseded; discarded");
            return SendOutcome::Superseded;
        }
        state.messages.push(reply.clone());
        SendOutcome::Answered(reply)
    }

    /// Re-run the transition for the last submitted details even if nothing changed.
    pub async fn retry(&self) -> Option<BirthChart> {
        let details = {
            let mut state = self.state.lock().await;
            state.memo = None;
            state.submitted.clone()?
        };
        info!(target: "vedic::conversation", "retrying chart for current details");
        Some(self.submit_details(details).await)
    }

    pub async fn is_ready(&self) -> bool {
        matches!(self.state.lock().await.phase, Phase::Ready { .. })
    }

    pub async fn chart(&self) -> Option<BirthChart> {
        match &self.state.lock().await.phase {
            Phase::Ready { chart, .. } => Some(chart.clone()),
            Phase::Uninitialized => None,
        }
    }

    pub async fn details(&self) -> Option<BirthDetails> {
        self.state.lock().await.submitted.clone()
    }

    /// Snapshot of the conversation log, oldest first.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.messages.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Sender, Source};
    use crate::synthesis::synthesize;
    use chrono::NaiveDate;

    fn asha() -> BirthDetails {
        BirthDetails::new(
            "Asha",
            NaiveDate::from_ymd_opt(2000, 5, 15).expect("valid date"),
            "14:30",
            "Delhi",
        )
    }

    #[tokio::test]
    async fn test_send_before_details_is_not_ready() {
        let conversation = ConversationOrchestrator::offline();
        assert_eq!(conversation.send("hello?").await, SendOutcome::NotReady);
        assert!(conversation.messages().await.is_empty());
        assert!(!conversation.is_ready().await);
        assert_eq!(conversation.retry().await, None);
    }

    #[tokio::test]
    async fn test_submit_installs_chart_and_greeting() {
        let conversation = ConversationOrchestrator::offline();
        let chart = conversation.submit_details(asha()).await;
        assert_eq!(chart, synthesize(&asha()));
        assert_eq!(conversation.chart().await, Some(chart));

        let messages = conversation.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Ai);
        assert_eq!(messages[0].source, Some(Source::Deterministic));
        assert!(messages[0].content.contains("This reading is based on your birth date"));
    }

    #[tokio::test]
    async fn test_identical_resubmission_keeps_conversation() {
        let conversation = ConversationOrchestrator::offline();
        conversation.submit_details(asha()).await;
        conversation.send("Any remedy for me?").await;
        assert_eq!(conversation.messages().await.len(), 3);

        conversation.submit_details(asha()).await;
        assert_eq!(conversation.messages().await.len(), 3);
    }

    #[tokio::test]
    async fn test_changed_details_restart_conversation() {
        let conversation = ConversationOrchestrator::offline();
        conversation.submit_details(asha()).await;
        conversation.send("career?").await;

        let mut later = asha();
        later.time = "18:05".into();
        let chart = conversation.submit_details(later.clone()).await;
        assert_eq!(chart, synthesize(&later));
        assert_eq!(conversation.messages().await.len(), 1);
        assert_eq!(conversation.details().await, Some(later));
    }

    #[tokio::test]
    async fn test_retry_regenerates_even_when_unchanged() {
        let conversation = ConversationOrchestrator::offline();
        conversation.submit_details(asha()).await;
        conversation.send("love?").await;
        let before = conversation.messages().await;
        assert_eq!(before.len(), 3);

        let chart = conversation.retry().await.expect("details were submitted");
        assert_eq!(chart, synthesize(&asha()));
        let after = conversation.messages().await;
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].content, before[0].content);
        assert_ne!(after[0].id, before[0].id);
    }

    #[tokio::test]
    async fn test_send_appends_user_then_ai() {
        let conversation = ConversationOrchestrator::offline();
        conversation.submit_details(asha()).await;
        let outcome = conversation.send("What about my planets?").await;
        let reply = outcome.message().expect("answered").clone();

        let messages = conversation.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].content, "What about my planets?");
        assert_eq!(messages[2], reply);
        assert_eq!(reply.planetary_data.as_deref(), Some(synthesize(&asha()).planets()));
    }
}
