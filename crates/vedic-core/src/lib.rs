//! # vedic-core
//!
//! Birth-chart and conversation engine that always answers, with or without network
//! providers.
//!
//! ```text
//! BirthDetails ──► ProviderChain ──► BirthChart ──► classify ──► Interpreters? ──► Message
//!                   prokerala           │                         huggingface
//!                   vedicrishiastro     │                         openai
//!                   self-hosted         │                         backend chat
//!                                       │                              │ (none / failed)
//!                   └─► synthesize ─────┘                              └─► generate
//! ```
//!
//! Every remote step is optional and gated on credentials. The deterministic path
//! (seeded synthesis and template generation) is total and reproducible: the same
//! details and question always give the same chart and the same answer.

pub mod chart;
pub mod classifier;
pub mod config;
pub mod credentials;
pub mod details;
pub mod engine;
pub mod error;
pub mod generator;
pub mod interpret;
pub mod lexicon;
pub mod message;
pub mod orchestrator;
pub mod providers;
pub mod seeded;
pub mod synthesis;

pub use chart::{BirthChart, HouseData, Placement, Planet, PlanetaryPosition, ZodiacSign};
pub use classifier::{classify, ResponseCategory};
pub use config::{EngineConfig, ProviderSettings};
pub use credentials::{keys, CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
pub use details::BirthDetails;
pub use engine::Engine;
pub use error::{ConfigError, ConfigResult, ProviderError, ProviderResult};
pub use generator::generate;
pub use interpret::{BackendChat, HuggingFace, Interpretation, Interpreter, InterpreterChain, OpenAi};
pub use message::{Message, MessageType, Sender, Source};
pub use orchestrator::{ConversationOrchestrator, SendOutcome};
pub use providers::{ChartProvider, Prokerala, ProviderChain, SelfHostedBackend, VedicRishiAstro};
pub use seeded::SeededRandom;
pub use synthesis::synthesize;

/// Chart for `details` from the first configured provider that answers, else synthesized.
pub async fn obtain_chart(details: &BirthDetails, settings: &ProviderSettings) -> BirthChart {
    Engine::standard().obtain_chart(details, settings).await
}

/// Answer `text` about `chart`, remotely when an interpreter is configured and succeeds,
/// else deterministically.
pub async fn answer(
    text: &str,
    details: &BirthDetails,
    chart: &BirthChart,
    settings: &ProviderSettings,
) -> Message {
    Engine::standard().answer(text, details, chart, settings).await
}
