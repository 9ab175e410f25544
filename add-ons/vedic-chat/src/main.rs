//! Vedic chat: terminal host for the conversation engine.
//!
//! Usage:
//!   cargo run -p vedic-chat -- --name Asha --date 2000-05-15 --time 14:30 --location Delhi
//!
//! Prints the chart, then reads questions from stdin. `/chart` reprints the chart,
//! `/retry` regenerates it, `/quit` exits. Provider credentials come from the credential
//! file named in the config, falling back to environment variables (and `.env`).

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vedic_core::chart::ordinal;
use vedic_core::{
    BirthChart, BirthDetails, ConversationOrchestrator, Engine, EngineConfig,
    FileCredentialStore, Message, SendOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "vedic-chat", about = "Vedic birth chart and conversation in the terminal")]
struct Args {
    /// Name used in the greeting.
    #[arg(long)]
    name: String,

    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,

    /// Birth time, HH:MM (24h).
    #[arg(long)]
    time: String,

    #[arg(long, default_value = "")]
    location: String,

    /// Config file; defaults to $VEDIC_CONFIG or config/vedic.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[vedic-chat] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    }
    .context("loading engine config")?;

    let store = FileCredentialStore::new(&config.credentials_path);
    tracing::info!(path = %store.path().display(), "credential store ready");

    let conversation =
        ConversationOrchestrator::new(Arc::new(Engine::standard()), config, Arc::new(store));

    let details = BirthDetails::new(args.name, args.date, args.time, args.location);
    if details.parse_time().is_none() {
        tracing::warn!(time = %details.time, "birth time is not HH:MM; remote providers will be skipped");
    }

    let chart = conversation.submit_details(details).await;
    print_chart(&chart);
    for message in conversation.messages().await {
        print_message(&message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        match line {
            "" => {}
            "/quit" | "/exit" => break,
            "/chart" => match conversation.chart().await {
                Some(chart) => print_chart(&chart),
                None => println!("No chart yet."),
            },
            "/retry" => {
                if let Some(chart) = conversation.retry().await {
                    print_chart(&chart);
                    if let Some(greeting) = conversation.messages().await.first() {
                        print_message(greeting);
                    }
                }
            }
            question => match conversation.send(question).await {
                SendOutcome::Answered(reply) => print_message(&reply),
                SendOutcome::Superseded => {}
                SendOutcome::NotReady => println!("Enter your birth details first."),
            },
        }
        prompt();
    }
    Ok(())
}

fn prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_chart(chart: &BirthChart) {
    let asc = chart.ascendant();
    println!();
    println!("Ascendant: {} ({}), {}", asc, asc.color(), asc.ascendant_trait());
    for house in chart.houses() {
        let planets: Vec<String> = house
            .planets
            .iter()
            .map(|p| format!("{} {} {:.2}°", p.planet.glyph(), p.planet, p.degrees))
            .collect();
        println!(
            "  {:>4} house  {:<12} {}",
            ordinal(house.number),
            house.sign.name(),
            planets.join(", ")
        );
    }
    println!();
}

fn print_message(message: &Message) {
    println!("[{}] {}", source_tag(message), message.content);
    if let Some(planets) = &message.planetary_data {
        for p in planets {
            println!(
                "    {} {:<8} {:<12} {} house  {:.2}°",
                p.planet.glyph(),
                p.planet.name(),
                p.sign.name(),
                ordinal(p.house),
                p.degrees
            );
        }
    }
}

/// Provenance shown before an AI message; deterministic answers are flagged as fallback.
fn source_tag(message: &Message) -> String {
    match message.source {
        Some(s) if s.is_fallback() => format!("{}, offline fallback", s),
        Some(s) => s.to_string(),
        None => String::new(),
    }
}
