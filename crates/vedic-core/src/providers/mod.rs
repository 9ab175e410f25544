//! **Provider chain**: obtain a chart from the first remote provider that answers,
//! falling back to deterministic synthesis.
//!
//! Each provider is a [`ChartProvider`] strategy. A provider without credentials is
//! skipped; one that fails (transport, non-2xx, bad payload) is logged and the next one
//! is tried. The chain itself cannot fail.

mod backend;
mod prokerala;
mod vedicrishi;

pub use backend::SelfHostedBackend;
pub(crate) use backend::{backend_endpoint, BackendDetails};
pub use prokerala::Prokerala;
pub use vedicrishi::VedicRishiAstro;

use crate::chart::{BirthChart, Placement, Planet, ZodiacSign};
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use crate::synthesis::{fallback_degrees, synthesize};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// A remote source of chart data.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// True when the credentials this provider needs are present.
    fn is_configured(&self, settings: &ProviderSettings) -> bool;

    /// One attempt, no retry.
    async fn try_fetch(
        &self,
        details: &BirthDetails,
        settings: &ProviderSettings,
    ) -> ProviderResult<BirthChart>;
}

/// Ordered provider strategies with deterministic synthesis as the last resort.
pub struct ProviderChain {
    providers: Vec<Box<dyn ChartProvider>>,
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProviderChain {
    /// Prokerala, then VedicRishiAstro, then a self-hosted backend.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Prokerala),
            Box::new(VedicRishiAstro),
            Box::new(SelfHostedBackend),
        ])
    }

    pub fn new(providers: Vec<Box<dyn ChartProvider>>) -> Self {
        Self { providers }
    }

    /// No remote providers: always synthesizes.
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn obtain_chart(&self, details: &BirthDetails, settings: &ProviderSettings) -> BirthChart {
        for provider in &self.providers {
            if !provider.is_configured(settings) {
                debug!(target: "vedic::providers", provider = provider.name(), "skipped: not configured");
                continue;
            }
            match provider.try_fetch(details, settings).await {
                Ok(chart) => {
                    info!(
                        target: "vedic::providers",
                        provider = provider.name(),
                        ascendant = %chart.ascendant(),
                        planets = chart.planets().len(),
                        "chart obtained from provider"
                    );
                    return chart;
                }
                Err(e) => {
                    warn!(target: "vedic::providers", provider = provider.name(), error = %e, "chart provider failed; trying next");
                }
            }
        }
        info!(target: "vedic::providers", "no provider produced a chart; using deterministic synthesis");
        synthesize(details)
    }
}

// -----------------------------------------------------------------------------
// Shared mapping contract
// -----------------------------------------------------------------------------

/// A body as reported by a provider, before validation.
#[derive(Debug, Clone)]
pub(crate) struct ReportedBody {
    pub name: String,
    pub sign: String,
    pub degrees: Option<f64>,
}

/// Map a provider payload into a chart. The ascendant must resolve; bodies outside the
/// nine modelled planets are skipped, as are bodies whose sign does not resolve. A
/// missing degree is replaced by a reproducible synthesized value.
pub(crate) fn map_reported_chart(
    provider: &'static str,
    details: &BirthDetails,
    ascendant: &str,
    bodies: impl IntoIterator<Item = ReportedBody>,
) -> ProviderResult<BirthChart> {
    let ascendant: ZodiacSign = ascendant
        .parse()
        .map_err(|e| ProviderError::Malformed(format!("ascendant: {}", e)))?;

    let mut placements = Vec::new();
    for body in bodies {
        let Ok(planet) = body.name.parse::<Planet>() else {
            debug!(target: "vedic::providers", provider, body = %body.name, "skipping unmodelled body");
            continue;
        };
        let Ok(sign) = body.sign.parse::<ZodiacSign>() else {
            warn!(target: "vedic::providers", provider, planet = %planet, sign = %body.sign, "skipping planet with unknown sign");
            continue;
        };
        let degrees = match body.degrees {
            Some(d) => d,
            None => {
                debug!(target: "vedic::providers", provider, planet = %planet, "no degree data; using synthesized degrees");
                fallback_degrees(details, planet)
            }
        };
        placements.push(Placement { planet, sign, degrees });
    }

    if placements.is_empty() {
        return Err(ProviderError::Malformed("no recognised planets".to_string()));
    }
    Ok(BirthChart::assemble(ascendant, placements))
}

/// Turn a non-2xx response into a [`ProviderError::Status`].
pub(crate) async fn check_status(res: reqwest::Response) -> ProviderResult<reqwest::Response> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    Err(ProviderError::Status { status, body })
}
