//! Prokerala birth-chart API (primary commercial provider).
//!
//! Form-encoded POST with the client id/secret, Lahiri ayanamsa, the birth datetime and
//! the configured coordinates. Planet longitudes are absolute, so degrees are folded
//! into the sign.

use super::{check_status, map_reported_chart, ChartProvider, ReportedBody};
use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct Prokerala;

#[derive(Debug, Deserialize)]
struct ProkeralaChart {
    ascendant: Option<ProkeralaAscendant>,
    #[serde(default)]
    planets: BTreeMap<String, ProkeralaPlanet>,
}

#[derive(Debug, Deserialize)]
struct ProkeralaAscendant {
    sign: String,
}

#[derive(Debug, Deserialize)]
struct ProkeralaPlanet {
    sign: String,
    longitude: Option<f64>,
}

/// "YYYY-MM-DD HH:MM:00"
fn datetime_field(details: &BirthDetails) -> ProviderResult<String> {
    let (hour, minute) = details
        .parse_time()
        .ok_or_else(|| ProviderError::Malformed(format!("unparsable birth time '{}'", details.time)))?;
    Ok(format!("{} {:02}:{:02}:00", details.date.format("%Y-%m-%d"), hour, minute))
}

fn map_payload(details: &BirthDetails, payload: ProkeralaChart) -> ProviderResult<BirthChart> {
    let ascendant = payload
        .ascendant
        .ok_or_else(|| ProviderError::Malformed("missing ascendant".to_string()))?;
    let bodies = payload.planets.into_iter().map(|(name, planet)| ReportedBody {
        name,
        sign: planet.sign,
        degrees: planet.longitude,
    });
    map_reported_chart("prokerala", details, &ascendant.sign, bodies)
}

#[async_trait]
impl ChartProvider for Prokerala {
    fn name(&self) -> &'static str {
        "prokerala"
    }

    fn is_configured(&self, settings: &ProviderSettings) -> bool {
        settings.credentials.prokerala().is_some()
    }

    async fn try_fetch(
        &self,
        details: &BirthDetails,
        settings: &ProviderSettings,
    ) -> ProviderResult<BirthChart> {
        let (client_id, client_secret) = settings
            .credentials
            .prokerala()
            .ok_or(ProviderError::NotConfigured("prokerala"))?;
        let config = &settings.config;
        let form = [
            ("client_id", client_id.to_string()),
            ("client_secret", client_secret.to_string()),
            ("ayanamsa", "lahiri".to_string()),
            ("datetime", datetime_field(details)?),
            ("coordinates", format!("{},{}", config.latitude, config.longitude)),
        ];

        let res = settings
            .http_client()
            .post(&config.prokerala_url)
            .form(&form)
            .send()
            .await?;
        let body = check_status(res).await?.text().await?;
        let payload: ProkeralaChart = serde_json::from_str(&body)?;
        map_payload(details, payload)
    }
}
