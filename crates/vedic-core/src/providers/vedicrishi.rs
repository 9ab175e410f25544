//! VedicRishiAstro horoscope API (secondary commercial provider).
//!
//! JSON POST authenticated with HTTP Basic (user id / api key). The response reports
//! in-sign degrees directly, but may omit them.

use super::{check_status, map_reported_chart, ChartProvider, ReportedBody};
use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default)]
pub struct VedicRishiAstro;

#[derive(Debug, Serialize, PartialEq)]
struct HoroscopeRequest {
    day: u32,
    month: u32,
    year: i32,
    hour: u32,
    min: u32,
    lat: f64,
    lon: f64,
    tzone: f64,
}

#[derive(Debug, Deserialize)]
struct HoroscopeResponse {
    ascendant: String,
    #[serde(default)]
    planets: Vec<HoroscopePlanet>,
}

#[derive(Debug, Deserialize)]
struct HoroscopePlanet {
    name: String,
    sign: String,
    #[serde(rename = "signDegree", alias = "normDegree", default)]
    sign_degree: Option<f64>,
}

fn build_request(details: &BirthDetails, settings: &ProviderSettings) -> ProviderResult<HoroscopeRequest> {
    let (hour, min) = details
        .parse_time()
        .ok_or_else(|| ProviderError::Malformed(format!("unparsable birth time '{}'", details.time)))?;
    Ok(HoroscopeRequest {
        day: details.date.day(),
        month: details.date.month(),
        year: details.date.year(),
        hour,
        min,
        lat: settings.config.latitude,
        lon: settings.config.longitude,
        tzone: settings.config.timezone_offset,
    })
}

fn map_payload(details: &BirthDetails, payload: HoroscopeResponse) -> ProviderResult<BirthChart> {
    let bodies = payload.planets.into_iter().map(|planet| ReportedBody {
        name: planet.name,
        sign: planet.sign,
        degrees: planet.sign_degree,
    });
    map_reported_chart("vedicrishiastro", details, &payload.ascendant, bodies)
}

#[async_trait]
impl ChartProvider for VedicRishiAstro {
    fn name(&self) -> &'static str {
        "vedicrishiastro"
    }

    fn is_configured(&self, settings: &ProviderSettings) -> bool {
        settings.credentials.vedicrishi().is_some()
    }

    async fn try_fetch(
        &self,
        details: &BirthDetails,
        settings: &ProviderSettings,
    ) -> ProviderResult<BirthChart> {
        let (user_id, api_key) = settings
            .credentials
            .vedicrishi()
            .ok_or(ProviderError::NotConfigured("vedicrishiastro"))?;
        let request = build_request(details, settings)?;

        let res = settings
            .http_client()
            .post(&settings.config.vedicrishi_url)
            .basic_auth(user_id, Some(api_key))
            .json(&request)
            .send()
            .await?;
        let body = check_status(res).await?.text().await?;
        let payload: HoroscopeResponse = serde_json::from_str(&body)?;
        map_payload(details, payload)
    }
}
