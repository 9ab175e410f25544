//! Self-hosted chart backend, enabled by the `BACKEND_URL` credential.
//!
//! Receives the birth details as JSON and answers with a chart-shaped document. Its
//! houses are ignored and rebuilt from the ascendant so the chart invariants hold
//! regardless of what the backend sent.
//!
//! The backend casts the chart from `date` alone, so `date` carries the full local
//! birth datetime (`2000-05-15T14:30:00`); `time` is sent alongside for reference.

use super::{check_status, map_reported_chart, ChartProvider, ReportedBody};
use crate::chart::BirthChart;
use crate::config::ProviderSettings;
use crate::details::BirthDetails;
use crate::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelfHostedBackend;

#[derive(Debug, Deserialize)]
struct BackendChart {
    ascendant: String,
    #[serde(default)]
    planets: Vec<BackendPlanet>,
}

#[derive(Debug, Deserialize)]
struct BackendPlanet {
    #[serde(alias = "name")]
    planet: String,
    sign: String,
    degrees: Option<f64>,
}

/// Birth details in the backend's wire form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BackendDetails<'a> {
    pub name: &'a str,
    pub date: String,
    pub time: &'a str,
    pub location: &'a str,
}

impl<'a> BackendDetails<'a> {
    pub(crate) fn from_details(details: &'a BirthDetails) -> ProviderResult<Self> {
        let (hour, minute) = details
            .parse_time()
            .ok_or_else(|| ProviderError::Malformed(format!("birth time {:?} is not HH:MM", details.time)))?;
        Ok(Self {
            name: &details.name,
            date: format!("{}T{:02}:{:02}:00", details.date.format("%Y-%m-%d"), hour, minute),
            time: &details.time,
            location: &details.location,
        })
    }
}

pub(crate) fn backend_endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn map_payload(details: &BirthDetails, payload: BackendChart) -> ProviderResult<BirthChart> {
    let bodies = payload.planets.into_iter().map(|p| ReportedBody {
        name: p.planet,
        sign: p.sign,
        degrees: p.degrees,
    });
    map_reported_chart("self-hosted backend", details, &payload.ascendant, bodies)
}

#[async_trait]
impl ChartProvider for SelfHostedBackend {
    fn name(&self) -> &'static str {
        "self-hosted backend"
    }

    fn is_configured(&self, settings: &ProviderSettings) -> bool {
        settings.credentials.backend_url.is_some()
    }

    async fn try_fetch(
        &self,
        details: &BirthDetails,
        settings: &ProviderSettings,
    ) -> ProviderResult<BirthChart> {
        let base = settings
            .credentials
            .backend_url
            .as_deref()
            .ok_or(ProviderError::NotConfigured("self-hosted backend"))?;
        let url = backend_endpoint(base, &settings.config.backend_chart_path);
        let request = BackendDetails::from_details(details)?;

        let res = settings.http_client().post(&url).json(&request).send().await?;
        let body = check_status(res).await?.text().await?;
        let payload: BackendChart = serde_json::from_str(&body)?;
        map_payload(details, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Planet, ZodiacSign};
    use chrono::NaiveDate;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            backend_endpoint("http://localhost:5000/", "/vedic/chart"),
            "http://localhost:5000/vedic/chart"
        );
        assert_eq!(backend_endpoint("http://h", "x"), "http://h/x");
    }

    #[test]
    fn test_wire_date_carries_birth_time() {
        let details = BirthDetails::new(
            "Asha",
            NaiveDate::from_ymd_opt(2000, 5, 15).expect("valid date"),
            "9:05",
            "Delhi",
        );
        let wire = BackendDetails::from_details(&details).expect("well-formed time");
        let json = serde_json::to_value(&wire).expect("serialize");
        assert_eq!(json["date"], "2000-05-15T09:05:00");
        assert_eq!(json["time"], "9:05");
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["location"], "Delhi");

        let late = BirthDetails { time: "late".into(), ..details };
        assert!(BackendDetails::from_details(&late).is_err());
    }

    #[test]
    fn test_backend_houses_are_rebuilt() {
        let details = BirthDetails::new(
            "Asha",
            NaiveDate::from_ymd_opt(2000, 5, 15).expect("valid date"),
            "14:30",
            "Delhi",
        );
        // house 7 disagrees with Aries rising + Taurus; the sign wins
        let payload: BackendChart = serde_json::from_value(serde_json::json!({
            "ascendant": "Aries",
            "houses": [],
            "planets": [{ "planet": "Venus", "house": 7, "sign": "Taurus", "degrees": 8.0 }]
        }))
        .expect("payload");

        let chart = map_payload(&details, payload).expect("maps");
        assert_eq!(chart.ascendant(), ZodiacSign::Aries);
        assert_eq!(chart.planet(Planet::Venus).map(|p| p.house), Some(2));
    }
}
