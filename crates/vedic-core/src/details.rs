//! Birth details supplied by the host: the single input every chart and answer is
//! derived from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Who was born, when, and where. `time` is a 24h "HH:MM" string and is kept verbatim;
/// a malformed time is a caller error that the core does not defend against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthDetails {
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
}

impl BirthDetails {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            time: time.into(),
            location: location.into(),
        }
    }

    /// Hour and minute, for providers that need numeric fields.
    pub fn parse_time(&self) -> Option<(u32, u32)> {
        let (hour, minute) = self.time.trim().split_once(':')?;
        let hour: u32 = hour.trim().parse().ok()?;
        let minute: u32 = minute.trim().parse().ok()?;
        (hour < 24 && minute < 60).then_some((hour, minute))
    }

    /// Date as shown in generated text, e.g. "Mon May 15 2000".
    pub fn display_date(&self) -> String {
        self.date.format("%a %b %d %Y").to_string()
    }

    /// Serialized form used to detect whether resubmitted details actually changed.
    pub(crate) fn memo_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!("{}|{}|{}|{}", self.name, self.date, self.time, self.location)
        })
    }
}
