//! Prompt builders for remote interpreters.

use crate::chart::{ordinal, BirthChart};
use crate::details::BirthDetails;

/// Long-form prompt for instruction-tuned inference models; one planet per line.
pub fn vedic_prompt(text: &str, details: &BirthDetails, chart: &BirthChart) -> String {
    let positions = chart
        .planets()
        .iter()
        .map(|p| format!("{} in {} in the {} house ({:.2}°)", p.planet, p.sign, ordinal(p.house), p.degrees))
        .collect::<Vec<_>>()
        .join("\n- ");

    format!(
        "As a Vedic astrology expert, analyze this birth chart for {name} born on {date} at {time} in {location}.\n\
         \n\
         Birth chart details:\n\
         - Ascendant: {ascendant}\n\
         - Planet positions: \n\
         - {positions}\n\
         \n\
         Question: {text}\n\
         \n\
         Please provide a detailed Vedic astrology interpretation based on these planetary positions.",
        name = details.name,
        date = details.display_date(),
        time = details.time,
        location = details.location,
        ascendant = chart.ascendant(),
        positions = positions,
        text = text,
    )
}

/// Compact prompt for chat-completion models; planets comma-separated.
pub fn chat_prompt(text: &str, details: &BirthDetails, chart: &BirthChart) -> String {
    let positions = chart
        .planets()
        .iter()
        .map(|p| format!("{} in {} ({} house)", p.planet, p.sign, ordinal(p.house)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "I'm analyzing a birth chart for {name} born on {date} at {time} in {location}.\n\
         \n\
         The ascendant is {ascendant}, and the planets are positioned as follows:\n\
         {positions}\n\
         \n\
         The question is: {text}\n\
         \n\
         Please provide a detailed astrological interpretation based on Vedic astrology principles.",
        name = details.name,
        date = details.display_date(),
        time = details.time,
        location = details.location,
        ascendant = chart.ascendant(),
        positions = positions,
        text = text,
    )
}
