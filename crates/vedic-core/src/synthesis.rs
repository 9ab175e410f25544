//! Deterministic chart synthesis: the terminal fallback of the provider chain.
//!
//! The ascendant is the first draw of the base seed; each planet gets its own derived
//! generator (`base + planet name`) whose first draw picks a house and second draw the
//! in-sign degrees. Total over any input.

use crate::chart::{BirthChart, Placement, Planet, ZodiacSign};
use crate::details::BirthDetails;
use crate::seeded::{chart_seed, SeededRandom};
use tracing::debug;

pub fn synthesize(details: &BirthDetails) -> BirthChart {
    let mut base = SeededRandom::new(&chart_seed(details));
    let ascendant = ZodiacSign::from_index(base.next_index(12));

    let placements = Planet::ALL.into_iter().map(|planet| {
        let mut rng = base.derive(planet.name());
        let house = rng.next_index(12) + 1;
        let degrees = rng.next_f64() * 30.0;
        Placement {
            planet,
            sign: ascendant.offset(house - 1),
            degrees,
        }
    });
    let chart = BirthChart::assemble(ascendant, placements);

    debug!(
        target: "vedic::synthesis",
        seed = %base.seed(),
        ascendant = %chart.ascendant(),
        "synthesized chart"
    );
    chart
}

/// Reproducible in-sign degrees for a provider that placed `planet` without degree data.
pub fn fallback_degrees(details: &BirthDetails, planet: Planet) -> f64 {
    SeededRandom::new(&chart_seed(details))
        .derive(planet.name())
        .derive("-degrees")
        .next_f64()
        * 30.0
}
