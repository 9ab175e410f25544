//! Deterministic answer generation.
//!
//! One integer draw `v` in 0..100 is taken from the response seed (chart seed plus the
//! normalized question). `v % 5` picks the template and `v` plus small offsets indexes
//! every flavour vocabulary, so slots in one answer are correlated while answers to
//! different questions vary. Chart facts come from the chart itself; a planet missing
//! from a provider chart renders a neutral placeholder rather than failing.

use crate::chart::{ordinal, BirthChart, Planet};
use crate::classifier::ResponseCategory;
use crate::details::BirthDetails;
use crate::lexicon::{self, pick};
use crate::message::{Message, MessageType, Source};
use crate::seeded::{response_seed, SeededRandom};
use tracing::debug;

/// Everything a template may interpolate.
struct Slots<'a> {
    v: usize,
    chart: &'a BirthChart,
    details: &'a BirthDetails,
}

type Template = fn(&Slots<'_>) -> String;

impl Slots<'_> {
    fn sign(&self, planet: Planet) -> &'static str {
        self.chart
            .planet(planet)
            .map(|p| p.sign.name())
            .unwrap_or("an unplaced")
    }

    fn house(&self, planet: Planet) -> String {
        self.chart
            .planet(planet)
            .map(|p| ordinal(p.house))
            .unwrap_or_else(|| "unplaced".to_string())
    }

    fn house_number(&self, planet: Planet) -> Option<u8> {
        self.chart.planet(planet).map(|p| p.house)
    }

    fn planets_in(&self, houses: &[u8]) -> String {
        match self.chart.count_in_houses(houses) {
            1 => "1 planet".to_string(),
            n => format!("{} planets", n),
        }
    }

    fn date(&self) -> String {
        self.details.display_date()
    }

    fn either(&self, even: &'static str, odd: &'static str) -> &'static str {
        if self.v % 2 == 0 {
            even
        } else {
            odd
        }
    }
}

const REMEDY: [Template; 5] = [
    |s| {
        format!(
            "For someone born on {} with {} ascendant, I recommend: 1) Wear a gemstone associated with your ascendant lord. 2) Recite mantras for benefic planets in your chart. 3) Practice meditation on {}.",
            s.date(),
            s.chart.ascendant(),
            pick(&lexicon::DAYS_OF_WEEK, s.v % 7)
        )
    },
    |s| {
        format!(
            "With {} Moon and {} Sun, these remedies may help: 1) Offer water to a {}. 2) Donate {} on {}. 3) Recite {}.",
            s.sign(Planet::Moon),
            s.sign(Planet::Sun),
            pick(&lexicon::PLANTS, s.v % 5),
            pick(&lexicon::FOODS, s.v % 8),
            pick(&lexicon::DAYS_OF_WEEK, (s.v + 2) % 7),
            pick(&lexicon::MANTRAS, s.v % 9)
        )
    },
    |s| {
        format!(
            "Your chart shows {} in the 8th house, suggesting these remedies: 1) Practice {}. 2) Feed {}. 3) Wear a {} colored thread on your wrist.",
            s.planets_in(&[8]),
            pick(&lexicon::YOGA_TYPES, s.v % 6),
            pick(&lexicon::ANIMALS, s.v % 7),
            pick(&lexicon::COLORS, s.v % 10)
        )
    },
    |s| {
        format!(
            "For your {} house Saturn, try: 1) Serve the elderly or less fortunate on Saturdays. 2) Donate dark grains like sesame. 3) Recite Hanuman Chalisa for protection from Saturn's challenges.",
            s.house(Planet::Saturn)
        )
    },
    |s| {
        format!(
            "With Jupiter in {}, these remedies will be beneficial: 1) Feed dogs on Thursdays. 2) Wear yellow clothing more often. 3) Donate to educational institutions to strengthen Jupiter's positive aspects.",
            s.sign(Planet::Jupiter)
        )
    },
];

const CAREER: [Template; 5] = [
    |s| {
        format!(
            "With your {} Sun in the {} house, you have natural talents in leadership, creative fields, and positions of authority. Your {} Mars suggests you work well under pressure and can excel in competitive environments.",
            s.sign(Planet::Sun),
            s.house(Planet::Sun),
            s.sign(Planet::Mars)
        )
    },
    |s| {
        let tenth = if s.chart.count_in_houses(&[10]) > 0 {
            "10th"
        } else {
            "neutral"
        };
        format!(
            "Your 10th house ruler is in the {} house, indicating a career in {}. The aspects to your 10th house suggest you'll find success through {}.",
            tenth,
            pick(&lexicon::CAREER_FIELDS, s.v % 12),
            pick(&lexicon::CAREER_APPROACHES, s.v % 8)
        )
    },
    |s| {
        format!(
            "Your chart shows a strong connection between the 2nd house of wealth and the 10th house of career. This suggests financial success through {}. Your {} Mercury gives you excellent communication skills useful in your profession.",
            pick(&lexicon::FINANCIAL_FIELDS, s.v % 9),
            s.sign(Planet::Mercury)
        )
    },
    |s| {
        format!(
            "The placement of Saturn in your {} house suggests you may face some initial challenges in your career, but will achieve stability and recognition after the age of {}. Focus on fields related to {}.",
            s.house(Planet::Saturn),
            28 + s.v % 7,
            pick(&lexicon::CAREER_FIELDS, (s.v + 4) % 12)
        )
    },
    |s| {
        format!(
            "With Jupiter in your {} house, you're likely to excel in careers involving {}. Your chart suggests multiple sources of income, with substantial growth around the age of {}.",
            s.house(Planet::Jupiter),
            pick(&lexicon::CAREER_FIELDS, (s.v + 7) % 12),
            32 + s.v % 10
        )
    },
];

const RELATIONSHIP: [Template; 5] = [
    |s| {
        let seventh = s
            .chart
            .house(7)
            .map(|h| h.sign.name())
            .unwrap_or("an unread sign");
        format!(
            "With Venus in your {} house in {}, you are attracted to partners who are {} and {}. Your 7th house in {} suggests a partner who is {}.",
            s.house(Planet::Venus),
            s.sign(Planet::Venus),
            pick(&lexicon::PERSONALITY_TRAITS, s.v % 15),
            pick(&lexicon::PERSONALITY_TRAITS, (s.v + 5) % 15),
            seventh,
            pick(&lexicon::PERSONALITY_TRAITS, (s.v + 10) % 15)
        )
    },
    |s| {
        format!(
            "Your {} Mars indicates passion and attraction to {} individuals. Marriage potential shows around age {}, with a partner who complements your {} Moon emotional needs.",
            s.sign(Planet::Mars),
            pick(&lexicon::PERSONALITY_TRAITS, (s.v + 3) % 15),
            24 + s.v % 12,
            s.sign(Planet::Moon)
        )
    },
    |s| {
        format!(
            "The ruler of your 7th house is in the {} house, suggesting you'll meet significant partners through {}. Your chart indicates {} significant relationships, with the most fulfilling one coming after some life lessons.",
            ordinal((s.v % 12) as u8 + 1),
            pick(&lexicon::MEETING_VENUES, s.v % 10),
            1 + s.v % 3
        )
    },
    |s| {
        format!(
            "With Jupiter aspecting your Venus, you seek meaning and growth in relationships. Your chart indicates a partner who is {} and brings {} to your life. Family support for your relationship appears {}.",
            pick(&lexicon::PERSONALITY_TRAITS, (s.v + 7) % 15),
            pick(&lexicon::RELATIONSHIP_QUALITIES, s.v % 10),
            s.either("strong", "challenging initially but improving with time")
        )
    },
    |s| {
        format!(
            "Your 5th house of romance shows {}, indicating {}. Look for partners who respect your need for {} and share your interest in {}.",
            s.planets_in(&[5]),
            s.either("a vibrant love life", "selective but deep romantic attachments"),
            pick(&lexicon::RELATIONSHIP_QUALITIES, (s.v + 3) % 10),
            pick(&lexicon::RELATIONSHIP_QUALITIES, (s.v + 5) % 10)
        )
    },
];

const GENERAL: [Template; 5] = [
    |s| {
        format!(
            "With {} ascendant, you present yourself to the world as {}. Your Sun in {} in the {} house gives you {}. Moon in {} shapes your emotional nature to be {}.",
            s.chart.ascendant(),
            s.chart.ascendant().ascendant_trait(),
            s.sign(Planet::Sun),
            s.house(Planet::Sun),
            pick(&lexicon::SUN_QUALITIES, s.v % 10),
            s.sign(Planet::Moon),
            pick(&lexicon::MOON_QUALITIES, s.v % 10)
        )
    },
    |s| {
        format!(
            "Your chart shows {} in the 10th house of career, suggesting {}. With Jupiter in the {} house, you experience growth and expansion in areas of {}.",
            s.planets_in(&[10]),
            s.either("strong professional ambitions", "a public role in your community"),
            s.house(Planet::Jupiter),
            lexicon::house_significance(s.house_number(Planet::Jupiter).unwrap_or(1))
        )
    },
    |s| {
        format!(
            "The placement of Saturn in your {} house indicates areas where you learn discipline and patience. Your Mercury in {} shapes your communication style to be {}. Venus in the {} house influences how you express affection and what you value.",
            s.house(Planet::Saturn),
            s.sign(Planet::Mercury),
            pick(&lexicon::MERCURY_QUALITIES, s.v % 8),
            s.house(Planet::Venus)
        )
    },
    |s| {
        format!(
            "With Rahu (North Node) in your {} house, you have karmic lessons to learn about {}. Your Mars in {} gives you {} and influences how you assert yourself.",
            s.house(Planet::Rahu),
            lexicon::house_significance(s.house_number(Planet::Rahu).unwrap_or(9)),
            s.sign(Planet::Mars),
            pick(&lexicon::MARS_QUALITIES, s.v % 8)
        )
    },
    |s| {
        format!(
            "Your {} Moon reveals your inner emotional landscape, showing you're naturally {}. With {} in fire houses, you have {} that seek expression in your life path.",
            s.sign(Planet::Moon),
            pick(&lexicon::MOON_QUALITIES, (s.v + 5) % 10),
            s.planets_in(&[1, 5, 9]),
            s.either("abundant creative energy", "strong spiritual inclinations")
        )
    },
];

/// The wide-range draw for answering `text` about `details`, in 0..100.
pub fn response_variant(details: &BirthDetails, text: &str) -> usize {
    SeededRandom::new(&response_seed(details, text)).next_index(100)
}

/// Answer `text` in `category` from the chart alone. Never fails.
pub fn generate(
    category: ResponseCategory,
    text: &str,
    chart: &BirthChart,
    details: &BirthDetails,
) -> Message {
    let slots = Slots {
        v: response_variant(details, text),
        chart,
        details,
    };

    let templates: &[Template] = match category {
        ResponseCategory::Planetary => {
            let content = format!(
                "Based on your birth details ({}), here are your planetary positions:",
                slots.date()
            );
            debug!(target: "vedic::generator", category = %category, "planetary listing");
            return Message::ai(content, Source::Deterministic)
                .with_kind(MessageType::Planetary)
                .with_planetary_data(chart.planets().to_vec());
        }
        ResponseCategory::Remedy => &REMEDY,
        ResponseCategory::Career => &CAREER,
        ResponseCategory::Relationship => &RELATIONSHIP,
        ResponseCategory::General => &GENERAL,
    };

    let template = slots.v % templates.len();
    debug!(target: "vedic::generator", category = %category, variant = slots.v, template, "generated answer");
    let body = templates[template](&slots);

    match category {
        ResponseCategory::Remedy => {
            Message::ai(body, Source::Deterministic).with_kind(MessageType::Remedy)
        }
        ResponseCategory::General => Message::ai(
            format!(
                "{} This reading is based on your birth date ({}) and time ({}).",
                body,
                slots.date(),
                details.time
            ),
            Source::Deterministic,
        ),
        _ => Message::ai(body, Source::Deterministic),
    }
}
