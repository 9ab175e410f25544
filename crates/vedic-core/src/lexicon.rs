//! Fixed vocabularies used to flavour generated answers. Every lookup wraps its index
//! around the list, so any draw is a valid index.

pub const RELATIONSHIP_QUALITIES: [&str; 10] = [
    "intellectual stimulation",
    "emotional security",
    "spiritual connection",
    "financial stability",
    "passion and romance",
    "friendship and companionship",
    "mutual growth and support",
    "shared values and life goals",
    "honesty and transparency",
    "respect for independence",
];

pub const CAREER_FIELDS: [&str; 12] = [
    "technology and innovation",
    "healthcare and wellness",
    "education and teaching",
    "finance and banking",
    "creative arts and design",
    "law and justice",
    "science and research",
    "media and communication",
    "service industries",
    "entrepreneurship",
    "public service",
    "spiritual and counseling roles",
];

pub const CAREER_APPROACHES: [&str; 8] = [
    "networking and building relationships",
    "continuous learning and education",
    "focused specialization",
    "adaptability and versatility",
    "leadership and team management",
    "innovation and creative thinking",
    "technical expertise",
    "service-oriented approach",
];

pub const FINANCIAL_FIELDS: [&str; 9] = [
    "investments and trading",
    "business ownership",
    "professional career",
    "real estate",
    "creative ventures",
    "technology and innovation",
    "service-based businesses",
    "teaching and knowledge sharing",
    "partnership ventures",
];

pub const PERSONALITY_TRAITS: [&str; 15] = [
    "intelligent and analytical",
    "compassionate and nurturing",
    "creative and expressive",
    "determined and persistent",
    "adaptable and versatile",
    "practical and detail-oriented",
    "optimistic and enthusiastic",
    "loyal and dependable",
    "charismatic and inspiring",
    "disciplined and structured",
    "intuitive and perceptive",
    "honest and sincere",
    "adventurous and bold",
    "peaceful and harmonious",
    "passionate and intense",
];

pub const MEETING_VENUES: [&str; 10] = [
    "educational settings or classes",
    "through mutual friends",
    "work or professional environments",
    "spiritual or religious gatherings",
    "travel or foreign locations",
    "family connections",
    "online or social media",
    "community events or volunteer work",
    "hobbies or recreational activities",
    "unexpected chance encounters",
];

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const PLANTS: [&str; 5] = [
    "Tulsi (Holy Basil)",
    "Peepal tree",
    "Banana tree",
    "Neem tree",
    "Sandalwood tree",
];

pub const FOODS: [&str; 8] = [
    "rice",
    "yellow lentils",
    "sweets",
    "milk",
    "fruits",
    "wheat",
    "sesame seeds",
    "mixed grains",
];

pub const MANTRAS: [&str; 9] = [
    "Gayatri Mantra",
    "Mahamrityunjaya Mantra",
    "Om Namah Shivaya",
    "Hanuman Chalisa",
    "Saturn Beej Mantra",
    "Venus Mantra",
    "Jupiter Mantra",
    "Sun Beej Mantra",
    "Moon Mantra",
];

pub const YOGA_TYPES: [&str; 6] = [
    "Hatha Yoga",
    "Bhakti Yoga",
    "Karma Yoga",
    "Raja Yoga",
    "Jnana Yoga",
    "Kundalini Yoga",
];

pub const ANIMALS: [&str; 7] = ["crows", "dogs", "cows", "birds", "ants", "fish", "turtles"];

pub const COLORS: [&str; 10] = [
    "red", "yellow", "blue", "green", "white", "black", "orange", "purple", "silver", "gold",
];

pub const SUN_QUALITIES: [&str; 10] = [
    "a strong sense of purpose and identity",
    "natural leadership abilities",
    "creative self-expression",
    "confidence and vitality",
    "determination and willpower",
    "generous and warm-hearted nature",
    "dignity and self-respect",
    "clarity of vision",
    "magnetic charisma",
    "honorable character",
];

pub const MOON_QUALITIES: [&str; 10] = [
    "deeply intuitive and receptive",
    "emotionally nurturing and caring",
    "adaptable and responsive to others",
    "sensitive to surrounding energies",
    "strongly connected to home and family",
    "cyclical in emotional patterns",
    "reflective and contemplative",
    "protective of loved ones",
    "attuned to unconscious patterns",
    "emotionally expressive",
];

pub const MERCURY_QUALITIES: [&str; 8] = [
    "analytical and precise",
    "quick-thinking and adaptable",
    "articulate and expressive",
    "logical and rational",
    "curious and inquisitive",
    "detail-oriented and organized",
    "witty and humorous",
    "skillful with words and communication",
];

pub const MARS_QUALITIES: [&str; 8] = [
    "courage and assertiveness",
    "energy and drive",
    "initiative and leadership",
    "competitive spirit",
    "direct and straightforward approach",
    "physical vitality",
    "decisiveness and action-orientation",
    "independence and self-sufficiency",
];

/// `list[index % len]`.
pub fn pick(list: &[&'static str], index: usize) -> &'static str {
    if list.is_empty() {
        return "";
    }
    list[index % list.len()]
}

/// Life domain governed by a house, 1..=12.
pub fn house_significance(house: u8) -> &'static str {
    match house {
        1 => "self-identity and physical appearance",
        2 => "personal resources and values",
        3 => "communication and short journeys",
        4 => "home, family, and emotional foundations",
        5 => "creativity, romance, and self-expression",
        6 => "daily work, health, and service",
        7 => "partnerships and relationships",
        8 => "shared resources, transformation, and mysteries",
        9 => "higher education, philosophy, and long journeys",
        10 => "career, public reputation, and authority",
        11 => "friendships, groups, and aspirations",
        12 => "spirituality, subconscious, and hidden matters",
        _ => "personal growth and development",
    }
}
