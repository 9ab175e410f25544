//! Keyword classifier for incoming questions.
//!
//! Deliberately crude: case-insensitive substring matching against fixed keyword sets,
//! checked in priority order. "Where is my love?" is a planetary question because
//! "where" is checked before "love".

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Planetary,
    Remedy,
    Career,
    Relationship,
    General,
}

/// Categories with their keywords, in the order they are checked.
const RULES: [(ResponseCategory, &[&str]); 4] = [
    (ResponseCategory::Planetary, &["planet", "position", "where"]),
    (ResponseCategory::Remedy, &["remedy", "solution"]),
    (ResponseCategory::Career, &["career", "profession"]),
    (ResponseCategory::Relationship, &["relationship", "marriage", "love"]),
];

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 5] = [
        Self::Planetary,
        Self::Remedy,
        Self::Career,
        Self::Relationship,
        Self::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planetary => "planetary",
            Self::Remedy => "remedy",
            Self::Career => "career",
            Self::Relationship => "relationship",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First category whose keywords appear in `text`, else `General`.
pub fn classify(text: &str) -> ResponseCategory {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(ResponseCategory::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category() {
        assert_eq!(classify("What about my planets?"), ResponseCategory::Planetary);
        assert_eq!(classify("Where is Mars?"), ResponseCategory::Planetary);
        assert_eq!(classify("Any REMEDY for me?"), ResponseCategory::Remedy);
        assert_eq!(classify("Is there a solution?"), ResponseCategory::Remedy);
        assert_eq!(classify("Which profession suits me"), ResponseCategory::Career);
        assert_eq!(classify("Tell me about marriage"), ResponseCategory::Relationship);
        assert_eq!(classify("Hello, I'm Asha"), ResponseCategory::General);
        assert_eq!(classify(""), ResponseCategory::General);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify("where is my love"), ResponseCategory::Planetary);
        assert_eq!(classify("a remedy for my career"), ResponseCategory::Remedy);
        assert_eq!(classify("career or relationship?"), ResponseCategory::Career);
        // substring, not word, matching
        assert_eq!(classify("I feel so lovely today"), ResponseCategory::Relationship);
    }

    #[test]
    fn test_classify_is_pure() {
        for text in ["planet", "remedy please", "my career", "love", "anything else"] {
            let first = classify(text);
            assert_eq!(first, classify(text));
            assert!(ResponseCategory::ALL.contains(&first));
        }
    }
}
