//! Seeded pseudo-random source.
//!
//! A string seed is hashed with SHA-256 into a ChaCha key, so the same seed yields the
//! same sequence on every run and platform. Sub-generators are derived by appending to
//! the seed string.

use crate::details::BirthDetails;
use chrono::Datelike;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: String,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&hasher.finalize());
        Self {
            seed: seed.to_string(),
            rng: ChaCha8Rng::from_seed(key),
        }
    }

    /// Generator for `seed + suffix`, independent of how far this one has advanced.
    pub fn derive(&self, suffix: &str) -> Self {
        Self::new(&format!("{}{}", self.seed, suffix))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// `floor(next_f64() * n)`, always below `n`. `n` must be non-zero.
    pub fn next_index(&mut self, n: usize) -> usize {
        let scaled = (self.next_f64() * n as f64).floor() as usize;
        scaled.min(n.saturating_sub(1))
    }
}

/// Base seed for a person: calendar year, month (1..=12), day, then the time string
/// verbatim, e.g. "2000-5-15-14:30".
pub fn chart_seed(details: &BirthDetails) -> String {
    format!(
        "{}-{}-{}-{}",
        details.date.year(),
        details.date.month(),
        details.date.day(),
        details.time
    )
}

/// Seed for answering `text` about `details`: the chart seed plus the normalized question.
pub fn response_seed(details: &BirthDetails, text: &str) -> String {
    format!("{}-{}", chart_seed(details), text.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new("2000-5-15-14:30");
        let mut b = SeededRandom::new("2000-5-15-14:30");
        let xs: Vec<f64> = (0..16).map(|_| a.next_f64()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.next_f64()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_known_first_draw() {
        // fixed across platforms and releases; a change here moves every chart
        assert_eq!(SeededRandom::new("2000-5-15-14:30").next_f64(), 0.8081239683585437);
        assert_eq!(SeededRandom::new("2000-5-15-14:30").next_index(12), 9);
    }

    #[test]
    fn test_different_seed_different_sequence() {
        let mut a = SeededRandom::new("2000-5-15-14:30");
        let mut b = SeededRandom::new("2000-5-15-14:31");
        let xs: Vec<f64> = (0..4).map(|_| a.next_f64()).collect();
        let ys: Vec<f64> = (0..4).map(|_| b.next_f64()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_derive_ignores_parent_progress() {
        let mut parent = SeededRandom::new("base");
        let fresh = parent.derive("Sun").next_f64();
        parent.next_f64();
        parent.next_f64();
        assert_eq!(parent.derive("Sun").next_f64(), fresh);
        assert_eq!(parent.derive("Sun").seed(), "baseSun");
        assert_eq!(SeededRandom::new("baseSun").next_f64(), fresh);
    }

    #[test]
    fn test_next_index_bounds() {
        let mut rng = SeededRandom::new("bounds");
        for _ in 0..500 {
            assert!(rng.next_index(12) < 12);
        }
    }

    #[test]
    fn test_seed_strings() {
        let details = BirthDetails::new(
            "Asha",
            NaiveDate::from_ymd_opt(2000, 5, 15).expect("valid date"),
            "14:30",
            "Delhi",
        );
        assert_eq!(chart_seed(&details), "2000-5-15-14:30");
        assert_eq!(
            response_seed(&details, "  Any Remedy for me? "),
            "2000-5-15-14:30-any remedy for me?"
        );
    }
}
