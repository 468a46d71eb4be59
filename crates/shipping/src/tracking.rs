//! Tracking identifier generation.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates shipment tracking ids of the form `LL-D###D#######`.
///
/// `L` is a letter from `A` to `Y`, the first `D` is the seed's length in
/// bytes, the second `D` is half of it, and `#` are random decimal digits.
/// The ids carry no uniqueness guarantee.
///
/// The generator owns its random source behind a mutex, so one instance can
/// be shared across concurrent orders.
#[derive(Debug)]
pub struct TrackingIdGenerator {
    rng: Mutex<StdRng>,
}

impl TrackingIdGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a generator with a fixed seed, for reproducible sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Creates a tracking id derived from `seed`.
    pub fn create_tracking_id(&self, seed: &str) -> String {
        // A panic while holding the lock cannot leave the RNG in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let len = seed.len();
        format!(
            "{}{}-{}{}{}{}",
            random_letter(&mut *rng),
            random_letter(&mut *rng),
            len,
            random_digits(&mut *rng, 3),
            len / 2,
            random_digits(&mut *rng, 7),
        )
    }
}

impl Default for TrackingIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn random_letter(rng: &mut impl Rng) -> char {
    char::from(b'A' + rng.gen_range(0..25u8))
}

fn random_digits(rng: &mut impl Rng, digits: usize) -> String {
    (0..digits)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(id: &str, seed_len: usize) -> (&str, &str, &str, &str, &str) {
        let len_token = seed_len.to_string();
        let half_token = (seed_len / 2).to_string();
        let (letters, rest) = id.split_once('-').unwrap();
        let (len, rest) = rest.split_at(len_token.len());
        let (three, rest) = rest.split_at(3);
        let (half, seven) = rest.split_at(half_token.len());
        (letters, len, three, half, seven)
    }

    #[test]
    fn test_format_matches_layout() {
        let generator = TrackingIdGenerator::with_seed(7);
        let seed = "1600 Amphitheatre Parkway, Mountain View, CA";
        let id = generator.create_tracking_id(seed);

        let (letters, len, three, half, seven) = split(&id, seed.len());
        assert_eq!(letters.len(), 2);
        assert!(letters.chars().all(|c| ('A'..='Y').contains(&c)));
        assert_eq!(len, seed.len().to_string());
        assert!(three.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(half, (seed.len() / 2).to_string());
        assert_eq!(seven.len(), 7);
        assert!(seven.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_length_tokens_count_bytes() {
        let generator = TrackingIdGenerator::with_seed(5);
        let seed = "Straße 1, Köln, NW";
        assert_eq!(seed.chars().count(), 18);

        let id = generator.create_tracking_id(seed);
        let (_, len, _, half, seven) = split(&id, 20);
        assert_eq!(len, "20");
        assert_eq!(half, "10");
        assert_eq!(seven.len(), 7);
    }

    #[test]
    fn test_letters_never_include_z() {
        let generator = TrackingIdGenerator::with_seed(42);
        for _ in 0..500 {
            let id = generator.create_tracking_id("x");
            assert!(!id[..2].contains('Z'), "unexpected Z in {id}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = TrackingIdGenerator::with_seed(99);
        let b = TrackingIdGenerator::with_seed(99);
        for _ in 0..10 {
            assert_eq!(a.create_tracking_id("seed"), b.create_tracking_id("seed"));
        }
    }

    #[test]
    fn test_single_char_seed_has_zero_half_length() {
        let generator = TrackingIdGenerator::with_seed(1);
        let id = generator.create_tracking_id("a");
        let (_, len, _, half, _) = split(&id, 1);
        assert_eq!(len, "1");
        assert_eq!(half, "0");
        assert_eq!(id.len(), 2 + 1 + 1 + 3 + 1 + 7);
    }

    #[test]
    fn test_shared_across_threads() {
        let generator = std::sync::Arc::new(TrackingIdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = generator.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| generator.create_tracking_id("seed"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for id in handle.join().unwrap() {
                assert_eq!(id.len(), 2 + 1 + 1 + 3 + 1 + 7);
            }
        }
    }
}
