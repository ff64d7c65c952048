//! Formats of the generated proof-of-purchase strings.

use super::ports::ArtifactIdGenerator;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DIGITS: &[u8] = b"0123456789";

fn token(generator: &dyn ArtifactIdGenerator, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[generator.index(alphabet.len())] as char)
        .collect()
}

fn groups(generator: &dyn ArtifactIdGenerator, alphabet: &[u8], count: usize) -> Vec<String> {
    (0..count).map(|_| token(generator, alphabet, 4)).collect()
}

/// `PKG-XXXXXXXX`
pub fn parking_ticket(generator: &dyn ArtifactIdGenerator) -> String {
    format!("PKG-{}", token(generator, ALPHANUMERIC, 8))
}

/// `VIG-<year>-XXXXX`
pub fn vignette_id(generator: &dyn ArtifactIdGenerator, year: i32) -> String {
    format!("VIG-{}-{}", year, token(generator, ALPHANUMERIC, 5))
}

/// `GIFT-XXXX-XXXX`
pub fn redemption_code(generator: &dyn ArtifactIdGenerator) -> String {
    format!("GIFT-{}", groups(generator, ALPHANUMERIC, 2).join("-"))
}

/// `XXXX-XXXX-XXXX-XXXX`
pub fn gaming_code(generator: &dyn ArtifactIdGenerator) -> String {
    groups(generator, ALPHANUMERIC, 4).join("-")
}

/// `HR-LOT-ddddddd`
pub fn lottery_ticket(generator: &dyn ArtifactIdGenerator) -> String {
    format!("HR-LOT-{}", token(generator, DIGITS, 7))
}

/// `dddd dddd dddd dddd`
pub fn paysafe_pin(generator: &dyn ArtifactIdGenerator) -> String {
    groups(generator, DIGITS, 4).join(" ")
}

/// `SER-XXXXXXXXXX`
pub fn serial(generator: &dyn ArtifactIdGenerator) -> String {
    format!("SER-{}", token(generator, ALPHANUMERIC, 10))
}

/// `count` distinct numbers from `1..=max`, ascending.
pub fn quick_pick(generator: &dyn ArtifactIdGenerator, count: u8, max: u8) -> Vec<u8> {
    let mut pool: Vec<u8> = (1..=max).collect();
    let mut picked = Vec::with_capacity(count as usize);
    for _ in 0..count.min(max) {
        let idx = generator.index(pool.len());
        picked.push(pool.swap_remove(idx));
    }
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Walks the alphabet in order.
    struct Counter(AtomicUsize);

    impl ArtifactIdGenerator for Counter {
        fn index(&self, bound: usize) -> usize {
            self.0.fetch_add(1, Ordering::Relaxed) % bound
        }

        fn uuid(&self) -> Uuid {
            Uuid::nil()
        }
    }

    fn counter() -> Counter {
        Counter(AtomicUsize::new(0))
    }

    fn is_upper_alnum(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    #[test]
    fn test_parking_ticket_format() {
        let ticket = parking_ticket(&counter());
        assert_eq!(ticket, "PKG-ABCDEFGH");
        let suffix = ticket.strip_prefix("PKG-").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(is_upper_alnum(suffix));
    }

    #[test]
    fn test_group_formats() {
        let generator = counter();
        assert_eq!(redemption_code(&generator), "GIFT-ABCD-EFGH");
        assert_eq!(gaming_code(&generator).split('-').count(), 4);
        assert_eq!(vignette_id(&generator, 2026).len(), "VIG-2026-XXXXX".len());
        let pin = paysafe_pin(&generator);
        assert_eq!(pin.len(), 19);
        assert!(pin.split(' ').all(|g| g.len() == 4 && g.chars().all(|c| c.is_ascii_digit())));
        assert!(lottery_ticket(&generator).starts_with("HR-LOT-"));
        assert_eq!(serial(&generator).len(), 14);
    }

    #[test]
    fn test_quick_pick_is_distinct_and_sorted() {
        let pick = quick_pick(&counter(), 6, 45);
        assert_eq!(pick.len(), 6);
        assert!(pick.windows(2).all(|w| w[0] < w[1]));
        assert!(pick.iter().all(|n| (1..=45).contains(n)));
    }
}
