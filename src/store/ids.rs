use chrono::Utc;

/// Prefix on ids assigned by the guided template flow.
pub const GUIDED_ID_PREFIX: &str = "card-";

/// Assigns time-derived identifiers that stay unique under rapid
/// successive creation.
///
/// Ids are millisecond timestamps; when the clock has not advanced past the
/// last issued stamp the generator bumps past it, so two calls in the same
/// millisecond never collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_stamp: i64,
}

impl IdGenerator {
    pub fn new() -> IdGenerator {
        IdGenerator::default()
    }

    fn next_stamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp + 1
        };
        self.last_stamp = stamp;
        stamp
    }

    /// Plain numeric id, used for cards added directly and for categories.
    pub fn next_id(&mut self) -> String {
        self.next_stamp().to_string()
    }

    /// Prefixed id used by the guided template flow.
    pub fn next_guided_id(&mut self) -> String {
        format!("{}{}", GUIDED_ID_PREFIX, self.next_stamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rapid_ids_are_pairwise_distinct() {
        let mut ids = IdGenerator::new();
        let mut seen = HashSet::new();
        // Far more calls than fit in one millisecond of distinct clock reads.
        for _ in 0..10_000 {
            assert!(seen.insert(ids.next_id()));
        }
    }

    #[test]
    fn guided_ids_are_prefixed_and_distinct() {
        let mut ids = IdGenerator::new();
        let a = ids.next_guided_id();
        let b = ids.next_guided_id();
        assert!(a.starts_with(GUIDED_ID_PREFIX));
        assert_ne!(a, b);
    }

    #[test]
    fn mixed_schemes_share_the_monotonic_stamp() {
        let mut ids = IdGenerator::new();
        let plain = ids.next_id();
        let guided = ids.next_guided_id();
        let stamp: i64 = plain.parse().unwrap();
        let guided_stamp: i64 = guided
            .strip_prefix(GUIDED_ID_PREFIX)
            .unwrap()
            .parse()
            .unwrap();
        assert!(guided_stamp > stamp);
    }
}
