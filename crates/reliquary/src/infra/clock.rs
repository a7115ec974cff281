/// Source of the reference time maturities are measured against.
pub trait Clock: Send + Sync {
    /// Current UNIX timestamp in seconds.
    fn now(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a given timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
        assert_eq!(FixedClock(42).now(), 42);
    }
}
