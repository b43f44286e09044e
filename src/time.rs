use std::ops::{Add, Sub};

/// Monotonic integer time scalar, in the same units as the host's `pts`/`dts`
/// (microsecond-like; the decoder never interprets the unit itself).
#[derive(PartialEq, PartialOrd, Eq, Ord, Hash, Debug, Clone, Copy, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Wrap a raw scalar value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw scalar value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0 + rhs.0)
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0 - rhs.0)
    }
}

/// Half-open time interval `[start, stop)`.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Interval {
    pub start: Timestamp,
    pub stop: Timestamp,
}

impl Interval {
    /// Build an interval, given `start <= stop`.
    #[must_use]
    pub fn new(start: Timestamp, stop: Timestamp) -> Self {
        Self { start, stop }
    }

    /// Whether `t` falls inside this half-open interval.
    #[must_use]
    pub fn contains(&self, t: Timestamp) -> bool {
        self.start <= t && t < self.stop
    }

    /// Whether this interval has fully elapsed by `t` (i.e. `stop <= t`).
    #[must_use]
    pub fn has_expired_by(&self, t: Timestamp) -> bool {
        self.stop <= t
    }
}
