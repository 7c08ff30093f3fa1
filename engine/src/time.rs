use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque representation of a time instant.
///
/// The unit of time is one scheduler tick.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
pub struct Instant(pub(crate) i64);

impl Instant {
    /// Whether a recurring event with the given period fires on this
    /// instant.
    pub const fn is_pulse(self, period: i64) -> bool {
        period > 0 && self.0.rem_euclid(period) == 0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl std::ops::Add<i64> for Instant {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Instant(self.0 + rhs)
    }
}

impl std::ops::AddAssign<i64> for Instant {
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub<Instant> for Instant {
    type Output = i64;

    fn sub(self, rhs: Instant) -> Self::Output {
        self.0 - rhs.0
    }
}

impl std::ops::Sub<i64> for Instant {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self::Output {
        Instant(self.0 - rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic() {
        let t = Instant(100);
        assert_eq!((t + 12) - t, 12);
        assert_eq!(t - 1, Instant(99));
        assert!(t.is_pulse(10));
        assert!(!(t + 3).is_pulse(10));
        assert!(!t.is_pulse(0));
    }
}
