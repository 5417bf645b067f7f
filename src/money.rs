use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative amount of money, stored as whole cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// No money at all
    pub const ZERO: Self = Self(0);

    /// Build an amount from a number of cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// The amount in cents
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Whether the amount is zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, clamping at the largest representable value
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply a daily rate by a number of days, clamping on overflow
    #[must_use]
    pub const fn times(self, days: u64) -> Self {
        Self(self.0.saturating_mul(days))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::Money;

    #[test]
    fn displays_dollars_and_cents() {
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(1250).to_string(), "$12.50");
    }

    #[test]
    fn daily_rate_scales_with_days() {
        let rate = Money::from_cents(100);
        assert_eq!(rate.times(3), Money::from_cents(300));
        assert_eq!(rate.times(0), Money::ZERO);
        assert_eq!(Money::from_cents(u64::MAX).times(2), Money::from_cents(u64::MAX));
    }

    #[test]
    fn serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_cents(700)).unwrap_or_default();
        assert_eq!(json, "700");
    }
}
