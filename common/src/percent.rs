//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::{Decimal, RoundingStrategy};

/// Floating-point percentage in the `[0, 100]` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Calculates which [`Percent`] the `part` makes of the `whole`, rounded
    /// to one decimal place.
    ///
    /// [`None`] is returned if the `part` exceeds the `whole`. A zero `whole`
    /// results in [`Percent::ZERO`].
    #[must_use]
    pub fn of(part: u32, whole: u32) -> Option<Self> {
        if whole == 0 {
            return (part == 0).then_some(Self::ZERO);
        }
        let ratio = Decimal::from(part) * Decimal::ONE_HUNDRED
            / Decimal::from(whole);
        Self::new(ratio.round_dp_with_strategy(
            1,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Returns the inner [`Decimal`] value.
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{Serialize, Serializer};

    use super::Percent;

    impl Serialize for Percent {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(&self.0.normalize())
        }
    }
}
