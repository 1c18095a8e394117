//! [`Money`]-related definitions.

use std::{fmt, num::NonZeroU32, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Adds the `other` [`Money`] to this one.
    ///
    /// [`None`] is returned if the [`Currency`]s differ or the sum overflows.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        Some(Self {
            amount: self.amount.checked_add(other.amount)?,
            currency: self.currency,
        })
    }

    /// Returns the `part / whole` share of this [`Money`], rounded to cents.
    ///
    /// [`None`] is returned if the intermediate amount overflows.
    #[must_use]
    pub fn prorate(self, part: u32, whole: NonZeroU32) -> Option<Self> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(part))?
            .checked_div(Decimal::from(whole.get()))?;
        Some(Self {
            amount: amount.round_dp_with_strategy(
                2,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let currency = currency.to_string().to_ascii_uppercase();
        write!(f, "{}{currency}", amount.normalize())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err("negative amount");
        }
        let currency = Currency::from_str(&currency.to_ascii_lowercase())
            .map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "British Pound."]
        Gbp = 3,
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`Money`] is represented as a `{amount}{CURRENCY}` string.

    use std::str::FromStr as _;

    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    use super::Money;

    impl Serialize for Money {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            Self::from_str(&raw).map_err(|e| {
                Error::custom(format!("cannot parse `Money` from `{raw}`: {e}"))
            })
        }
    }
}
