//! [`Filter`] definitions and text search.

use std::{convert::Infallible, str::FromStr};

use common::{Enumeration, Recognized};

use super::Record;

/// Equality filter over an [`Enumeration`] field of a [`Record`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Filter<K> {
    /// Every value passes.
    All,

    /// Only the provided value passes.
    ///
    /// [`Recognized::Unknown`] one makes nothing pass.
    Only(Recognized<K>),
}

impl<K> Default for Filter<K> {
    fn default() -> Self {
        Self::All
    }
}

impl<K: Enumeration> Filter<K> {
    /// Checks whether the provided `value` passes this [`Filter`].
    ///
    /// [`None`] stands for a missing or unrecognized value, so it only passes
    /// [`Filter::All`].
    #[must_use]
    pub fn matches(&self, value: Option<K>) -> bool {
        match self {
            Self::All => true,
            Self::Only(Recognized::Known(k)) => value == Some(*k),
            Self::Only(Recognized::Unknown(_)) => false,
        }
    }
}

impl<K: Enumeration> FromStr for Filter<K> {
    type Err = Infallible;

    /// Parses a [`Filter`], where `all` (or nothing) means [`Filter::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(Recognized::parse(s))
        })
    }
}

/// Normalizes the provided search `text` into a needle to look for.
///
/// [`None`] is returned if there is nothing to search for.
pub(super) fn needle(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_lowercase())
}

/// Checks whether any of the [`Record::search_fields()`] contains the
/// provided lowercase `needle`.
pub(super) fn search<R: Record + ?Sized>(record: &R, needle: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|f| f.to_lowercase().contains(needle))
}

#[cfg(test)]
mod spec {
    use common::Recognized;

    use crate::domain::unit;

    use super::{needle, Filter};

    #[test]
    fn parses_all() {
        for s in ["all", "ALL", " all ", ""] {
            assert_eq!(s.parse::<Filter<unit::Kind>>(), Ok(Filter::All));
        }
        assert_eq!(
            "retail".parse::<Filter<unit::Kind>>(),
            Ok(Filter::Only(Recognized::Known(unit::Kind::Retail))),
        );
    }

    #[test]
    fn matches_known_values_only() {
        let retail = Filter::Only(unit::Kind::Retail.into());
        let bogus = "spaceship".parse::<Filter<unit::Kind>>().unwrap();

        assert!(retail.matches(Some(unit::Kind::Retail)));
        assert!(!retail.matches(Some(unit::Kind::Office)));
        assert!(!retail.matches(None));
        assert!(!bogus.matches(Some(unit::Kind::Retail)));
        assert!(!bogus.matches(None));
        assert!(Filter::All.matches(None::<unit::Kind>));
    }

    #[test]
    fn normalizes_needle() {
        assert_eq!(needle("  Harbor  ").as_deref(), Some("harbor"));
        assert_eq!(needle(" \t "), None);
    }
}
