//! [`Person`] definitions.

use std::sync::LazyLock;

use common::define_text;
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Person submitting an application or renting a unit.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// First [`Name`] of this [`Person`].
    pub first_name: Name,

    /// Last [`Name`] of this [`Person`].
    pub last_name: Name,

    /// [`Email`] of this [`Person`].
    pub email: Email,
}

impl Person {
    /// Returns the full name of this [`Person`].
    ///
    /// The first and last names are always joined with a single space, both
    /// for display and for searching.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

define_text! {
    #[doc = "First or last name of a [`Person`]."]
    struct Name(max = 256);
}

/// Email address of a [`Person`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 320 && REGEX.is_match(address)
    }
}

impl std::str::FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).ok_or_else(|| de::Error::custom("invalid `Email`"))
    }
}

/// ID of a staff member records can be assigned to.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct StaffId(Uuid);

#[cfg(test)]
mod spec {
    use super::{Email, Person};

    #[test]
    fn email_format() {
        assert!(Email::new("jane.doe@example.com").is_some());
        assert!(Email::new("jane@localhost").is_none());
        assert!(Email::new("jane doe@example.com").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn full_name_is_space_separated() {
        let person: Person = serde_json::from_str(
            r#"{
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com"
            }"#,
        )
        .unwrap();

        assert_eq!(person.full_name(), "Jane Doe");
    }
}
