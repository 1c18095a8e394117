//! Macros and helpers for defining kind enums.

use std::{convert::Infallible, fmt, hash::Hash, str::FromStr};

/// Macro for defining a kind enum.
///
/// Variants must be declared in their natural order: the derived [`Ord`]
/// follows the declaration order, which is what sorting by a kind relies on.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }

        impl $crate::Enumeration for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        $crate::__kind_serde!($name);
    };
}

#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! __kind_serde {
    ($name:ident) => {
        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                let raw = <
                    ::std::string::String
                    as $crate::private::serde::Deserialize
                >::deserialize(deserializer)?;
                ::std::str::FromStr::from_str(&raw).map_err(|_| {
                    <D::Error as $crate::private::serde::de::Error>::custom(
                        ::std::format!(
                            "invalid `{}` value: {raw}",
                            ::core::stringify!($name),
                        ),
                    )
                })
            }
        }
    };
}

#[cfg(not(feature = "serde"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __kind_serde {
    ($name:ident) => {};
}

/// Enum with a closed set of variants defined via [`define_kind!`].
pub trait Enumeration:
    Copy + fmt::Debug + fmt::Display + FromStr + Hash + Ord + Sized + 'static
{
    /// All the variants, in declaration order.
    const ALL: &'static [Self];
}

/// Value of an [`Enumeration`] as received from the outside world.
///
/// Values the [`Enumeration`] doesn't know about are preserved as
/// [`Recognized::Unknown`] instead of failing the whole record.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Recognized<K> {
    /// One of the known variants.
    Known(K),

    /// Raw value not matching any known variant.
    Unknown(String),
}

impl<K: Enumeration> Recognized<K> {
    /// Parses the provided `raw` value, falling back to
    /// [`Recognized::Unknown`].
    #[must_use]
    pub fn parse(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        K::from_str(raw)
            .map_or_else(|_| Self::Unknown(raw.to_owned()), Self::Known)
    }
}

impl<K: Copy> Recognized<K> {
    /// Returns the known variant, if any.
    #[must_use]
    pub fn known(&self) -> Option<K> {
        match self {
            Self::Known(k) => Some(*k),
            Self::Unknown(_) => None,
        }
    }
}

impl<K> Recognized<K> {
    /// Indicates whether this value is not a known variant.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl<K> From<K> for Recognized<K> {
    fn from(kind: K) -> Self {
        Self::Known(kind)
    }
}

impl<K: fmt::Display> fmt::Display for Recognized<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(k) => write!(f, "{k}"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

impl<K: Enumeration> FromStr for Recognized<K> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::fmt;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Enumeration, Recognized};

    impl<K: fmt::Display> Serialize for Recognized<K> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de, K: Enumeration> Deserialize<'de> for Recognized<K> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            String::deserialize(deserializer).map(Self::parse)
        }
    }
}
