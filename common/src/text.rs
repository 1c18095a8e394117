//! Macros for defining validated text newtypes.

/// Macro for defining a trimmed, non-empty and length-limited text newtype.
///
/// # Example
///
/// ```rust
/// # use common::define_text;
///
/// define_text! {
///     #[doc = "Name of a shape."]
///     struct Name(max = 64);
/// }
///
/// assert!(Name::new("Cube").is_some());
/// assert!(Name::new(" Cube").is_none());
/// ```
#[macro_export]
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        struct $name:ident(max = $max:literal);
    ) => {
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[doc = $doc]
        pub struct $name(::std::string::String);

        impl $name {
            #[doc = ::core::concat!(
                "Creates a new [`",
                ::core::stringify!($name),
                "`] if the given `value` is valid.",
            )]
            #[must_use]
            pub fn new(
                value: impl ::core::convert::Into<::std::string::String>,
            ) -> ::core::option::Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            /// Checks whether the given `value` is trimmed, non-empty and
            /// fits the length limit.
            fn check(value: &str) -> bool {
                value.trim() == value
                    && !value.is_empty()
                    && value.len() <= $max
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`",
                ))
            }
        }

        $crate::__text_serde!($name);
    };
}

#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! __text_serde {
    ($name:ident) => {
        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.serialize_str(&self.0)
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
                Self::new(raw).ok_or_else(|| {
                    <D::Error as $crate::private::serde::de::Error>::custom(
                        ::core::concat!(
                            "invalid `",
                            ::core::stringify!($name),
                            "`",
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
macro_rules! __text_serde {
    ($name:ident) => {};
}
