//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Every variant carries a human-readable label and a stable numeric
/// representation. String representation is `kebab-case`, which is also the
/// form used in URL query parameters.
///
/// # Example
///
/// ```rust
/// use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         #[label = "Cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         #[label = "Sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::ALL, [Kind::Cube, Kind::Sphere]);
/// assert_eq!(Kind::Sphere.to_string(), "sphere");
/// assert_eq!(Kind::Cube.label(), "Cube");
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                #[label = $label:literal]
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
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            #[doc = ::core::concat!(
                "All the [`", ::core::stringify!($name), "`] variants in \
                 declaration order.",
            )]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Returns a human-readable label of this value.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                }
            }
        }

        impl ::core::convert::TryFrom<u8> for $name {
            type Error = &'static str;

            fn try_from(v: u8) -> ::core::result::Result<Self, Self::Error> {
                match v {
                    $(
                        v if Self::$variant.u8() == v => Ok(Self::$variant),
                    )*
                    _ => Err(::core::concat!(
                        "invalid `", ::core::stringify!($name), "` value",
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    define_kind! {
        #[doc = "Test kind."]
        enum Shape {
            #[doc = "Flat square."]
            #[label = "Square"]
            FlatSquare = 1,

            #[doc = "Round circle."]
            #[label = "Circle"]
            Circle = 2,
        }
    }

    #[test]
    fn uses_kebab_case() {
        assert_eq!(Shape::FlatSquare.to_string(), "flat-square");
        assert_eq!(Shape::from_str("flat-square"), Ok(Shape::FlatSquare));
        assert_eq!(Shape::from_str("circle"), Ok(Shape::Circle));
        assert!(Shape::from_str("FLAT_SQUARE").is_err());
    }

    #[test]
    fn lists_all_variants() {
        assert_eq!(Shape::ALL, &[Shape::FlatSquare, Shape::Circle]);
        assert_eq!(Shape::Circle.label(), "Circle");
    }

    #[test]
    fn converts_from_u8() {
        assert_eq!(Shape::try_from(2), Ok(Shape::Circle));
        assert!(Shape::try_from(3).is_err());
    }
}
