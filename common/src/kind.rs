//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Variants are (de)serialized in `SCREAMING_SNAKE_CASE`, unless another
/// case is specified via `#[case = "..."]` attribute.
///
/// # Example
///
/// ```rust
/// # use crate::common::define_kind;
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
///
/// define_kind! {
///     #[doc = "Color kind."]
///     #[case = "lowercase"]
///     enum Color {
///         #[doc = "Red color"]
///         Red = 1,
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
        $crate::define_kind! {
            #[doc = $doc]
            #[case = "SCREAMING_SNAKE_CASE"]
            enum $name {
                $(
                    #[doc = $variant_doc]
                    $variant = $value,
                )*
            }
        }
    };

    (
        #[doc = $doc:literal]
        #[case = $case:tt]
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
            PartialEq,
        )]
        #[cfg_attr(
            feature = "serde",
            derive(
                $crate::private::serde::Deserialize,
                $crate::private::serde::Serialize,
            ),
            serde(rename_all = $case),
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = $case)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants of this kind, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
