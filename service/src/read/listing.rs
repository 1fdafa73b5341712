//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

pub mod list {
    //! [`Listing`] list definitions and the filtering over them.

    use std::{fmt, str::FromStr, sync::LazyLock};

    use derive_more::{AsRef, Display, Error, From, Into};
    use itertools::Itertools as _;
    use regex::Regex;

    use crate::domain::{listing, Listing};

    /// Criteria narrowing the visible [`Listing`]s.
    ///
    /// A [`Listing`] passes a [`Filter`] only if it satisfies every one of
    /// its dimensions. [`Filter::default()`] passes every [`Listing`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Text to search for in the [`Listing`]'s title, location or short
        /// description.
        pub search: SearchTerm,

        /// [`LocationFilter`] to apply.
        pub location: LocationFilter,

        /// [`PriceRange`] a [`Listing`]'s price must fall into.
        pub price: PriceRange,

        /// [`StatusFilter`] to apply.
        pub status: StatusFilter,

        /// Exact [`listing::SizeAcres`] to match, if any.
        pub size: Option<listing::SizeAcres>,
    }

    impl Filter {
        /// Checks whether the provided [`Listing`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, listing: &Listing) -> bool {
            self.search.matches(listing)
                && self.location.matches(&listing.location)
                && self.price.contains(listing.price.get())
                && self.status.matches(listing.status)
                && self.size.as_ref().is_none_or(|s| *s == listing.size)
        }

        /// Applies this [`Filter`] to the provided [`Listing`]s, preserving
        /// their relative order.
        pub fn apply<'l>(
            &self,
            listings: impl IntoIterator<Item = &'l Listing>,
        ) -> Vec<&'l Listing> {
            listings.into_iter().filter(|l| self.matches(l)).collect()
        }

        /// Indicates whether this [`Filter`] is the default one, passing every
        /// [`Listing`].
        #[must_use]
        pub fn is_default(&self) -> bool {
            *self == Self::default()
        }
    }

    /// Case-insensitive text to search [`Listing`]s by.
    ///
    /// Blank text is an empty [`SearchTerm`] matching everything.
    #[derive(Clone, Debug, Default, Display, Eq, PartialEq)]
    pub struct SearchTerm(String);

    impl SearchTerm {
        /// Creates a new [`SearchTerm`] out of the provided user input.
        #[must_use]
        pub fn new(input: impl AsRef<str>) -> Self {
            Self(input.as_ref().trim().to_lowercase())
        }

        /// Indicates whether this [`SearchTerm`] is empty.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// Checks whether the provided [`Listing`] matches this
        /// [`SearchTerm`].
        #[must_use]
        pub fn matches(&self, listing: &Listing) -> bool {
            self.is_empty()
                || [
                    listing.title.as_ref(),
                    listing.location.as_ref(),
                    listing.short_description.as_str(),
                ]
                .into_iter()
                .any(|field| contains_ignore_case(field, &self.0))
        }
    }

    /// Filter by [`listing::Location`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub enum LocationFilter {
        /// Any [`listing::Location`] passes.
        #[default]
        All,

        /// Only [`listing::Location`]s containing the lowercased text pass.
        Only(String),
    }

    impl LocationFilter {
        /// Sentinel value selecting every location.
        pub const ALL: &'static str = "all";

        /// Creates a new [`LocationFilter`] out of the provided user input.
        ///
        /// Blank input and the [`LocationFilter::ALL`] sentinel select every
        /// location.
        #[must_use]
        pub fn new(input: impl AsRef<str>) -> Self {
            let input = input.as_ref().trim();
            if input.is_empty() || input.eq_ignore_ascii_case(Self::ALL) {
                Self::All
            } else {
                Self::Only(input.to_lowercase())
            }
        }

        /// Checks whether the provided [`listing::Location`] passes this
        /// [`LocationFilter`].
        #[must_use]
        pub fn matches(&self, location: &listing::Location) -> bool {
            match self {
                Self::All => true,
                Self::Only(needle) => {
                    contains_ignore_case(location.as_ref(), needle)
                }
            }
        }
    }

    /// Filter by [`listing::Status`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum StatusFilter {
        /// Any [`listing::Status`] passes.
        #[default]
        All,

        /// Only the specified [`listing::Status`] passes.
        Only(listing::Status),
    }

    impl StatusFilter {
        /// Checks whether the provided [`listing::Status`] passes this
        /// [`StatusFilter`].
        #[must_use]
        pub fn matches(self, status: listing::Status) -> bool {
            match self {
                Self::All => true,
                Self::Only(expected) => expected == status,
            }
        }
    }

    impl From<Option<listing::Status>> for StatusFilter {
        fn from(status: Option<listing::Status>) -> Self {
            status.map_or(Self::All, Self::Only)
        }
    }

    impl FromStr for StatusFilter {
        type Err = &'static str;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let s = s.trim();
            if s.is_empty() || s == "all" {
                return Ok(Self::All);
            }
            s.parse()
                .map(Self::Only)
                .map_err(|_| "invalid `StatusFilter`")
        }
    }

    /// Inclusive range of prices in whole Kenyan Shillings.
    ///
    /// A missing upper bound means the range is unbounded. A range with `min`
    /// above `max` is valid and contains nothing.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct PriceRange {
        /// Lower bound (inclusive).
        pub min: u64,

        /// Upper bound (inclusive), if any.
        pub max: Option<u64>,
    }

    impl PriceRange {
        /// Creates a new [`PriceRange`] with the provided bounds.
        #[must_use]
        pub fn new(min: u64, max: impl Into<Option<u64>>) -> Self {
            Self {
                min,
                max: max.into(),
            }
        }

        /// Checks whether the provided `price` falls into this
        /// [`PriceRange`].
        #[must_use]
        pub fn contains(&self, price: u64) -> bool {
            self.min <= price && self.max.is_none_or(|max| price <= max)
        }

        /// Indicates whether no price can fall into this [`PriceRange`].
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.max.is_some_and(|max| max < self.min)
        }
    }

    impl fmt::Display for PriceRange {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.max {
                Some(max) => write!(f, "{}-{max}", self.min),
                None => write!(f, "{}+", self.min),
            }
        }
    }

    impl FromStr for PriceRange {
        type Err = PriceRangeParseError;

        /// Parses a [`PriceRange`] out of one of the forms:
        /// - empty or `any`: every price;
        /// - `MIN-MAX`: from `MIN` to `MAX`;
        /// - `MIN+` or `MIN-`: from `MIN` and above;
        /// - `-MAX`: up to `MAX`.
        ///
        /// Digits may be grouped with `,` or `_`.
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            /// Regular expression matching the [`PriceRange`] forms.
            static REGEX: LazyLock<Regex> = LazyLock::new(|| {
                Regex::new(
                    r"^(?<min>\d[\d,_]*)?\s*(?<sep>-|\+)?\s*(?<max>\d[\d,_]*)?$",
                )
                .expect("valid regex")
            });

            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("any") {
                return Ok(Self::default());
            }

            let caps = REGEX
                .captures(s)
                .ok_or(PriceRangeParseError::Malformed)?;
            let bound = |name| {
                caps.name(name)
                    .map(|m| parse_amount(m.as_str()))
                    .transpose()
            };
            let (min, max) = (bound("min")?, bound("max")?);

            match (min, caps.name("sep").map(|m| m.as_str()), max) {
                (Some(min), Some("-"), Some(max)) => Ok(Self::new(min, max)),
                (Some(min), Some("-" | "+"), None) => Ok(Self::new(min, None)),
                (None, Some("-"), Some(max)) => Ok(Self::new(0, max)),
                _ => Err(PriceRangeParseError::Malformed),
            }
        }
    }

    /// Single bound of a [`PriceRange`] in whole Kenyan Shillings.
    ///
    /// Parsed the same way as [`PriceRange`] bounds, so both accept the whole
    /// [`u64`] range.
    #[derive(
        AsRef, Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq,
    )]
    pub struct PriceBound(u64);

    impl PriceBound {
        /// Returns the amount of this [`PriceBound`].
        #[must_use]
        pub fn get(self) -> u64 {
            self.0
        }
    }

    impl FromStr for PriceBound {
        type Err = PriceRangeParseError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let s = s.trim();
            let grouped = |c: char| c.is_ascii_digit() || matches!(c, ',' | '_');
            if !s.starts_with(|c: char| c.is_ascii_digit())
                || !s.chars().all(grouped)
            {
                return Err(PriceRangeParseError::Amount);
            }
            parse_amount(s).map(Self)
        }
    }

    /// Parses an amount with optional `,` or `_` digit grouping.
    fn parse_amount(s: &str) -> Result<u64, PriceRangeParseError> {
        s.chars()
            .filter(|c| !matches!(c, ',' | '_'))
            .collect::<String>()
            .parse()
            .map_err(|_| PriceRangeParseError::Overflow)
    }

    /// Error of parsing a [`PriceRange`].
    #[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
    pub enum PriceRangeParseError {
        /// Input doesn't match any [`PriceRange`] form.
        #[display("price range must look like `MIN-MAX`, `MIN+` or `-MAX`")]
        Malformed,

        /// Bound doesn't fit into the supported amounts.
        #[display("price range bound is too large")]
        Overflow,

        /// Single bound is not a non-negative whole amount.
        #[display("price must be a non-negative whole amount")]
        Amount,
    }

    /// Returns distinct [`listing::Location::area`]s of the provided
    /// [`Listing`]s in the order they first appear.
    pub fn locations<'l>(
        listings: impl IntoIterator<Item = &'l Listing>,
    ) -> Vec<&'l str> {
        listings
            .into_iter()
            .map(|l| l.location.area())
            .unique()
            .collect()
    }

    /// Case-insensitive substring check, `needle` being already lowercased.
    fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(needle)
    }

}
