//! [`Listing`] definitions.

use std::{
    num::{NonZeroU16, NonZeroU64},
    str::FromStr,
};

use common::{define_kind, Money};
use derive_more::{AsRef, Display};
use rust_decimal::Decimal;

/// Land plot offered for sale.
///
/// [`Listing`]s are loaded once and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Slug`] of this [`Listing`] used in its page URL.
    pub slug: Slug,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Location`] of this [`Listing`].
    pub location: Location,

    /// [`Price`] of this [`Listing`].
    pub price: Price,

    /// [`SizeAcres`] of this [`Listing`].
    pub size: SizeAcres,

    /// Geographic [`Coords`] of this [`Listing`].
    ///
    /// [`None`] if the source record has no usable coordinates, in which case
    /// this [`Listing`] cannot be placed on a map.
    pub coords: Option<Coords>,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// [`Images`] of this [`Listing`].
    pub images: Images,

    /// [`PaymentPlan`] of this [`Listing`].
    pub payment_plan: PaymentPlan,

    /// Display tags describing features of this [`Listing`].
    pub features: Vec<String>,

    /// Display tags describing amenities of this [`Listing`].
    pub amenities: Vec<String>,

    /// Short description shown on the [`Listing`] card.
    pub short_description: String,

    /// Long description shown on the [`Listing`] page.
    pub long_description: String,
}

impl Listing {
    /// Returns monthly installment of this [`Listing`]'s [`PaymentPlan`].
    #[must_use]
    pub fn monthly_payment(&self) -> Money {
        self.payment_plan.monthly_payment()
    }

    /// Returns full [`Breakdown`] of this [`Listing`]'s [`PaymentPlan`].
    #[must_use]
    pub fn breakdown(&self) -> Breakdown {
        self.payment_plan.breakdown()
    }
}

/// Checks whether the given `text` is a valid single-line display string.
fn is_display_text(text: &str) -> bool {
    text.trim() == text && !text.is_empty() && text.len() <= 512
}

/// ID of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty() && id.len() <= 128 && !id.contains(char::is_whitespace)
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

/// URL slug of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        let slug = slug.as_ref();
        !slug.is_empty()
            && slug.len() <= 128
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        is_display_text(&title).then_some(Self(title))
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Human-readable location of a [`Listing`], like `Kilifi – Bofa Phase 20`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Location(String);

impl Location {
    /// Separator between the area and the rest of a [`Location`].
    pub const AREA_SEPARATOR: &'static str = " – ";

    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        is_display_text(&location).then_some(Self(location))
    }

    /// Returns the area this [`Location`] belongs to: everything before the
    /// [`Location::AREA_SEPARATOR`], or the whole [`Location`] if there is no
    /// separator.
    #[must_use]
    pub fn area(&self) -> &str {
        self.0
            .split_once(Self::AREA_SEPARATOR)
            .map_or(self.0.as_str(), |(area, _)| area)
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Price of a [`Listing`] in whole Kenyan Shillings.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Price(NonZeroU64);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is positive.
    #[must_use]
    pub fn new(amount: u64) -> Option<Self> {
        NonZeroU64::new(amount).map(Self)
    }

    /// Returns the amount of this [`Price`] in whole Kenyan Shillings.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns this [`Price`] as [`Money`].
    #[must_use]
    pub fn money(self) -> Money {
        Money::kes(self.get())
    }
}

/// Size of a [`Listing`] in acres, possibly in fractional notation (`1/8`).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct SizeAcres(String);

impl SizeAcres {
    /// Creates a new [`SizeAcres`] if the given `size` is valid.
    #[must_use]
    pub fn new(size: impl Into<String>) -> Option<Self> {
        let size = size.into();
        is_display_text(&size).then_some(Self(size))
    }
}

impl FromStr for SizeAcres {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SizeAcres`")
    }
}

/// Geographic point of a [`Listing`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coords {
    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

impl Coords {
    /// Creates new [`Coords`] if the given values are finite and within the
    /// valid degree ranges.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

define_kind! {
    #[doc = "Sale status of a [`Listing`]."]
    #[case = "lowercase"]
    enum Status {
        #[doc = "[`Listing`] can still be bought."]
        Available = 1,

        #[doc = "[`Listing`] is sold out."]
        Sold = 2,
    }
}

/// Non-empty ordered list of image URLs of a [`Listing`].
#[derive(AsRef, Clone, Debug, Eq, PartialEq)]
#[as_ref([String])]
pub struct Images(Vec<String>);

impl Images {
    /// Creates new [`Images`] if the given list is not empty and contains no
    /// blank URLs.
    #[must_use]
    pub fn new(urls: Vec<String>) -> Option<Self> {
        let valid =
            !urls.is_empty() && urls.iter().all(|u| !u.trim().is_empty());
        valid.then_some(Self(urls))
    }

    /// Returns the cover image URL (the first one).
    #[expect(clippy::missing_panics_doc, reason = "never empty")]
    #[must_use]
    pub fn cover(&self) -> &str {
        self.0.first().expect("`Images` are never empty")
    }

    /// Iterates over all image URLs in their order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Number of monthly installments in a [`PaymentPlan`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Months(NonZeroU16);

impl Months {
    /// Creates new [`Months`] if the given `months` is positive.
    #[must_use]
    pub fn new(months: u16) -> Option<Self> {
        NonZeroU16::new(months).map(Self)
    }

    /// Returns the number of these [`Months`].
    #[must_use]
    pub fn get(self) -> u16 {
        self.0.get()
    }
}

/// Installment plan of a [`Listing`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaymentPlan {
    /// Deposit paid upfront, in whole Kenyan Shillings.
    deposit: u64,

    /// Number of monthly installments covering the balance.
    months: Months,

    /// [`Price`] this [`PaymentPlan`] pays off.
    ///
    /// Never less than the `deposit`.
    price: Price,
}

impl PaymentPlan {
    /// Creates a new [`PaymentPlan`] for the given [`Price`].
    ///
    /// [`None`] is returned if the `deposit` exceeds the `price`.
    #[must_use]
    pub fn new(deposit: u64, months: Months, price: Price) -> Option<Self> {
        (deposit <= price.get()).then_some(Self {
            deposit,
            months,
            price,
        })
    }

    /// Returns the deposit of this [`PaymentPlan`].
    #[must_use]
    pub fn deposit(&self) -> Money {
        Money::kes(self.deposit)
    }

    /// Returns the number of monthly installments of this [`PaymentPlan`].
    #[must_use]
    pub fn months(&self) -> Months {
        self.months
    }

    /// Returns the [`Price`] this [`PaymentPlan`] pays off.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the balance left after the deposit, in whole Kenyan Shillings.
    fn balance(&self) -> u64 {
        self.price.get().saturating_sub(self.deposit)
    }

    /// Calculates the monthly installment of this [`PaymentPlan`].
    #[must_use]
    pub fn monthly_payment(&self) -> Money {
        let balance = Decimal::from(self.balance());
        Money::kes(balance / Decimal::from(self.months.get())).round()
    }

    /// Calculates the full [`Breakdown`] of this [`PaymentPlan`].
    #[must_use]
    pub fn breakdown(&self) -> Breakdown {
        Breakdown {
            deposit: self.deposit(),
            balance: Money::kes(self.balance()),
            monthly: self.monthly_payment(),
            months: self.months,
            // Installments are interest-free.
            total: self.price.money(),
        }
    }
}

/// Breakdown of a [`PaymentPlan`] applied to a [`Price`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Deposit paid upfront.
    pub deposit: Money,

    /// Balance left after the deposit.
    pub balance: Money,

    /// Monthly installment covering the balance.
    pub monthly: Money,

    /// Number of monthly installments.
    pub months: Months,

    /// Total amount payable.
    pub total: Money,
}
