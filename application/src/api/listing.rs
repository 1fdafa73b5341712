//! [`Listing`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::{domain, read::listing::list};

use crate::{api, api::scalar, Context};

/// A land plot offered for sale.
#[derive(Clone, Debug, From, Into)]
pub struct Listing(domain::Listing);

/// A land plot offered for sale.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.clone().into()
    }

    /// URL slug of this `Listing`'s page.
    #[must_use]
    pub fn slug(&self) -> Slug {
        self.0.slug.clone().into()
    }

    /// Title of this `Listing`.
    #[must_use]
    pub fn title(&self) -> &str {
        self.0.title.as_ref()
    }

    /// Human-readable location of this `Listing`, like
    /// `Kilifi – Bofa Phase 20`.
    #[must_use]
    pub fn location(&self) -> &str {
        self.0.location.as_ref()
    }

    /// Area of this `Listing`'s location, like `Kilifi`.
    #[must_use]
    pub fn area(&self) -> &str {
        self.0.location.area()
    }

    /// Price of this `Listing`.
    #[graphql(name = "priceKES")]
    #[must_use]
    pub fn price_kes(&self) -> Money {
        self.0.price.money()
    }

    /// Size of this `Listing` in acres, possibly fractional (`1/8`).
    #[must_use]
    pub fn size_acres(&self) -> &str {
        self.0.size.as_ref()
    }

    /// Geographic coordinates of this `Listing`.
    ///
    /// `null` if this `Listing` cannot be placed on a map.
    #[must_use]
    pub fn coords(&self) -> Option<Coords> {
        self.0.coords.map(Into::into)
    }

    /// Sale status of this `Listing`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Image URLs of this `Listing`, the cover one first.
    #[must_use]
    pub fn images(&self) -> Vec<String> {
        self.0.images.iter().map(ToOwned::to_owned).collect()
    }

    /// Cover image URL of this `Listing`.
    #[must_use]
    pub fn cover_image(&self) -> &str {
        self.0.images.cover()
    }

    /// Monthly installment of this `Listing`'s payment plan.
    #[must_use]
    pub fn monthly_payment(&self) -> Money {
        self.0.monthly_payment()
    }

    /// Payment plan of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.paymentPlan",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn payment_plan(&self) -> PaymentPlan {
        self.0.breakdown().into()
    }

    /// Feature tags of this `Listing`.
    #[must_use]
    pub fn features(&self) -> Vec<String> {
        self.0.features.clone()
    }

    /// Amenity tags of this `Listing`.
    #[must_use]
    pub fn amenities(&self) -> Vec<String> {
        self.0.amenities.clone()
    }

    /// Short description of this `Listing`.
    #[must_use]
    pub fn short_description(&self) -> &str {
        &self.0.short_description
    }

    /// Long description of this `Listing`.
    #[must_use]
    pub fn long_description(&self) -> &str {
        &self.0.long_description
    }

    /// Deep-links for contacting the sales team about this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.contact",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn contact(&self, ctx: &Context) -> Contact {
        let channels = &ctx.service().config().contact;
        Contact {
            phone: channels.call_link(),
            whatsapp: channels.whatsapp_link(Some(&self.0.title)),
            email: channels.email_link(),
        }
    }
}

/// Unique identifier of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ListingId", with = scalar::Via::<domain::listing::Id>)]
pub struct Id(domain::listing::Id);

/// URL slug of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ListingSlug", with = scalar::Via::<domain::listing::Slug>)]
pub struct Slug(domain::listing::Slug);

/// Bound of a `Listing` price filter in whole Kenyan Shillings.
///
/// A string of digits with optional `,` or `_` grouping (`"1,500,000"`).
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "PriceBound", with = scalar::Via::<list::PriceBound>)]
pub struct PriceBound(list::PriceBound);

/// Sale status of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// `Listing` can still be bought.
    Available,

    /// `Listing` is sold out.
    Sold,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;
        match status {
            S::Available => Self::Available,
            S::Sold => Self::Sold,
        }
    }
}

impl From<Status> for domain::listing::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Sold => Self::Sold,
        }
    }
}

/// Geographic point.
#[derive(Clone, Copy, Debug, GraphQLObject, PartialEq)]
pub struct Coords {
    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

impl From<domain::listing::Coords> for Coords {
    fn from(coords: domain::listing::Coords) -> Self {
        let domain::listing::Coords { lat, lng } = coords;
        Self { lat, lng }
    }
}

/// Breakdown of a `Listing`'s interest-free installment plan.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct PaymentPlan {
    /// Deposit paid upfront.
    pub deposit: Money,

    /// Balance left after the deposit.
    pub balance: Money,

    /// Monthly installment covering the balance, rounded to cents.
    pub monthly: Money,

    /// Number of monthly installments.
    pub months: i32,

    /// Total amount payable.
    pub total: Money,
}

impl From<domain::listing::Breakdown> for PaymentPlan {
    fn from(b: domain::listing::Breakdown) -> Self {
        Self {
            deposit: b.deposit,
            balance: b.balance,
            monthly: b.monthly,
            months: i32::from(b.months.get()),
            total: b.total,
        }
    }
}

/// Deep-links for contacting the sales team.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Contact {
    /// `tel:` link for a phone call.
    pub phone: String,

    /// `https://wa.me` link for a `WhatsApp` chat.
    pub whatsapp: String,

    /// `mailto:` link for an email.
    pub email: String,
}

#[cfg(test)]
mod spec {
    use common::Money;
    use service::domain::listing::{
        Coords as DomainCoords, Months, PaymentPlan as Plan, Price,
    };

    use super::{Coords, PaymentPlan};

    #[test]
    fn converts_breakdown() {
        let price = Price::new(1_950_000).unwrap();
        let plan = Plan::new(500_000, Months::new(12).unwrap(), price).unwrap();

        let gql = PaymentPlan::from(plan.breakdown());

        assert_eq!(gql.months, 12);
        assert_eq!(gql.deposit, Money::kes(500_000));
        assert_eq!(gql.balance, Money::kes(1_450_000));
        assert_eq!(gql.monthly.to_string(), "120833.33KES");
        assert_eq!(gql.total, Money::kes(1_950_000));
    }

    #[test]
    fn converts_coords() {
        let coords = DomainCoords::new(-3.5107, 39.9093).unwrap();

        assert_eq!(
            Coords::from(coords),
            Coords {
                lat: -3.5107,
                lng: 39.9093,
            },
        );
    }
}
