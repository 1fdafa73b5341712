//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{
    domain, infra::MapProvider as _, query, read::listing::list,
    Query as _,
};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Listing`s passing all the specified filters, in their
    /// catalog order.
    ///
    /// Omitted filters pass every `Listing`. `minPrice` and `maxPrice`
    /// override the bounds of `priceRange`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PRICE_RANGE` - the `priceRange` cannot be parsed;
    /// - `INVALID_SIZE` - the `size` is not a valid size in acres.
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listings",
            location = ?location,
            max_price = ?max_price,
            min_price = ?min_price,
            otel.name = Self::SPAN_NAME,
            price_range = ?price_range,
            search = ?search,
            size = ?size,
            status = ?status,
        ),
    )]
    pub async fn listings(
        search: Option<String>,
        location: Option<String>,
        price_range: Option<String>,
        min_price: Option<api::listing::PriceBound>,
        max_price: Option<api::listing::PriceBound>,
        status: Option<api::listing::Status>,
        size: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let filter = filter(
            search,
            location,
            price_range,
            min_price,
            max_price,
            status,
            size,
        )
        .map_err(ctx.error())?;

        ctx.service()
            .execute(query::listings::List { filter })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|listings| listings.into_iter().map(Into::into).collect())
    }

    /// Returns the `Listing` with the specified slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified slug does
    ///                          not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub async fn listing(
        slug: api::listing::Slug,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::BySlug::by(slug.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the distinct location areas of all the `Listing`s, in the
    /// order they first appear in the catalog.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "locations",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn locations(ctx: &Context) -> Result<Vec<String>, Error> {
        ctx.service()
            .execute(query::listings::Locations)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the `Map` of the `Listing`s passing all the specified filters,
    /// with the `Listing` of the specified `hoveredId` emphasized.
    ///
    /// Never waits for the map provider: its current availability is
    /// reported instead.
    ///
    /// # Errors
    ///
    /// Same as for the `listings` query.
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "map",
            hovered_id = ?hovered_id.as_ref().map(ToString::to_string),
            location = ?location,
            max_price = ?max_price,
            min_price = ?min_price,
            otel.name = Self::SPAN_NAME,
            price_range = ?price_range,
            search = ?search,
            size = ?size,
            status = ?status,
        ),
    )]
    pub async fn map(
        search: Option<String>,
        location: Option<String>,
        price_range: Option<String>,
        min_price: Option<api::listing::PriceBound>,
        max_price: Option<api::listing::PriceBound>,
        status: Option<api::listing::Status>,
        size: Option<String>,
        hovered_id: Option<api::listing::Id>,
        ctx: &Context,
    ) -> Result<api::Map, Error> {
        let filter = filter(
            search,
            location,
            price_range,
            min_price,
            max_price,
            status,
            size,
        )
        .map_err(ctx.error())?;

        let view = ctx
            .service()
            .execute(query::map::Markers {
                filter,
                hovered: hovered_id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        Ok(api::Map::new(view, ctx.service().map_provider().kind()))
    }
}

/// Builds a [`list::Filter`] out of the provided GraphQL arguments.
#[expect(clippy::too_many_arguments, reason = "still readable")]
fn filter(
    search: Option<String>,
    location: Option<String>,
    price_range: Option<String>,
    min_price: Option<api::listing::PriceBound>,
    max_price: Option<api::listing::PriceBound>,
    status: Option<api::listing::Status>,
    size: Option<String>,
) -> Result<list::Filter, Error> {
    let mut price = price_range
        .as_deref()
        .map(str::parse::<list::PriceRange>)
        .transpose()
        .map_err(AsError::into_error)?
        .unwrap_or_default();
    if let Some(min) = min_price {
        price.min = list::PriceBound::from(min).get();
    }
    if let Some(max) = max_price {
        price.max = Some(list::PriceBound::from(max).get());
    }

    let size = size
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
        .map(|s| {
            domain::listing::SizeAcres::new(s)
                .ok_or_else(|| Error::from(api::FilterError::InvalidSize))
        })
        .transpose()?;

    Ok(list::Filter {
        search: search.map(list::SearchTerm::new).unwrap_or_default(),
        location: location.map(list::LocationFilter::new).unwrap_or_default(),
        price,
        status: status.map(domain::listing::Status::from).into(),
        size,
    })
}

#[cfg(test)]
mod spec {
    use service::read::listing::list::{
        LocationFilter, PriceRange, SearchTerm, StatusFilter,
    };

    use super::filter;
    use crate::api::listing::{PriceBound, Status};

    fn bound(amount: &str) -> Option<PriceBound> {
        Some(PriceBound::from(
            amount.parse::<service::read::listing::list::PriceBound>().unwrap(),
        ))
    }

    #[test]
    fn builds_default_filter_from_nothing() {
        let f = filter(None, None, None, None, None, None, None).unwrap();

        assert!(f.is_default());
    }

    #[test]
    fn builds_filter_from_all_arguments() {
        let f = filter(
            Some("  Beach ".into()),
            Some("Kilifi".into()),
            Some("500,000-2,000,000".into()),
            None,
            None,
            Some(Status::Available),
            Some("1/8".into()),
        )
        .unwrap();

        assert_eq!(f.search, SearchTerm::new("beach"));
        assert_eq!(f.location, LocationFilter::Only("kilifi".into()));
        assert_eq!(f.price, PriceRange::new(500_000, 2_000_000));
        assert!(matches!(f.status, StatusFilter::Only(_)));
        assert_eq!(f.size.unwrap().to_string(), "1/8");
    }

    #[test]
    fn overrides_price_range_bounds() {
        let f = filter(
            None,
            None,
            Some("100-200".into()),
            bound("50"),
            None,
            None,
            None,
        )
        .unwrap();
        let g =
            filter(None, None, None, None, bound("0"), None, None).unwrap();
        let h = filter(
            None,
            None,
            None,
            bound("5,000,000,000"),
            bound("18446744073709551615"),
            None,
            None,
        )
        .unwrap();

        assert_eq!(f.price, PriceRange::new(50, 200));
        assert_eq!(g.price, PriceRange::new(0, 0));
        assert_eq!(h.price, PriceRange::new(5_000_000_000, u64::MAX));
    }

    #[test]
    fn treats_all_size_as_no_size() {
        let f = filter(None, None, None, None, None, None, Some("all".into()))
            .unwrap();

        assert!(f.size.is_none());
    }

    #[test]
    fn rejects_invalid_arguments() {
        let range =
            filter(None, None, Some("cheap".into()), None, None, None, None)
                .unwrap_err();
        let size =
            filter(None, None, None, None, None, None, Some("1".repeat(600)))
                .unwrap_err();

        assert_eq!(range.code, "INVALID_PRICE_RANGE");
        assert_eq!(range.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(size.code, "INVALID_SIZE");
    }
}
