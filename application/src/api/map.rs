//! [`Map`]-related definitions.

use juniper::{graphql_object, GraphQLEnum, GraphQLObject};
use service::{infra::map as provider, map, read};

use crate::{
    api::{self, listing},
    Context,
};

/// Map of the visible `Listing`s.
#[derive(Clone, Debug)]
pub struct Map {
    /// Rendered view of the map.
    view: read::map::View,

    /// Configured provider of the map.
    provider: provider::Kind,
}

impl Map {
    /// Creates a new [`Map`] out of the provided [`read::map::View`].
    #[must_use]
    pub fn new(view: read::map::View, provider: provider::Kind) -> Self {
        Self { view, provider }
    }

    /// Returns the [`provider::Canvas`] of this [`Map`], if it's ready.
    fn canvas(&self) -> Option<&provider::Canvas> {
        match &self.view.availability {
            map::Availability::Ready(canvas) => Some(canvas),
            map::Availability::Loading
            | map::Availability::Unavailable { .. } => None,
        }
    }
}

/// Map of the visible `Listing`s.
#[graphql_object(context = Context)]
impl Map {
    /// Availability of this `Map`.
    ///
    /// `markers` are only rendered once this `Map` is `READY`.
    #[must_use]
    pub fn availability(&self) -> Availability {
        (&self.view.availability).into()
    }

    /// Provider rendering this `Map`.
    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider.into()
    }

    /// Reason of this `Map` being `UNAVAILABLE`.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.view.availability {
            map::Availability::Unavailable { reason } => Some(reason),
            map::Availability::Loading | map::Availability::Ready(_) => None,
        }
    }

    /// Center of the initial viewport of this `Map`.
    #[must_use]
    pub fn center(&self) -> Option<listing::Coords> {
        self.canvas().map(|c| c.center.into())
    }

    /// Zoom level of the initial viewport of this `Map`.
    #[must_use]
    pub fn zoom(&self) -> Option<i32> {
        self.canvas().map(|c| i32::from(c.zoom))
    }

    /// Markers of the visible `Listing`s having coordinates, in the order of
    /// the `Listing`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Map.markers",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.view.markers.iter().map(Into::into).collect()
    }
}

/// Availability of a `Map`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "MapAvailability")]
pub enum Availability {
    /// Provider is still being initialized.
    Loading,

    /// `Map` is ready to render markers.
    Ready,

    /// Provider failed to initialize.
    Unavailable,
}

impl From<&map::Availability> for Availability {
    fn from(availability: &map::Availability) -> Self {
        match availability {
            map::Availability::Loading => Self::Loading,
            map::Availability::Ready(_) => Self::Ready,
            map::Availability::Unavailable { .. } => Self::Unavailable,
        }
    }
}

/// Provider of a `Map`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "MapProvider")]
pub enum Provider {
    /// Mapbox GL.
    Mapbox,

    /// Google Maps.
    Google,

    /// No provider configured.
    Disabled,
}

impl From<provider::Kind> for Provider {
    fn from(kind: provider::Kind) -> Self {
        match kind {
            provider::Kind::Mapbox => Self::Mapbox,
            provider::Kind::Google => Self::Google,
            provider::Kind::Disabled => Self::Disabled,
        }
    }
}

/// Marker of a single `Listing` on a `Map`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "MapMarker")]
pub struct Marker {
    /// ID of the `Listing` this `MapMarker` represents.
    pub listing_id: listing::Id,

    /// Latitude of this `MapMarker`.
    pub lat: f64,

    /// Longitude of this `MapMarker`.
    pub lng: f64,

    /// Sale status of the represented `Listing`.
    pub status: listing::Status,

    /// Visual variant of this `MapMarker`.
    pub variant: Variant,

    /// Provider-specific look of this `MapMarker`.
    pub style: MarkerStyle,
}

impl From<&read::map::StyledMarker> for Marker {
    fn from(styled: &read::map::StyledMarker) -> Self {
        let read::map::StyledMarker {
            marker,
            variant,
            style,
        } = styled;
        Self {
            listing_id: marker.listing_id.clone().into(),
            lat: marker.coords.lat,
            lng: marker.coords.lng,
            status: marker.status.into(),
            variant: (*variant).into(),
            style: (*style).into(),
        }
    }
}

/// Visual variant of a `MapMarker`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "MarkerVariant")]
pub enum Variant {
    /// Regular look.
    Default,

    /// Highlighted look of the hovered `Listing`.
    Emphasized,
}

impl From<map::Variant> for Variant {
    fn from(variant: map::Variant) -> Self {
        match variant {
            map::Variant::Default => Self::Default,
            map::Variant::Emphasized => Self::Emphasized,
        }
    }
}

/// Provider-specific look of a `MapMarker`.
#[derive(Clone, Debug, GraphQLObject, PartialEq)]
pub struct MarkerStyle {
    /// Scale of the `MapMarker`: a transform factor for Mapbox or an icon
    /// size for Google Maps.
    pub scale: f64,

    /// Stacking order of the `MapMarker`.
    pub z_index: i32,

    /// CSS fill color of the `MapMarker`.
    pub fill_color: String,
}

impl From<provider::MarkerStyle> for MarkerStyle {
    fn from(style: provider::MarkerStyle) -> Self {
        Self {
            scale: style.scale,
            z_index: style.z_index,
            fill_color: style.fill_color.to_owned(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        domain::listing,
        infra::map::{Canvas, Kind, MarkerStyle},
        map::{self, Availability},
        read,
    };

    use super::{Availability as GqlAvailability, Map, Marker, Variant};

    fn marker(variant: map::Variant) -> read::map::StyledMarker {
        read::map::StyledMarker {
            marker: map::Marker {
                listing_id: listing::Id::new("bofa").unwrap(),
                coords: listing::Coords::new(-3.58, 39.87).unwrap(),
                status: listing::Status::Available,
            },
            variant,
            style: MarkerStyle {
                scale: 1.2,
                z_index: 1000,
                fill_color: MarkerStyle::PRIMARY,
            },
        }
    }

    #[test]
    fn converts_styled_marker() {
        let gql = Marker::from(&marker(map::Variant::Emphasized));

        assert_eq!(gql.listing_id.to_string(), "bofa");
        assert_eq!((gql.lat, gql.lng), (-3.58, 39.87));
        assert_eq!(gql.variant, Variant::Emphasized);
        assert_eq!(gql.style.z_index, 1000);
        assert_eq!(gql.style.fill_color, "#2dabe1");
    }

    #[test]
    fn exposes_canvas_only_when_ready() {
        let loading = Map::new(
            read::map::View {
                availability: Availability::Loading,
                markers: vec![],
            },
            Kind::Mapbox,
        );
        let ready = Map::new(
            read::map::View {
                availability: Availability::Ready(Canvas::kilifi(
                    Kind::Mapbox,
                )),
                markers: vec![marker(map::Variant::Default)],
            },
            Kind::Mapbox,
        );

        assert_eq!(loading.availability(), GqlAvailability::Loading);
        assert!(loading.center().is_none());
        assert!(loading.zoom().is_none());
        assert_eq!(ready.availability(), GqlAvailability::Ready);
        assert_eq!(ready.zoom(), Some(10));
        assert_eq!(ready.center().unwrap().lat, -3.5107);
        assert_eq!(ready.markers().len(), 1);
    }

    #[test]
    fn exposes_unavailability_reason() {
        let map = Map::new(
            read::map::View {
                availability: Availability::Unavailable {
                    reason: "`mapbox` credentials are missing".to_owned(),
                },
                markers: vec![],
            },
            Kind::Mapbox,
        );

        assert_eq!(map.availability(), GqlAvailability::Unavailable);
        assert_eq!(map.reason(), Some("`mapbox` credentials are missing"));
    }
}
