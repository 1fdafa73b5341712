//! Map [`Provider`]s rendering [`Listing`] markers.

pub mod google;
pub mod mapbox;

use std::future::{self, Future};

use common::define_kind;
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::listing::{self, Coords},
    map::Variant,
};
#[cfg(doc)]
use crate::{domain::Listing, map::Marker};

pub use self::{google::Google, mapbox::Mapbox};

/// Capability of an external map provider.
///
/// The provider is an external collaborator: its failures never propagate
/// beyond the map itself.
pub trait Provider {
    /// Returns [`Kind`] of this [`Provider`].
    fn kind(&self) -> Kind;

    /// Initializes this [`Provider`], returning the [`Canvas`] to place
    /// [`Marker`]s on.
    ///
    /// # Errors
    ///
    /// If this [`Provider`] is misconfigured or unreachable.
    fn initialize(
        &self,
    ) -> impl Future<Output = Result<Canvas, Traced<Error>>>;

    /// Returns [`MarkerStyle`] of a [`Marker`] with the provided
    /// [`listing::Status`] and [`Variant`].
    fn marker_style(
        &self,
        status: listing::Status,
        variant: Variant,
    ) -> MarkerStyle;
}

define_kind! {
    #[doc = "Kind of a map [`Provider`]."]
    #[case = "lowercase"]
    enum Kind {
        #[doc = "[Mapbox GL JS](https://docs.mapbox.com/mapbox-gl-js)."]
        Mapbox = 1,

        #[doc = "[Google Maps](https://developers.google.com/maps)."]
        Google = 2,

        #[doc = "No map provider configured."]
        Disabled = 3,
    }
}

/// Initial viewport of a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    /// [`Kind`] of the [`Provider`] rendering this [`Canvas`].
    pub provider: Kind,

    /// Center of the viewport.
    pub center: Coords,

    /// Zoom level of the viewport.
    pub zoom: u8,
}

impl Canvas {
    /// Center of the default viewport: Kilifi county.
    pub const KILIFI: Coords = Coords {
        lat: -3.5107,
        lng: 39.9093,
    };

    /// Zoom level of the default viewport.
    pub const DEFAULT_ZOOM: u8 = 10;

    /// Creates a new [`Canvas`] centered at [`Canvas::KILIFI`].
    #[must_use]
    pub fn kilifi(provider: Kind) -> Self {
        Self {
            provider,
            center: Self::KILIFI,
            zoom: Self::DEFAULT_ZOOM,
        }
    }
}

/// Provider-specific look of a [`Marker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Scale of the [`Marker`] (a transform factor or an icon size,
    /// depending on the [`Provider`]).
    pub scale: f64,

    /// Stacking order of the [`Marker`].
    pub z_index: i32,

    /// CSS fill color of the [`Marker`].
    pub fill_color: &'static str,
}

impl MarkerStyle {
    /// Fill color of available [`Listing`]s.
    pub const PRIMARY: &'static str = "#2dabe1";

    /// Fill color of sold [`Listing`]s.
    pub const NEUTRAL: &'static str = "#a3a3a3";

    /// Fill color of emphasized [`Marker`]s.
    pub const ACCENT: &'static str = "#ec1c26";

    /// Returns the default fill color for the provided [`listing::Status`].
    #[must_use]
    pub fn fill_of(status: listing::Status) -> &'static str {
        match status {
            listing::Status::Available => Self::PRIMARY,
            listing::Status::Sold => Self::NEUTRAL,
        }
    }
}

/// Placeholder [`Provider`] used when no map is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disabled;

impl Provider for Disabled {
    fn kind(&self) -> Kind {
        Kind::Disabled
    }

    fn initialize(
        &self,
    ) -> impl Future<Output = Result<Canvas, Traced<Error>>> {
        future::ready(Err(tracerr::new!(Error::NotConfigured)))
    }

    fn marker_style(
        &self,
        status: listing::Status,
        _: Variant,
    ) -> MarkerStyle {
        MarkerStyle {
            scale: 1.0,
            z_index: 1,
            fill_color: MarkerStyle::fill_of(status),
        }
    }
}

/// [`Provider`] selected by configuration.
#[derive(Clone, Debug, From)]
pub enum Configured {
    /// [`Mapbox`] provider.
    Mapbox(Mapbox),

    /// [`Google`] provider.
    Google(Google),

    /// No provider.
    Disabled(Disabled),
}

impl Default for Configured {
    fn default() -> Self {
        Self::Disabled(Disabled)
    }
}

impl Provider for Configured {
    fn kind(&self) -> Kind {
        match self {
            Self::Mapbox(p) => p.kind(),
            Self::Google(p) => p.kind(),
            Self::Disabled(p) => p.kind(),
        }
    }

    async fn initialize(&self) -> Result<Canvas, Traced<Error>> {
        match self {
            Self::Mapbox(p) => p.initialize().await,
            Self::Google(p) => p.initialize().await,
            Self::Disabled(p) => p.initialize().await,
        }
    }

    fn marker_style(
        &self,
        status: listing::Status,
        variant: Variant,
    ) -> MarkerStyle {
        match self {
            Self::Mapbox(p) => p.marker_style(status, variant),
            Self::Google(p) => p.marker_style(status, variant),
            Self::Disabled(p) => p.marker_style(status, variant),
        }
    }
}

/// Map [`Provider`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// No map [`Provider`] is configured.
    #[display("no map provider configured")]
    NotConfigured,

    /// Credentials of the [`Provider`] are missing or blank.
    #[display("`{_0}` credentials are missing")]
    MissingCredentials(#[error(not(source))] Kind),

    /// [`Provider`] didn't initialize in time.
    #[display("`{_0}` initialization timed out")]
    Timeout(#[error(not(source))] Kind),
}

#[cfg(test)]
mod spec {
    use futures::executor::block_on;

    use super::{Configured, Disabled, Error, Kind, Provider as _};

    #[test]
    fn disabled_provider_fails_to_initialize() {
        let err = block_on(Disabled.initialize()).unwrap_err();

        assert!(matches!(err.as_ref(), Error::NotConfigured));
        assert_eq!(err.as_ref().to_string(), "no map provider configured");
    }

    #[test]
    fn configured_delegates_to_selected_provider() {
        let provider = Configured::default();

        assert_eq!(provider.kind(), Kind::Disabled);
        assert!(block_on(provider.initialize()).is_err());
    }

    #[test]
    fn displays_kind_in_lowercase() {
        assert_eq!(Kind::Mapbox.to_string(), "mapbox");
        assert_eq!("google".parse::<Kind>().unwrap(), Kind::Google);
    }
}
