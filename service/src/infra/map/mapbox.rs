//! [Mapbox GL JS] map [`Provider`].
//!
//! [Mapbox GL JS]: https://docs.mapbox.com/mapbox-gl-js

use secrecy::{ExposeSecret as _, SecretString};
use tracerr::Traced;

use super::{Canvas, Error, Kind, MarkerStyle, Provider};
use crate::{domain::listing, map::Variant};

/// [Mapbox GL JS] map [`Provider`].
///
/// [Mapbox GL JS]: https://docs.mapbox.com/mapbox-gl-js
#[derive(Clone, Debug)]
pub struct Mapbox {
    /// Public access token of the Mapbox account.
    access_token: Option<SecretString>,
}

impl Mapbox {
    /// Map style the [`Canvas`] is rendered with.
    pub const STYLE: &'static str = "mapbox://styles/mapbox/streets-v12";

    /// Creates a new [`Mapbox`] provider authorized with the provided
    /// `access_token`.
    #[must_use]
    pub fn new(access_token: Option<SecretString>) -> Self {
        Self { access_token }
    }
}

impl Provider for Mapbox {
    fn kind(&self) -> Kind {
        Kind::Mapbox
    }

    async fn initialize(&self) -> Result<Canvas, Traced<Error>> {
        let has_token = self
            .access_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty());
        if !has_token {
            return Err(tracerr::new!(Error::MissingCredentials(Kind::Mapbox)));
        }

        Ok(Canvas::kilifi(Kind::Mapbox))
    }

    fn marker_style(
        &self,
        status: listing::Status,
        variant: Variant,
    ) -> MarkerStyle {
        let (scale, z_index) = match variant {
            Variant::Default => (1.0, 1),
            Variant::Emphasized => (1.2, 1000),
        };
        MarkerStyle {
            scale,
            z_index,
            fill_color: MarkerStyle::fill_of(status),
        }
    }
}

#[cfg(test)]
mod spec {
    use futures::executor::block_on;
    use secrecy::SecretString;

    use super::{Mapbox, MarkerStyle};
    use crate::{
        domain::listing::Status,
        infra::map::{Canvas, Error, Kind, Provider as _},
        map::Variant,
    };

    fn token(s: &str) -> Option<SecretString> {
        Some(SecretString::from(s.to_owned()))
    }

    #[test]
    fn initializes_with_token() {
        let canvas = block_on(Mapbox::new(token("pk.test")).initialize())
            .unwrap();

        assert_eq!(canvas, Canvas::kilifi(Kind::Mapbox));
        assert_eq!(canvas.zoom, 10);
    }

    #[test]
    fn fails_without_token() {
        for provider in [Mapbox::new(None), Mapbox::new(token("  "))] {
            let err = block_on(provider.initialize()).unwrap_err();

            assert!(matches!(
                err.as_ref(),
                Error::MissingCredentials(Kind::Mapbox),
            ));
        }
    }

    #[test]
    fn scales_emphasized_marker() {
        let provider = Mapbox::new(None);

        let default = provider.marker_style(Status::Available, Variant::Default);
        let emphasized =
            provider.marker_style(Status::Available, Variant::Emphasized);

        assert_eq!(default.scale, 1.0);
        assert_eq!(default.z_index, 1);
        assert_eq!(emphasized.scale, 1.2);
        assert_eq!(emphasized.z_index, 1000);
        assert_eq!(emphasized.fill_color, MarkerStyle::PRIMARY);
    }

    #[test]
    fn greys_out_sold_marker() {
        let style = Mapbox::new(None).marker_style(Status::Sold, Variant::Default);

        assert_eq!(style.fill_color, MarkerStyle::NEUTRAL);
    }
}
